use dotenvy::dotenv;
use tracing::info;

use service::storage::JsonStrategyStore;
use service::StrategyService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = configs::AppConfig::load_and_validate()?;

    match cfg.logging.format.as_str() {
        "json" => common::utils::logging::init_logging_json(),
        _ => common::utils::logging::init_logging_default(),
    }

    if let Some(parent) = std::path::Path::new(&cfg.store.data_file).parent() {
        let dir = parent.to_string_lossy();
        if !dir.is_empty() {
            common::env::ensure_env(&dir).await?;
        }
    }

    let store = JsonStrategyStore::new(&cfg.store.data_file)
        .await
        .map_err(|e| anyhow::anyhow!("cannot open strategy store: {e}"))?;
    let service = StrategyService::new(store);

    service.init_default_strategies().await?;

    for strategy in service.list_strategies().await {
        info!(name = %strategy.name, kind = %strategy.kind, attributes = strategy.dynamic_attributes.len(), "strategy");
    }

    info!(data_file = %cfg.store.data_file, "strategy store ready");
    Ok(())
}
