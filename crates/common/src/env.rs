//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Ensure the data directory exists, creating it if necessary.
pub async fn ensure_env(data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(data_dir).await.is_err() {
        warn!(%data_dir, "data directory not found; creating");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_env_creates_missing_data_dir() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("strategy_data_{}", uuid::Uuid::new_v4()));
        let dir = dir.to_string_lossy().to_string();

        assert!(tokio::fs::metadata(&dir).await.is_err());
        ensure_env(&dir).await?;
        assert!(tokio::fs::metadata(&dir).await?.is_dir());

        // already-existing directory is fine
        ensure_env(&dir).await?;

        let _ = tokio::fs::remove_dir(&dir).await;
        Ok(())
    }
}
