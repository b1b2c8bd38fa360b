use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};

use models::Strategy;

use crate::strategy::store::{StoreError, StrategyStore};

/// JSON file-backed strategy store.
///
/// Persists the name-to-record map to a JSON file and rewrites it after each
/// mutation. Intended for lightweight configuration state where a database is
/// overkill.
#[derive(Clone)]
pub struct JsonStrategyStore {
    inner: Arc<RwLock<BTreeMap<String, Strategy>>>,
    file_path: PathBuf,
}

impl JsonStrategyStore {
    /// Initialize the store from a path. Creates the file with an empty map
    /// if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StoreError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: BTreeMap<String, Strategy> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => {
                let empty: BTreeMap<String, Strategy> = BTreeMap::new();
                fs::write(
                    &file_path,
                    serde_json::to_vec(&empty).map_err(|e| StoreError::Backend(e.to_string()))?,
                )
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;
                empty
            }
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path }))
    }

    async fn save(&self) -> Result<(), StoreError> {
        let map = self.inner.read().await;
        let data = serde_json::to_vec(&*map).map_err(|e| StoreError::Backend(e.to_string()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl StrategyStore for JsonStrategyStore {
    async fn list(&self) -> Result<Vec<Strategy>, StoreError> {
        let map = self.inner.read().await;
        Ok(map.values().cloned().collect())
    }

    async fn find(&self, name: &str) -> Result<Option<Strategy>, StoreError> {
        let map = self.inner.read().await;
        Ok(map.get(name).cloned())
    }

    async fn add(&self, strategy: Strategy) -> Result<(), StoreError> {
        {
            let mut map = self.inner.write().await;
            if map.contains_key(&strategy.name) {
                return Err(StoreError::Duplicate(strategy.name));
            }
            map.insert(strategy.name.clone(), strategy);
        }
        self.save().await
    }

    async fn update(&self, strategy: Strategy) -> Result<(), StoreError> {
        {
            let mut map = self.inner.write().await;
            if !map.contains_key(&strategy.name) {
                return Err(StoreError::Missing(strategy.name));
            }
            map.insert(strategy.name.clone(), strategy);
        }
        self.save().await
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        {
            let mut map = self.inner.write().await;
            map.remove(name);
        }
        self.save().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn crud_persists_across_reopen() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("strategies_{}.json", uuid::Uuid::new_v4()));
        let store = JsonStrategyStore::new(&tmp).await?;

        // initially empty
        assert_eq!(store.list().await?.len(), 0);

        store
            .add(Strategy::new("ip-hash", "ip-hash").with_attribute("argumentType", "NON_ARGUMENT"))
            .await?;
        store.add(Strategy::new("rr", "round-robin")).await?;
        assert_eq!(store.list().await?.len(), 2);

        store.update(Strategy::new("rr", "consistent_hash").with_attribute("target", "$arg_rid")).await?;
        store.delete("ip-hash").await?;

        // reload from disk
        let reloaded = JsonStrategyStore::new(&tmp).await?;
        let records = reloaded.list().await?;
        assert_eq!(records.len(), 1);
        let rr = reloaded.find("rr").await?.expect("present");
        assert_eq!(rr.kind, "consistent_hash");
        assert_eq!(rr.dynamic_attribute("target"), Some("$arg_rid"));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_add_leaves_file_untouched() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("strategies_{}.json", uuid::Uuid::new_v4()));
        let store = JsonStrategyStore::new(&tmp).await?;

        store.add(Strategy::new("rr", "round-robin")).await?;
        let err = store.add(Strategy::new("rr", "ip-hash")).await;
        assert!(matches!(err, Err(StoreError::Duplicate(_))));

        let reloaded = JsonStrategyStore::new(&tmp).await?;
        assert_eq!(reloaded.find("rr").await?.expect("present").kind, "round-robin");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
