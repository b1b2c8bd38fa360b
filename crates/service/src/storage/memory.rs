use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use models::Strategy;

use crate::strategy::store::{StoreError, StrategyStore};

/// In-memory strategy store for tests and ephemeral deployments.
///
/// The map is keyed by `Strategy::name`, so a record can never sit under a
/// key disagreeing with its own name.
#[derive(Debug, Default)]
pub struct MemoryStrategyStore {
    inner: RwLock<BTreeMap<String, Strategy>>,
}

impl MemoryStrategyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StrategyStore for MemoryStrategyStore {
    async fn list(&self) -> Result<Vec<Strategy>, StoreError> {
        let map = self.inner.read().await;
        Ok(map.values().cloned().collect())
    }

    async fn find(&self, name: &str) -> Result<Option<Strategy>, StoreError> {
        let map = self.inner.read().await;
        Ok(map.get(name).cloned())
    }

    async fn add(&self, strategy: Strategy) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        if map.contains_key(&strategy.name) {
            return Err(StoreError::Duplicate(strategy.name));
        }
        map.insert(strategy.name.clone(), strategy);
        Ok(())
    }

    async fn update(&self, strategy: Strategy) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        if !map.contains_key(&strategy.name) {
            return Err(StoreError::Missing(strategy.name));
        }
        map.insert(strategy.name.clone(), strategy);
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        map.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_rejects_duplicate_names() -> Result<(), anyhow::Error> {
        let store = MemoryStrategyStore::new();
        store.add(Strategy::new("rr", "round-robin")).await?;

        let second = store.add(Strategy::new("rr", "ip-hash")).await;
        assert!(matches!(second, Err(StoreError::Duplicate(name)) if name == "rr"));

        // original record untouched
        let found = store.find("rr").await?.expect("present");
        assert_eq!(found.kind, "round-robin");
        Ok(())
    }

    #[tokio::test]
    async fn update_requires_existing_record() {
        let store = MemoryStrategyStore::new();
        let result = store.update(Strategy::new("ghost", "ip-hash")).await;
        assert!(matches!(result, Err(StoreError::Missing(name)) if name == "ghost"));
    }

    #[tokio::test]
    async fn delete_of_absent_name_succeeds() -> Result<(), anyhow::Error> {
        let store = MemoryStrategyStore::new();
        store.delete("nothing-here").await?;
        assert!(store.list().await?.is_empty());
        Ok(())
    }
}
