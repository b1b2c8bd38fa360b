use async_trait::async_trait;
use thiserror::Error;

use models::Strategy;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("strategy '{0}' already exists")]
    Duplicate(String),
    #[error("strategy '{0}' not found")]
    Missing(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Trait abstraction for durable strategy storage.
/// Implementations can be file-backed, in-memory, or remote.
///
/// Records are keyed by `Strategy::name`; implementations must never store a
/// record under a key disagreeing with its `name` field.
#[async_trait]
pub trait StrategyStore: Send + Sync {
    /// All records, order unspecified.
    async fn list(&self) -> Result<Vec<Strategy>, StoreError>;

    /// Single record by name; absence is not an error.
    async fn find(&self, name: &str) -> Result<Option<Strategy>, StoreError>;

    /// Insert a new record. Fails with [`StoreError::Duplicate`] if the name
    /// is already present.
    async fn add(&self, strategy: Strategy) -> Result<(), StoreError>;

    /// Replace an existing record wholesale. Fails with
    /// [`StoreError::Missing`] if the name is absent.
    async fn update(&self, strategy: Strategy) -> Result<(), StoreError>;

    /// Remove a record; deleting an absent name succeeds.
    async fn delete(&self, name: &str) -> Result<(), StoreError>;
}
