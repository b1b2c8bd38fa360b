//! Service layer providing concurrency-guarded CRUD on strategy records.
//! - Every store access funnels through the `guard` execution template.
//! - Reuses entity definitions from the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod guard;
pub mod storage;
pub mod strategy;

pub use errors::ServiceError;
pub use strategy::service::StrategyService;
pub use strategy::store::{StoreError, StrategyStore};
