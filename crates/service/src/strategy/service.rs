use std::sync::Arc;

use tracing::{debug, info};

use models::Strategy;

use crate::errors::ServiceError;
use crate::guard::ConcurrencyGuard;
use crate::strategy::store::StrategyStore;

/// Application service encapsulating strategy business rules: structural
/// validation, the defensive key/payload guard, and the one-time default
/// bootstrap. Never touches the store directly — every access is a unit of
/// work submitted to the [`ConcurrencyGuard`].
pub struct StrategyService<S: StrategyStore> {
    store: Arc<S>,
    guard: ConcurrencyGuard,
}

impl<S: StrategyStore> StrategyService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store, guard: ConcurrencyGuard::new() }
    }

    /// All strategies. Best-effort: a store failure is swallowed (the guard
    /// already logged it) and an empty result returned, so callers cannot
    /// distinguish "empty store" from "read failed".
    pub async fn list_strategies(&self) -> Vec<Strategy> {
        match self.guard.read(self.store.list()).await {
            Ok(strategies) => strategies,
            Err(_) => {
                debug!("list failure swallowed, returning empty result");
                Vec::new()
            }
        }
    }

    /// Single strategy by name. Absence is `Ok(None)`, not an error.
    pub async fn find_strategy(&self, name: &str) -> Result<Option<Strategy>, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::blank_name());
        }
        self.guard.read(self.store.find(name)).await
    }

    /// Insert a new strategy under `name`. A key/payload name mismatch is
    /// silently ignored; duplicate names surface as
    /// [`ServiceError::OperationFailed`].
    pub async fn add_strategy(&self, name: &str, strategy: Strategy) -> Result<(), ServiceError> {
        if name != strategy.name {
            debug!(%name, payload = %strategy.name, "key/payload name mismatch, ignoring add");
            return Ok(());
        }
        validate(&strategy)?;
        self.guard.write(self.store.add(strategy)).await
    }

    /// Delete by name, idempotently. Store failures are swallowed; only a
    /// blank name is an error.
    pub async fn delete_strategy(&self, name: &str) -> Result<(), ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::blank_name());
        }
        if self.guard.write(self.store.delete(name)).await.is_err() {
            debug!(%name, "delete failure swallowed");
        }
        Ok(())
    }

    /// Replace the strategy stored under `name` wholesale. Same defensive
    /// guard and validation as [`Self::add_strategy`]; updating an absent
    /// name surfaces as [`ServiceError::OperationFailed`].
    pub async fn modify_strategy(&self, name: &str, strategy: Strategy) -> Result<(), ServiceError> {
        if name != strategy.name {
            debug!(%name, payload = %strategy.name, "key/payload name mismatch, ignoring modify");
            return Ok(());
        }
        validate(&strategy)?;
        self.guard.write(self.store.update(strategy)).await
    }

    /// One-time default bootstrap: when the store holds zero records, install
    /// the four canonical strategies. The emptiness check and the inserts run
    /// as a single write-side unit of work, so two racing initializations
    /// install the defaults exactly once and concurrent early traffic never
    /// observes a partial set.
    pub async fn init_default_strategies(&self) -> Result<(), ServiceError> {
        let defaults = default_strategies();
        for strategy in &defaults {
            validate(strategy)?;
        }

        self.guard
            .write(async {
                if !self.store.list().await?.is_empty() {
                    return Ok(());
                }
                for strategy in defaults {
                    info!(name = %strategy.name, kind = %strategy.kind, "installing default strategy");
                    self.store.add(strategy).await?;
                }
                Ok(())
            })
            .await
    }
}

/// Structural rule enforced before any write: a strategy must carry a type.
/// Name/key consistency is the caller-side guard, not part of validation.
fn validate(strategy: &Strategy) -> Result<(), ServiceError> {
    if strategy.kind.trim().is_empty() {
        return Err(ServiceError::InvalidStrategy("strategy type is empty".into()));
    }
    Ok(())
}

/// Canonical records installed by the bootstrap, in insertion order.
fn default_strategies() -> Vec<Strategy> {
    vec![
        Strategy::new("ip-hash", "ip-hash").with_attribute("argumentType", "NON_ARGUMENT"),
        Strategy::new("round-robin", "round-robin"),
        Strategy::new("consistent_hash_rid", "consistent_hash").with_attribute("target", "$arg_rid"),
        Strategy::new("consistent_hash_arg_requestId", "consistent_hash")
            .with_attribute("target", "$arg_requestId")
            .with_attribute("argumentType", "ONE_ARGUMENT"),
    ]
}
