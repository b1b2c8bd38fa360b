use std::future::Future;

use tokio::sync::RwLock;
use tracing::warn;

use crate::errors::ServiceError;
use crate::strategy::store::StoreError;

/// Execution template wrapping every store access with a read/write
/// concurrency discipline and uniform error translation.
///
/// Reads may run concurrently with each other but never overlap a write;
/// writes are mutually serialized. A unit of work is any future producing
/// `Result<T, StoreError>` — it is only polled once the corresponding lock
/// half is held. No raw store error escapes: failures are logged and
/// re-raised as [`ServiceError::OperationFailed`] carrying the cause.
#[derive(Debug, Default)]
pub struct ConcurrencyGuard {
    lock: RwLock<()>,
}

impl ConcurrencyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a read-side unit of work under the shared lock half.
    pub async fn read<T, F>(&self, op: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let _shared = self.lock.read().await;
        op.await.map_err(Self::translate)
    }

    /// Run a write-side unit of work under the exclusive lock half.
    pub async fn write<T, F>(&self, op: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let _exclusive = self.lock.write().await;
        op.await.map_err(Self::translate)
    }

    fn translate(source: StoreError) -> ServiceError {
        warn!(error = %source, "store operation failed");
        ServiceError::OperationFailed { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn read_returns_op_result() -> Result<(), anyhow::Error> {
        let guard = ConcurrencyGuard::new();
        let value = guard.read(async { Ok::<_, StoreError>(7u32) }).await?;
        assert_eq!(value, 7);
        Ok(())
    }

    #[tokio::test]
    async fn write_translates_store_errors() {
        let guard = ConcurrencyGuard::new();
        let result = guard
            .write(async { Err::<(), _>(StoreError::Backend("disk full".into())) })
            .await;
        match result {
            Err(ServiceError::OperationFailed { source }) => {
                assert!(matches!(source, StoreError::Backend(_)));
            }
            other => panic!("expected OperationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reads_do_not_block_each_other() {
        use std::sync::Arc;

        let guard = Arc::new(ConcurrencyGuard::new());
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        // First read parks until the second read signals it; both complete
        // only if the read half is actually shared.
        let g = guard.clone();
        let parked = tokio::spawn(async move {
            g.read(async {
                rx.await.ok();
                Ok::<_, StoreError>(())
            })
            .await
        });

        guard
            .read(async {
                tx.send(()).ok();
                Ok::<_, StoreError>(())
            })
            .await
            .expect("second read");

        parked.await.expect("join").expect("first read");
    }
}
