use thiserror::Error;

use crate::strategy::store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid strategy: {0}")]
    InvalidStrategy(String),
    #[error("operation failed: {source}")]
    OperationFailed {
        #[from]
        source: StoreError,
    },
}

impl ServiceError {
    pub fn blank_name() -> Self {
        Self::InvalidArgument("strategy name is empty".into())
    }
}
