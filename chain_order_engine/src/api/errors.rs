use thiserror::Error;

use crate::traits::StoreError;

#[derive(Debug, Error)]
pub enum ConfirmationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("No chain transaction found for {0}")]
    NotFound(String),
    #[error("Store failure: {0}")]
    StoreFailure(StoreError),
}

impl ConfirmationError {
    /// A missing chain record is an expected race with event ordering, not a failure of the pipeline.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<StoreError> for ConfirmationError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ChainTxNotFound(txid) => Self::NotFound(txid),
            e => Self::StoreFailure(e),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0}")]
    StoreError(#[from] StoreError),
}

pub(crate) fn require_non_empty(name: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::InvalidArgument(format!("{name} param can't be empty string")))
    } else {
        Ok(())
    }
}
