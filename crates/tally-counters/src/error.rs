//! Counter error types

use tally_storage::StorageError;
use thiserror::Error;

use crate::counter::CounterId;

#[derive(Error, Debug)]
pub enum CounterError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[source] StorageError),

    #[error("Invalid label: {0}")]
    Validation(String),

    #[error("Counter not found: {0}")]
    NotFound(CounterId),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CounterError {
    /// Whether the caller can recover by retrying or refreshing its view.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CounterError::Validation(_) | CounterError::NotFound(_))
    }
}
