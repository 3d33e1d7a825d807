//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Counter error: {0}")]
    Counter(#[from] tally_counters::CounterError),

    #[error("Location error: {0}")]
    Location(#[from] tally_location::LocationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No location label available, enter one manually")]
    NoLocationLabel,
}

impl CoreError {
    /// Errors the UI must show as blocking: the store itself is gone.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CoreError::Counter(tally_counters::CounterError::StorageUnavailable(_))
                | CoreError::Config(_)
        )
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
