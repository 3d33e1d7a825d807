//! Counter data structure

use serde::{Deserialize, Serialize};

use crate::error::CounterError;
use crate::Result;

pub type CounterId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    /// Assigned by the store, never reused
    pub id: CounterId,
    /// Street or city the counter was created at
    pub label: String,
    pub count: u64,
}

impl Counter {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let count: i64 = row.get(2)?;
        let count = u64::try_from(count)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(2, count))?;

        Ok(Self {
            id: row.get(0)?,
            label: row.get(1)?,
            count,
        })
    }
}

/// Trim a caller-supplied label, rejecting it if nothing is left.
pub(crate) fn normalize_label(label: &str) -> Result<String> {
    let label = label.trim();
    if label.is_empty() {
        return Err(CounterError::Validation(
            "label cannot be empty".to_string(),
        ));
    }
    Ok(label.to_string())
}
