//! Presentation state
//!
//! A plain snapshot for the UI to render. It is rebuilt from the store
//! after every mutation and never patched by hand.

use serde::Serialize;

use tally_counters::{Counter, CounterId};
use tally_location::{Located, LocationError};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LocationStatus {
    /// Not requested yet, or still in flight
    #[default]
    Pending,
    Resolved(Located),
    Denied,
    Unavailable { reason: String },
}

impl From<&Result<Located, LocationError>> for LocationStatus {
    fn from(result: &Result<Located, LocationError>) -> Self {
        match result {
            Ok(located) => LocationStatus::Resolved(located.clone()),
            Err(LocationError::PermissionDenied) => LocationStatus::Denied,
            Err(e) => LocationStatus::Unavailable {
                reason: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub counters: Vec<Counter>,
    pub location: LocationStatus,
}

impl AppState {
    /// Label offered for a new counter, if the location resolved to one.
    pub fn suggested_label(&self) -> Option<String> {
        match &self.location {
            LocationStatus::Resolved(located) => located.label(),
            _ => None,
        }
    }

    pub fn counter(&self, id: CounterId) -> Option<&Counter> {
        self.counters.iter().find(|c| c.id == id)
    }
}
