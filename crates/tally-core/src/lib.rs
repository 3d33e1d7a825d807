//! Tally Core
//!
//! Coordination layer between the presentation and the counter store.
//! The store owns counter state; the presentation reads an [`AppState`]
//! snapshot that is re-listed from the store after every mutation.

mod app;
mod config;
mod error;
mod state;

pub use app::Tally;
pub use config::Config;
pub use error::CoreError;
pub use state::{AppState, LocationStatus};

pub use tally_counters::{Counter, CounterError, CounterId, CounterStore};
pub use tally_location::{
    Address, FixedLocationProvider, Located, LocationError, LocationProvider, PermissionState,
    Position,
};
pub use tally_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the default `info`.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(e) = fmt().with_env_filter(filter).with_target(true).try_init() {
        // a host may already have installed one; it receives this event
        tracing::debug!(error = %e, "Logging already initialized");
    }
}
