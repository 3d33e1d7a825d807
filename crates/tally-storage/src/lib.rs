//! Tally Storage Layer
//!
//! On-device SQLite persistence for counters.
//! Every write runs as a single statement or inside an explicit transaction.

mod database;
mod error;
mod schema;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
