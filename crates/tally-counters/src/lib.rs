//! Tally Counter Store
//!
//! A single table of named counters tied to where they were recorded.
//! The store is the source of truth; callers re-list after each mutation
//! instead of patching cached copies.

mod counter;
mod error;
mod store;

pub use counter::{Counter, CounterId};
pub use error::CounterError;
pub use store::CounterStore;

pub type Result<T> = std::result::Result<T, CounterError>;
