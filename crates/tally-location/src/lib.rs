//! Tally Location
//!
//! The device location service is an external collaborator. This crate
//! defines the interface the app consumes:
//! - Permission: asked once, Granted or Denied
//! - Position: one-shot, possibly slow
//! - Reverse geocoding: position to street / city / country code
//!
//! The counter store only ever sees the resulting label string.

mod error;
mod fixed;
mod locate;
mod permissions;
mod provider;
mod types;

pub use error::LocationError;
pub use fixed::FixedLocationProvider;
pub use locate::{locate, Located};
pub use permissions::PermissionState;
pub use provider::LocationProvider;
pub use types::{Address, Position};

pub type Result<T> = std::result::Result<T, LocationError>;
