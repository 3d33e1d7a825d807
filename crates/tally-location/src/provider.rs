//! Location provider interface

use async_trait::async_trait;

use crate::permissions::PermissionState;
use crate::types::{Address, Position};
use crate::Result;

/// A platform location service.
///
/// Each call is one-shot and may suspend for as long as the platform needs.
/// Implementations report failures as [`crate::LocationError`] rather than
/// logging and carrying on.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Ask the user for foreground location access.
    async fn request_permission(&self) -> PermissionState;

    async fn current_position(&self) -> Result<Position>;

    async fn reverse_geocode(&self, position: Position) -> Result<Address>;
}
