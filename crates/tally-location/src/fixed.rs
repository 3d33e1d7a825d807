//! Fixed location provider
//!
//! Answers every request from preset values. Used on hosts without a
//! location service and to drive the app deterministically in tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::LocationError;
use crate::permissions::PermissionState;
use crate::provider::LocationProvider;
use crate::types::{Address, Position};
use crate::Result;

#[derive(Debug)]
pub struct FixedLocationProvider {
    permission: PermissionState,
    position: Result<Position>,
    address: Result<Address>,
    delay: Option<Duration>,
    permission_requests: AtomicUsize,
}

impl FixedLocationProvider {
    pub fn new(position: Position, address: Address) -> Self {
        Self {
            permission: PermissionState::Granted,
            position: Ok(position),
            address: Ok(address),
            delay: None,
            permission_requests: AtomicUsize::new(0),
        }
    }

    /// A provider whose user refuses location access.
    pub fn denied() -> Self {
        Self {
            permission: PermissionState::Denied,
            position: Err(LocationError::PermissionDenied),
            address: Err(LocationError::PermissionDenied),
            delay: None,
            permission_requests: AtomicUsize::new(0),
        }
    }

    /// Access is granted but no fix can be obtained.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            permission: PermissionState::Granted,
            position: Err(LocationError::Unavailable(reason.clone())),
            address: Err(LocationError::Unavailable(reason)),
            delay: None,
            permission_requests: AtomicUsize::new(0),
        }
    }

    pub fn with_geocode_failure(mut self, reason: impl Into<String>) -> Self {
        self.address = Err(LocationError::Unavailable(reason.into()));
        self
    }

    /// Delay each position fix, like a cold GPS start.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn request_permission(&self) -> PermissionState {
        self.permission_requests.fetch_add(1, Ordering::Relaxed);
        self.permission
    }

    async fn current_position(&self) -> Result<Position> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.position.clone()
    }

    async fn reverse_geocode(&self, _position: Position) -> Result<Address> {
        self.address.clone()
    }
}
