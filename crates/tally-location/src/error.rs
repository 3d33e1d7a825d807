//! Location error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}
