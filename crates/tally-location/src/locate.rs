//! One-shot location lookup

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use crate::error::LocationError;
use crate::provider::LocationProvider;
use crate::types::{Address, Position};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Located {
    pub position: Position,
    pub address: Address,
}

impl Located {
    pub fn label(&self) -> Option<String> {
        self.address.label()
    }
}

/// Ask for permission, take one position fix and reverse-geocode it.
///
/// With a `timeout`, the fix and the geocode lookup are each bounded by it;
/// without one the wait is whatever the platform allows.
pub async fn locate<P>(provider: &P, timeout: Option<Duration>) -> Result<Located>
where
    P: LocationProvider + ?Sized,
{
    let permission = provider.request_permission().await;
    if !permission.is_granted() {
        tracing::info!(?permission, "Location permission not granted");
        return Err(LocationError::PermissionDenied);
    }

    let position = bounded(provider.current_position(), timeout, "position fix").await?;
    let address = bounded(provider.reverse_geocode(position), timeout, "reverse geocode").await?;

    tracing::info!(
        latitude = position.latitude,
        longitude = position.longitude,
        label = ?address.label(),
        "Resolved current location"
    );

    Ok(Located { position, address })
}

async fn bounded<F, T>(fut: F, timeout: Option<Duration>, what: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
            tracing::warn!(timeout_ms = limit.as_millis() as u64, "{} timed out", what);
            LocationError::Unavailable(format!("{what} timed out after {limit:?}"))
        })?,
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedLocationProvider;

    fn main_st() -> FixedLocationProvider {
        FixedLocationProvider::new(
            Position::new(40.7128, -74.006).unwrap(),
            Address::new("Main St", "New York").with_country_code("US"),
        )
    }

    #[tokio::test]
    async fn test_locate_resolves_label() {
        let provider = main_st();
        let located = locate(&provider, None).await.unwrap();

        assert_eq!(located.label().as_deref(), Some("Main St"));
        assert_eq!(located.address.country_code.as_deref(), Some("US"));
        assert_eq!(provider.permission_requests(), 1);
    }

    #[tokio::test]
    async fn test_locate_denied() {
        let provider = FixedLocationProvider::denied();
        assert_eq!(
            locate(&provider, None).await,
            Err(LocationError::PermissionDenied)
        );
    }

    #[tokio::test]
    async fn test_locate_unavailable() {
        let provider = FixedLocationProvider::unavailable("no GPS");
        assert_eq!(
            locate(&provider, None).await,
            Err(LocationError::Unavailable("no GPS".to_string()))
        );
    }

    #[tokio::test]
    async fn test_locate_geocode_failure() {
        let provider = main_st().with_geocode_failure("geocoder offline");
        assert!(matches!(
            locate(&provider, None).await,
            Err(LocationError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_locate_times_out() {
        let provider = main_st().with_delay(Duration::from_millis(500));
        let result = locate(&provider, Some(Duration::from_millis(10))).await;
        assert!(matches!(result, Err(LocationError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_locate_through_trait_object() {
        let provider: Box<dyn LocationProvider> = Box::new(main_st());
        let located = locate(provider.as_ref(), Some(Duration::from_secs(5)))
            .await
            .unwrap();
        assert_eq!(located.position.latitude, 40.7128);
    }
}
