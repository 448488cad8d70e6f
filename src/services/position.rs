use std::future::Future;

use crate::models::GeoPoint;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PositionError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Source of the user's current position. Implementations wrap the platform
/// location API; asking for a fix performs the permission check.
pub trait PositionSource {
    fn current_position(&self) -> impl Future<Output = Result<GeoPoint, PositionError>> + Send;
}

/// A fixed position, for tests and for clients that already hold a fix.
#[derive(Debug, Clone)]
pub struct StaticPosition(pub GeoPoint);

impl PositionSource for StaticPosition {
    async fn current_position(&self) -> Result<GeoPoint, PositionError> {
        Ok(self.0)
    }
}
