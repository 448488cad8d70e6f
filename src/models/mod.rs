pub mod collection_point;
pub mod location;
pub mod responses;

// Re-export commonly used types
pub use collection_point::{CollectionPoint, RawPointRecord};
pub use location::GeoPoint;
pub use responses::{DistanceResponse, NearestPointResponse, PointDistance, PointPayload};
