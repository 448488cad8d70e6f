pub mod catalog;
pub mod position;
pub mod refresh;

pub use catalog::{CatalogClient, CatalogSnapshot, CatalogStore};
pub use refresh::{MonitorState, ProximityMonitor, ProximitySnapshot, RefreshError};
