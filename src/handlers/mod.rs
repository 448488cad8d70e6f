pub mod locais;

use axum::{response::IntoResponse, Json};

pub use locais::{all_distances, get_point, list_points, nearest_point, point_distance};

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "proximity-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
