use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::libraries::proximity::{distance_meters, distances_to_all, nearest};
use crate::models::{
    DistanceResponse, GeoPoint, NearestPointResponse, PointDistance, PointPayload,
};
use crate::services::CatalogStore;

/// User coordinates as decimal-degree query params.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CoordsQuery {
    pub lat: f64,
    pub lng: f64,
}

impl CoordsQuery {
    fn origin(self) -> Result<GeoPoint, StatusCode> {
        GeoPoint::try_new(self.lat, self.lng).ok_or(StatusCode::BAD_REQUEST)
    }
}

/// `GET /locais` — the validated catalog in wire shape.
pub async fn list_points(State(store): State<CatalogStore>) -> Json<Vec<PointPayload>> {
    let snapshot = store.snapshot().await;
    debug!("Listing {} collection point(s)", snapshot.points.len());

    Json(snapshot.points.iter().map(PointPayload::from).collect())
}

/// `GET /locais/{id}` — a single collection point.
pub async fn get_point(
    State(store): State<CatalogStore>,
    Path(id): Path<String>,
) -> Result<Json<PointPayload>, StatusCode> {
    let snapshot = store.snapshot().await;

    snapshot
        .points
        .iter()
        .find(|point| point.id == id)
        .map(|point| Json(PointPayload::from(point)))
        .ok_or(StatusCode::NOT_FOUND)
}

/// `GET /locais/distancia_local/{id}?lat=&lng=` — distance from the user to
/// one collection point, in meters.
pub async fn point_distance(
    State(store): State<CatalogStore>,
    Path(id): Path<String>,
    Query(coords): Query<CoordsQuery>,
) -> Result<Json<DistanceResponse>, StatusCode> {
    let origin = coords.origin()?;
    let snapshot = store.snapshot().await;

    let point = snapshot
        .points
        .iter()
        .find(|point| point.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;

    let distancia = distance_meters(origin, point.location);
    debug!("Distance from user to {}: {:.1}m", id, distancia);

    Ok(Json(DistanceResponse { distancia }))
}

/// `GET /locais/local_mais_proximo?lat=&lng=` — the nearest collection point.
/// An empty catalog is "no data yet": 404, not a server error.
pub async fn nearest_point(
    State(store): State<CatalogStore>,
    Query(coords): Query<CoordsQuery>,
) -> Result<Json<NearestPointResponse>, StatusCode> {
    let origin = coords.origin()?;
    let snapshot = store.snapshot().await;

    let result = nearest(origin, &snapshot.points).ok_or(StatusCode::NOT_FOUND)?;
    debug!(
        "Nearest point for ({}, {}) is {} at {:.1}m",
        origin.latitude, origin.longitude, result.point.id, result.distance_meters
    );

    Ok(Json(NearestPointResponse {
        id_local: result.point.id,
        nome_local: result.point.name,
    }))
}

/// `GET /locais/distancia_locais?lat=&lng=` — distances to every point, in
/// catalog order.
pub async fn all_distances(
    State(store): State<CatalogStore>,
    Query(coords): Query<CoordsQuery>,
) -> Result<Json<Vec<PointDistance>>, StatusCode> {
    let origin = coords.origin()?;
    let snapshot = store.snapshot().await;

    let rows = distances_to_all(origin, &snapshot.points)
        .into_iter()
        .map(|result| PointDistance {
            id: result.point.id,
            distancia: result.distance_meters,
        })
        .collect();

    Ok(Json(rows))
}
