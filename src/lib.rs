pub mod config;
pub mod handlers;
pub mod libraries;
pub mod models;
pub mod services;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use services::CatalogStore;

/// The full HTTP surface over one catalog store. Contract tests build this
/// directly with a pre-seeded store.
pub fn build_router(store: CatalogStore) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/locais", get(handlers::list_points))
        .route("/locais/distancia_locais", get(handlers::all_distances))
        .route("/locais/local_mais_proximo", get(handlers::nearest_point))
        .route("/locais/distancia_local/:id", get(handlers::point_distance))
        .route("/locais/:id", get(handlers::get_point))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}
