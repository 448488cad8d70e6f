use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use proximity_service::build_router;
use proximity_service::config::Config;
use proximity_service::services::catalog::{run_catalog_refresh, CatalogClient};
use proximity_service::services::CatalogStore;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "proximity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = Config::from_env().expect("Failed to load configuration");

    info!("Starting proximity service");

    let store = CatalogStore::new();
    let client = CatalogClient::new(config.catalog_url.clone(), config.fetch_timeout_secs)
        .expect("Failed to build catalog client");

    // Background catalog refresh; the first tick fires immediately, so the
    // store fills as soon as the upstream answers.
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(run_catalog_refresh(
        client,
        store.clone(),
        Duration::from_secs(config.refresh_interval_secs),
        shutdown_rx,
    ));

    let app = build_router(store);

    let addr: std::net::SocketAddr = format!("0.0.0.0:{}", config.port).parse().unwrap();
    info!("HTTP server listening on {}", addr);
    info!(
        "Serving /locais catalog, refreshing every {}s from {}",
        config.refresh_interval_secs, config.catalog_url
    );

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .await
        .expect("Failed to start HTTP server");

    let _ = shutdown_tx.send(true);
    info!("Shutting down...");
}
