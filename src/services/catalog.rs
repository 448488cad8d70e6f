use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::models::{CollectionPoint, RawPointRecord};
use crate::services::refresh::CandidateSource;

/// The validated catalog as of one refresh. Replaced wholesale, never mutated
/// incrementally.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub points: Vec<CollectionPoint>,
    pub fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            fetched_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    pub fn new(points: Vec<CollectionPoint>) -> Self {
        Self {
            points,
            fetched_at: Utc::now(),
        }
    }

    /// Whether the snapshot is older than the staleness window.
    pub fn is_stale(&self, max_age: Duration) -> bool {
        Utc::now() - self.fetched_at > max_age
    }
}

/// Shared, read-mostly holder for the current snapshot.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<RwLock<CatalogSnapshot>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(CatalogSnapshot::empty())),
        }
    }

    pub fn with_points(points: Vec<CollectionPoint>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CatalogSnapshot::new(points))),
        }
    }

    pub async fn replace(&self, points: Vec<CollectionPoint>) {
        let mut snapshot = self.inner.write().await;
        *snapshot = CatalogSnapshot::new(points);
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.inner.read().await.clone()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the upstream catalog (the document database's REST facade).
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    url: String,
}

impl CatalogClient {
    pub fn new(url: String, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("proximity-service/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self { client, url })
    }

    /// Fetch the raw catalog and keep only records that pass validation.
    /// Malformed records are a filtering decision, not an error.
    pub async fn fetch_points(&self) -> Result<Vec<CollectionPoint>> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            let mut error_msg = format!("Catalog request failed: {}", e);
            let mut source = e.source();
            while let Some(err) = source {
                error_msg.push_str(&format!("\n  Caused by: {}", err));
                source = err.source();
            }
            warn!("{}", error_msg);
            anyhow!(error_msg)
        })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("Catalog returned HTTP {}", status);
            return Err(anyhow!("Catalog returned error: {}", status));
        }

        let records: Vec<RawPointRecord> = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse catalog response: {}", e))?;

        let total = records.len();
        let points: Vec<CollectionPoint> = records
            .into_iter()
            .filter_map(CollectionPoint::from_raw)
            .collect();

        let dropped = total - points.len();
        if dropped > 0 {
            debug!("Dropped {} malformed catalog record(s)", dropped);
        }
        info!("Catalog fetch returned {} valid point(s)", points.len());

        Ok(points)
    }
}

impl CandidateSource for CatalogClient {
    async fn fetch_candidates(&self) -> Result<Vec<CollectionPoint>> {
        self.fetch_points().await
    }
}

/// Periodically re-fetch the catalog into the store. A failed tick keeps the
/// previous snapshot; the next tick is the retry.
pub async fn run_catalog_refresh(
    client: CatalogClient,
    store: CatalogStore,
    interval: std::time::Duration,
    mut shutdown: tokio::sync::watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = shutdown.changed() => {
                debug!("Catalog refresh loop stopped");
                return;
            }
        }

        match client.fetch_points().await {
            Ok(points) => store.replace(points).await,
            Err(e) => warn!("Catalog refresh failed, keeping previous snapshot: {}", e),
        }
    }
}
