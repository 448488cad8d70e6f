use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::libraries::proximity::{nearest, ProximityResult};
use crate::models::{CollectionPoint, GeoPoint};
use crate::services::position::{PositionError, PositionSource};

/// User-visible refresh failures. Exactly the two messages the app shows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RefreshError {
    #[error("Permissão de localização negada")]
    PermissionDenied,

    #[error("Erro ao carregar pontos de coleta")]
    FetchFailed,
}

/// Source of the candidate set. The catalog client implements this over HTTP;
/// tests stub it.
pub trait CandidateSource {
    fn fetch_candidates(&self) -> impl Future<Output = Result<Vec<CollectionPoint>>> + Send;
}

/// What one successful refresh produced. Replaced wholesale per pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximitySnapshot {
    pub origin: GeoPoint,
    pub points: Vec<CollectionPoint>,
    pub nearest: Option<ProximityResult>,
    pub fetched_at: DateTime<Utc>,
}

/// Observable state of one consumer's refresh cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MonitorState {
    #[default]
    Idle,
    Loading,
    Ready(ProximitySnapshot),
    Error(RefreshError),
}

impl MonitorState {
    pub fn is_ready(&self) -> bool {
        matches!(self, MonitorState::Ready(_))
    }
}

/// Handle to a periodic proximity refresh task.
///
/// Each pass asks the position source for a fix (which performs the permission
/// check), fetches the candidate set, and publishes a fresh snapshot. Failures
/// publish an error state and wait: the next attempt is either the scheduled
/// tick or an explicit `retry()`. Dropping the handle (or calling `shutdown()`)
/// stops the task; a pass in flight at that moment is discarded, never
/// published.
pub struct ProximityMonitor {
    state: watch::Receiver<MonitorState>,
    retry_tx: mpsc::Sender<()>,
    shutdown_tx: watch::Sender<bool>,
}

impl ProximityMonitor {
    pub fn spawn<P, C>(positions: P, candidates: C, interval: Duration) -> Self
    where
        P: PositionSource + Send + Sync + 'static,
        C: CandidateSource + Send + Sync + 'static,
    {
        let (state_tx, state_rx) = watch::channel(MonitorState::Idle);
        let (retry_tx, mut retry_rx) = mpsc::channel::<()>(1);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        tokio::spawn(async move {
            loop {
                let _ = state_tx.send(MonitorState::Loading);

                let outcome = tokio::select! {
                    outcome = refresh_pass(&positions, &candidates) => outcome,
                    _ = shutdown_rx.changed() => break,
                };

                match outcome {
                    Ok(snapshot) => {
                        debug!(
                            points = snapshot.points.len(),
                            "Refresh pass complete"
                        );
                        let _ = state_tx.send(MonitorState::Ready(snapshot));
                    }
                    Err(e) => {
                        warn!("Refresh pass failed: {}", e);
                        let _ = state_tx.send(MonitorState::Error(e));
                    }
                }

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    Some(()) = retry_rx.recv() => {}
                    _ = shutdown_rx.changed() => break,
                }
            }
            debug!("Proximity monitor stopped");
        });

        Self {
            state: state_rx,
            retry_tx,
            shutdown_tx,
        }
    }

    /// Current state, cloned out of the channel.
    pub fn state(&self) -> MonitorState {
        self.state.borrow().clone()
    }

    /// A receiver for observing state transitions.
    pub fn subscribe(&self) -> watch::Receiver<MonitorState> {
        self.state.clone()
    }

    /// Flat, immediate re-attempt. No backoff; a retry already queued is
    /// enough.
    pub fn retry(&self) {
        let _ = self.retry_tx.try_send(());
    }

    /// Stop the task. In-flight work is discarded.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Drop for ProximityMonitor {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

async fn refresh_pass<P, C>(positions: &P, candidates: &C) -> Result<ProximitySnapshot, RefreshError>
where
    P: PositionSource,
    C: CandidateSource,
{
    let origin = positions.current_position().await.map_err(|e| match e {
        PositionError::PermissionDenied => RefreshError::PermissionDenied,
        PositionError::Unavailable(_) => RefreshError::FetchFailed,
    })?;

    let points = candidates
        .fetch_candidates()
        .await
        .map_err(|_| RefreshError::FetchFailed)?;

    let nearest = nearest(origin, &points);

    Ok(ProximitySnapshot {
        origin,
        points,
        nearest,
        fetched_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::position::StaticPosition;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    const TEST_INTERVAL: Duration = Duration::from_secs(60);

    fn point(id: &str, lat: f64, lng: f64) -> CollectionPoint {
        CollectionPoint {
            id: id.to_string(),
            name: format!("Ponto {}", id),
            address: String::new(),
            location: GeoPoint::new(lat, lng),
            image_url: None,
            website: None,
            phone: None,
        }
    }

    struct StubCatalog {
        points: Vec<CollectionPoint>,
        fail: Arc<AtomicBool>,
    }

    impl CandidateSource for StubCatalog {
        async fn fetch_candidates(&self) -> Result<Vec<CollectionPoint>> {
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("catalog unavailable");
            }
            Ok(self.points.clone())
        }
    }

    struct DeniedPosition;

    impl PositionSource for DeniedPosition {
        async fn current_position(&self) -> Result<GeoPoint, PositionError> {
            Err(PositionError::PermissionDenied)
        }
    }

    async fn wait_ready(rx: &mut watch::Receiver<MonitorState>) -> ProximitySnapshot {
        let state = tokio::time::timeout(
            Duration::from_secs(5),
            rx.wait_for(|s| matches!(s, MonitorState::Ready(_))),
        )
        .await
        .expect("timed out waiting for Ready")
        .expect("monitor task gone");

        match &*state {
            MonitorState::Ready(snapshot) => snapshot.clone(),
            _ => unreachable!(),
        }
    }

    async fn wait_error(rx: &mut watch::Receiver<MonitorState>) -> RefreshError {
        let state = tokio::time::timeout(
            Duration::from_secs(5),
            rx.wait_for(|s| matches!(s, MonitorState::Error(_))),
        )
        .await
        .expect("timed out waiting for Error")
        .expect("monitor task gone");

        match &*state {
            MonitorState::Error(e) => e.clone(),
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_successful_pass_reaches_ready() {
        let origin = GeoPoint::new(-23.5505, -46.6333);
        let catalog = StubCatalog {
            points: vec![point("A", -23.55, -46.63), point("B", -23.6, -46.7)],
            fail: Arc::new(AtomicBool::new(false)),
        };

        let monitor = ProximityMonitor::spawn(StaticPosition(origin), catalog, TEST_INTERVAL);
        let mut rx = monitor.subscribe();

        let snapshot = wait_ready(&mut rx).await;
        assert_eq!(snapshot.points.len(), 2);
        assert_eq!(snapshot.nearest.as_ref().unwrap().point.id, "A");
        assert_eq!(snapshot.origin, origin);
        assert!(monitor.state().is_ready());
    }

    #[tokio::test]
    async fn test_empty_catalog_is_ready_without_nearest() {
        let origin = GeoPoint::new(-23.5505, -46.6333);
        let catalog = StubCatalog {
            points: vec![],
            fail: Arc::new(AtomicBool::new(false)),
        };

        let monitor = ProximityMonitor::spawn(StaticPosition(origin), catalog, TEST_INTERVAL);
        let mut rx = monitor.subscribe();

        let snapshot = wait_ready(&mut rx).await;
        assert!(snapshot.points.is_empty());
        assert!(snapshot.nearest.is_none());
    }

    #[tokio::test]
    async fn test_permission_denied_surfaces_message() {
        let catalog = StubCatalog {
            points: vec![],
            fail: Arc::new(AtomicBool::new(false)),
        };

        let monitor = ProximityMonitor::spawn(DeniedPosition, catalog, TEST_INTERVAL);
        let mut rx = monitor.subscribe();

        let error = wait_error(&mut rx).await;
        assert_eq!(error, RefreshError::PermissionDenied);
        assert_eq!(error.to_string(), "Permissão de localização negada");
    }

    #[tokio::test]
    async fn test_retry_after_fetch_failure() {
        let origin = GeoPoint::new(-23.5505, -46.6333);
        let fail = Arc::new(AtomicBool::new(true));
        let catalog = StubCatalog {
            points: vec![point("A", -23.55, -46.63)],
            fail: fail.clone(),
        };

        let monitor = ProximityMonitor::spawn(StaticPosition(origin), catalog, TEST_INTERVAL);
        let mut rx = monitor.subscribe();

        let error = wait_error(&mut rx).await;
        assert_eq!(error, RefreshError::FetchFailed);
        assert_eq!(error.to_string(), "Erro ao carregar pontos de coleta");

        // Explicit retry with the upstream recovered.
        fail.store(false, Ordering::SeqCst);
        monitor.retry();

        let snapshot = wait_ready(&mut rx).await;
        assert_eq!(snapshot.nearest.as_ref().unwrap().point.id, "A");
    }

    #[tokio::test]
    async fn test_shutdown_stops_publication() {
        let origin = GeoPoint::new(-23.5505, -46.6333);
        let catalog = StubCatalog {
            points: vec![],
            fail: Arc::new(AtomicBool::new(false)),
        };

        let monitor = ProximityMonitor::spawn(StaticPosition(origin), catalog, TEST_INTERVAL);
        let mut rx = monitor.subscribe();
        wait_ready(&mut rx).await;

        monitor.shutdown();

        // The task drops its sender on exit; the channel closing is how
        // consumers learn nothing further will arrive.
        let closed = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
        .await;
        assert!(closed.is_ok(), "monitor task did not stop");
    }
}
