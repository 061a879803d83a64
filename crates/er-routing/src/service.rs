//! The routing-service seam and two local implementations.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use er_core::GeoPoint;

use crate::response::{RawStep, RouteResponse, RouteStep};
use crate::{RoutingError, RoutingResult};

// ── RoutingService trait ──────────────────────────────────────────────────────

/// External route provider.
///
/// A call is blocking.  An empty `routes` list is a valid answer ("no route");
/// `Err` is reserved for calls that failed outright.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so annotation can fan out across
/// Rayon workers with the `parallel` feature of `er-dispatch`.
pub trait RoutingService: Send + Sync {
    fn get_route(&self, origin: GeoPoint, destination: GeoPoint) -> RoutingResult<RouteResponse>;
}

impl<S: RoutingService + ?Sized> RoutingService for Arc<S> {
    fn get_route(&self, origin: GeoPoint, destination: GeoPoint) -> RoutingResult<RouteResponse> {
        (**self).get_route(origin, destination)
    }
}

impl<S: RoutingService + ?Sized> RoutingService for Box<S> {
    fn get_route(&self, origin: GeoPoint, destination: GeoPoint) -> RoutingResult<RouteResponse> {
        (**self).get_route(origin, destination)
    }
}

// ── TimeoutRouting ────────────────────────────────────────────────────────────

/// Bounds every call of an inner service to `timeout`.
///
/// The inner call runs on a short-lived worker thread.  On expiry the caller
/// gets [`RoutingError::Timeout`] immediately; the worker finishes in the
/// background and its late answer is dropped.
///
/// The worker is never cancelled, so the inner service must enforce its own
/// deadline (as `OsrmClient` does through its HTTP client timeout).  An
/// inner call that never returns leaks one thread per request.
pub struct TimeoutRouting<S> {
    inner:   Arc<S>,
    timeout: Duration,
}

impl<S: RoutingService + 'static> TimeoutRouting<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner: Arc::new(inner), timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<S: RoutingService + 'static> RoutingService for TimeoutRouting<S> {
    fn get_route(&self, origin: GeoPoint, destination: GeoPoint) -> RoutingResult<RouteResponse> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        thread::Builder::new()
            .name("er-route".into())
            .spawn(move || {
                // Receiver may already be gone after a timeout.
                let _ = tx.send(inner.get_route(origin, destination));
            })
            .map_err(|e| RoutingError::Transport(format!("spawn routing worker: {e}")))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "routing call timed out");
                Err(RoutingError::Timeout(self.timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(RoutingError::Transport(
                "routing worker exited without an answer".into(),
            )),
        }
    }
}

// ── StraightLineRouting ───────────────────────────────────────────────────────

/// Offline stand-in for a road router: one step along the great circle at a
/// constant speed.
pub struct StraightLineRouting {
    pub speed_kmh: f64,
}

impl Default for StraightLineRouting {
    fn default() -> Self {
        Self { speed_kmh: 40.0 }
    }
}

impl RoutingService for StraightLineRouting {
    fn get_route(&self, origin: GeoPoint, destination: GeoPoint) -> RoutingResult<RouteResponse> {
        let km = origin.distance_km(destination);
        let step = RouteStep::new(
            format!("Proceed directly to {destination}"),
            km * 1_000.0,
            km / self.speed_kmh * 3_600.0,
        );
        Ok(RouteResponse::single_leg(vec![RawStep::from(step)]))
    }
}
