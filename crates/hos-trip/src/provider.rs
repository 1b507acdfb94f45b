//! Collaborator traits for geocoding and routing, and the retry decorator.
//!
//! # Pluggability
//!
//! [`TripPlanner`](crate::TripPlanner) talks to the outside world only
//! through [`Geocoder`] and [`RouteProvider`], so a web service, a local
//! routing engine or an in-memory table can be swapped in without touching
//! the planner.  Both traits are `Send + Sync` so the `parallel` feature can
//! share them across Rayon workers.
//!
//! # Units
//!
//! Routing backends usually report metres and seconds.  [`RouteLeg`] stores
//! miles and hours; [`RouteLeg::from_metric`] converts.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use hos_core::Coordinate;

use crate::RouteError;

pub const METERS_TO_MILES: f64 = 0.000621371;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

// ── Geocoder ──────────────────────────────────────────────────────────────────

/// Resolves a free-form place name to a coordinate.
///
/// A single attempt; any failure (unknown name, service down) is `None`.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, name: &str) -> Option<Coordinate>;
}

// ── RouteProvider ─────────────────────────────────────────────────────────────

/// One routed leg between two coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    pub distance_miles: f64,
    pub duration_hours: f64,
    /// Route geometry in encoded-polyline form (precision 5).
    pub encoded_path:   String,
}

impl RouteLeg {
    /// Build a leg from a backend's metre / second totals.
    pub fn from_metric(distance_m: f64, duration_s: f64, encoded_path: impl Into<String>) -> Self {
        Self {
            distance_miles: distance_m * METERS_TO_MILES,
            duration_hours: duration_s / SECONDS_PER_HOUR,
            encoded_path:   encoded_path.into(),
        }
    }
}

/// Pluggable driving-route lookup.
pub trait RouteProvider: Send + Sync {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<RouteLeg, RouteError>;
}

// ── RetryPolicy ───────────────────────────────────────────────────────────────

/// Retry schedule for transient routing failures.
///
/// Attempt `n` (0-based) that fails with a retryable error waits
/// `initial_backoff_ms * 2^n` before the next one, up to `max_retries`
/// extra attempts.  Defaults: 2 retries, waits of 2 s then 4 s.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_retries:        u32,
    pub initial_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 2, initial_backoff_ms: 2_000 }
    }
}

impl RetryPolicy {
    /// No retries at all.
    pub fn none() -> Self {
        Self { max_retries: 0, ..Self::default() }
    }

    /// Wait before retry number `attempt + 1`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(self.initial_backoff_ms.saturating_mul(factor))
    }
}

// ── RetryingRouter ────────────────────────────────────────────────────────────

type SleepFn = Box<dyn Fn(Duration) + Send + Sync>;

/// [`RouteProvider`] decorator that retries transient failures.
///
/// Non-retryable errors (other HTTP statuses, unexpected failures) are
/// returned at once.  When retries run out the last error is returned.
pub struct RetryingRouter<P: RouteProvider> {
    inner:  P,
    policy: RetryPolicy,
    sleep:  SleepFn,
}

impl<P: RouteProvider> RetryingRouter<P> {
    /// Wrap `inner`, sleeping the current thread between attempts.
    pub fn new(inner: P, policy: RetryPolicy) -> Self {
        Self { inner, policy, sleep: Box::new(std::thread::sleep) }
    }

    /// Replace the sleep function, e.g. with a recorder in tests.
    pub fn with_sleep(mut self, sleep: impl Fn(Duration) + Send + Sync + 'static) -> Self {
        self.sleep = Box::new(sleep);
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: RouteProvider> RouteProvider for RetryingRouter<P> {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<RouteLeg, RouteError> {
        let mut attempt = 0;
        loop {
            match self.inner.route(from, to) {
                Ok(leg) => {
                    if attempt > 0 {
                        info!(attempts = attempt + 1, "route lookup recovered");
                    }
                    return Ok(leg);
                }
                Err(err) if err.is_retryable() && attempt < self.policy.max_retries => {
                    let wait = self.policy.backoff(attempt);
                    warn!(
                        attempt = attempt + 1,
                        error = %err,
                        wait_ms = wait.as_millis() as u64,
                        "route lookup failed, retrying"
                    );
                    (self.sleep)(wait);
                    attempt += 1;
                }
                Err(err) => {
                    warn!(attempts = attempt + 1, error = %err, %from, %to, "route lookup failed");
                    return Err(err);
                }
            }
        }
    }
}
