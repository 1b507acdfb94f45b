//! End-to-end trip planning: request → geocode → route → schedule →
//! annotate → response.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use hos_core::Coordinate;
use hos_schedule::{compute_trip, HosRules, PickupLegPolicy, SegmentRecord, TripLegs, TripSchedule};
use hos_spatial::{polyline, Path};

use crate::annotate::annotate_segments;
use crate::provider::{Geocoder, RetryPolicy, RetryingRouter, RouteLeg, RouteProvider};
use crate::request::{TripRequest, ValidatedRequest};
use crate::{TripError, TripResult};

// ── TripConfig ────────────────────────────────────────────────────────────────

/// Planner settings.  Every field has a default, so a config file need only
/// name what it changes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripConfig {
    pub rules:      HosRules,
    pub pickup_leg: PickupLegPolicy,
    pub retry:      RetryPolicy,
}

// ── TripPlan ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    /// Miles over both legs.
    pub total_distance: f64,
    /// Elapsed trip hours, rests included.
    pub total_duration: f64,
    pub polyline_leg1:  String,
    pub polyline_leg2:  String,
}

/// A planned trip.  Serializes to the response body.
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub route:            RouteSummary,
    pub trip_segments:    Vec<SegmentRecord>,
    /// Cycle hours left after the trip.
    pub available_hours:  f64,
    pub total_trip_hours: f64,
    /// The annotated timeline the records were built from.
    #[serde(skip)]
    pub schedule:         TripSchedule,
}

// ── TripPlanner ───────────────────────────────────────────────────────────────

/// Plans trips against a geocoder and a routing backend.
///
/// Route lookups go through a [`RetryingRouter`] configured from
/// [`TripConfig::retry`].
///
/// # Example
///
/// ```rust,ignore
/// let planner = TripPlanner::new(geocoder, router).with_config(config);
/// let plan = planner.plan(&TripRequest::new("Chicago, IL", "Indianapolis, IN", "Nashville, TN", 10.0))?;
/// println!("{}", serde_json::to_string_pretty(&plan)?);
/// ```
pub struct TripPlanner<G: Geocoder, R: RouteProvider> {
    geocoder: G,
    router:   RetryingRouter<R>,
    config:   TripConfig,
}

impl<G: Geocoder, R: RouteProvider> TripPlanner<G, R> {
    pub fn new(geocoder: G, router: R) -> Self {
        let config = TripConfig::default();
        Self {
            geocoder,
            router: RetryingRouter::new(router, config.retry.clone()),
            config,
        }
    }

    pub fn with_config(mut self, config: TripConfig) -> Self {
        self.router = self.router.with_policy(config.retry.clone());
        self.config = config;
        self
    }

    /// Replace the wait between route retries.
    pub fn with_retry_sleep(mut self, sleep: impl Fn(Duration) + Send + Sync + 'static) -> Self {
        self.router = self.router.with_sleep(sleep);
        self
    }

    pub fn config(&self) -> &TripConfig {
        &self.config
    }

    /// Plan one trip.
    pub fn plan(&self, request: &TripRequest) -> TripResult<TripPlan> {
        let rules = &self.config.rules;
        let cycle_limit_hours = rules.cycle_limit.as_hours();
        let request = request.validate(cycle_limit_hours)?;

        let [current, pickup, dropoff] = self.geocode_all(&request)?;
        let (leg1, leg2) = self.route_legs(current, pickup, dropoff)?;

        let legs = TripLegs { to_pickup: leg1.distance_miles, to_dropoff: leg2.distance_miles };
        let mut schedule = compute_trip(legs, request.hours_used, rules, self.config.pickup_leg)?;

        let path = Path::concat([
            polyline::decode(&leg1.encoded_path)?,
            polyline::decode(&leg2.encoded_path)?,
        ]);
        annotate_segments(&mut schedule.segments, &path)?;

        let total_trip_hours = schedule.total_hours();
        let available_hours =
            cycle_limit_hours - (request.hours_used + schedule.cycle_hours_consumed());

        info!(
            from = %request.current_location,
            pickup = %request.pickup_location,
            to = %request.dropoff_location,
            miles = legs.total(),
            total_trip_hours,
            available_hours,
            truncated = schedule.is_truncated(),
            "trip planned"
        );

        Ok(TripPlan {
            route: RouteSummary {
                total_distance: legs.total(),
                total_duration: total_trip_hours,
                polyline_leg1:  leg1.encoded_path,
                polyline_leg2:  leg2.encoded_path,
            },
            trip_segments: schedule.segments.iter().map(|s| s.to_record()).collect(),
            available_hours,
            total_trip_hours,
            schedule,
        })
    }

    // ── Collaborator calls ────────────────────────────────────────────────────

    /// Geocode current, pickup and dropoff.  With the `parallel` feature the
    /// three lookups run on Rayon.
    fn geocode_all(&self, request: &ValidatedRequest) -> TripResult<[Coordinate; 3]> {
        let names = [
            &request.current_location,
            &request.pickup_location,
            &request.dropoff_location,
        ];

        #[cfg(not(feature = "parallel"))]
        let found = names.map(|name| self.geocoder.geocode(name));

        #[cfg(feature = "parallel")]
        let found = {
            let (a, (b, c)) = rayon::join(
                || self.geocoder.geocode(names[0]),
                || {
                    rayon::join(
                        || self.geocoder.geocode(names[1]),
                        || self.geocoder.geocode(names[2]),
                    )
                },
            );
            [a, b, c]
        };

        let resolve = |name: &String, coord: Option<Coordinate>| {
            coord.ok_or_else(|| {
                warn!(location = %name, "geocoding failed");
                TripError::GeocodingFailure { location: name.clone() }
            })
        };
        let [current, pickup, dropoff] = found;
        Ok([
            resolve(names[0], current)?,
            resolve(names[1], pickup)?,
            resolve(names[2], dropoff)?,
        ])
    }

    /// Route current → pickup and pickup → dropoff.  Sequentially, a failed
    /// first leg returns before the second is requested.
    fn route_legs(
        &self,
        current: Coordinate,
        pickup:  Coordinate,
        dropoff: Coordinate,
    ) -> TripResult<(RouteLeg, RouteLeg)> {
        let to_pickup = |source| TripError::RoutingFailure { leg: "current to pickup", source };
        let to_dropoff = |source| TripError::RoutingFailure { leg: "pickup to dropoff", source };

        #[cfg(not(feature = "parallel"))]
        let legs = {
            let leg1 = self.router.route(current, pickup).map_err(to_pickup)?;
            let leg2 = self.router.route(pickup, dropoff).map_err(to_dropoff)?;
            (leg1, leg2)
        };

        #[cfg(feature = "parallel")]
        let legs = {
            let (leg1, leg2) = rayon::join(
                || self.router.route(current, pickup),
                || self.router.route(pickup, dropoff),
            );
            (leg1.map_err(to_pickup)?, leg2.map_err(to_dropoff)?)
        };

        Ok(legs)
    }
}
