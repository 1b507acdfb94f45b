//! In-memory collaborators: a fixed city table and a great-circle router.

use std::collections::HashMap;

use hos_core::Coordinate;
use hos_spatial::{polyline, Path};
use hos_trip::{Geocoder, RouteError, RouteLeg, RouteProvider};

/// Typical highway average, for the router's duration estimate.
const ROUTE_SPEED_MPH: f64 = 55.0;

/// Spacing between generated path points.
const POINT_SPACING_MILES: f64 = 10.0;

const CITIES: &[(&str, f64, f64)] = &[
    ("Chicago, IL",       41.8781,  -87.6298),
    ("Indianapolis, IN",  39.7684,  -86.1581),
    ("Nashville, TN",     36.1627,  -86.7816),
    ("Los Angeles, CA",   34.0522, -118.2437),
    ("Phoenix, AZ",       33.4484, -112.0740),
    ("Dallas, TX",        32.7767,  -96.7970),
    ("Atlanta, GA",       33.7490,  -84.3880),
    ("New York, NY",      40.7128,  -74.0060),
    ("Denver, CO",        39.7392, -104.9903),
    ("Seattle, WA",       47.6062, -122.3321),
];

pub struct CityTable(HashMap<String, Coordinate>);

impl CityTable {
    pub fn new() -> Self {
        Self(
            CITIES
                .iter()
                .map(|&(name, lat, lng)| (name.to_ascii_lowercase(), Coordinate::new(lat, lng)))
                .collect(),
        )
    }
}

impl Geocoder for CityTable {
    fn geocode(&self, name: &str) -> Option<Coordinate> {
        self.0.get(&name.trim().to_ascii_lowercase()).copied()
    }
}

/// Routes along the straight lat/lng line between two points, with a point
/// every [`POINT_SPACING_MILES`].
pub struct StraightLineRouter;

impl RouteProvider for StraightLineRouter {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<RouteLeg, RouteError> {
        let steps = (from.distance_miles(to) / POINT_SPACING_MILES).ceil().max(1.0) as usize;
        let path: Path = (0..=steps).map(|i| from.lerp(to, i as f64 / steps as f64)).collect();
        let miles = path.length_miles();
        Ok(RouteLeg {
            distance_miles: miles,
            duration_hours: miles / ROUTE_SPEED_MPH,
            encoded_path:   polyline::encode(&path),
        })
    }
}
