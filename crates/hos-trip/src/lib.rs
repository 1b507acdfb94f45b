//! `hos-trip` — plans a trip end to end around the schedule engine.
//!
//! # Pipeline
//!
//! ```text
//! TripRequest ─► validate ─► geocode ×3 ─► route ×2 (with retry)
//!             ─► compute_trip ─► decode + concat paths ─► annotate stops
//!             ─► TripPlan (serializable response body)
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`provider`] | `Geocoder`, `RouteProvider`, `RetryPolicy`, `RetryingRouter` |
//! | [`request`]  | `TripRequest`, `ValidatedRequest`                         |
//! | [`annotate`] | `annotate_segments`                                       |
//! | [`plan`]     | `TripPlanner`, `TripConfig`, `TripPlan`                   |
//! | [`error`]    | `TripError` (with `status_code`), `RouteError`            |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Geocoding and routing lookups run concurrently on Rayon. |

pub mod annotate;
pub mod error;
pub mod plan;
pub mod provider;
pub mod request;


pub use annotate::annotate_segments;
pub use error::{RouteError, TripError, TripResult};
pub use plan::{RouteSummary, TripConfig, TripPlan, TripPlanner};
pub use provider::{
    Geocoder, RetryPolicy, RetryingRouter, RouteLeg, RouteProvider, METERS_TO_MILES,
    SECONDS_PER_HOUR,
};
pub use request::{HoursUsed, TripRequest, ValidatedRequest};
