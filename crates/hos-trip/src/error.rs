use thiserror::Error;

use hos_schedule::ScheduleError;
use hos_spatial::PathError;

/// A failed routing lookup, as reported by a [`RouteProvider`].
///
/// [`RouteProvider`]: crate::RouteProvider
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("routing request timed out")]
    Timeout,

    #[error("could not reach routing service: {0}")]
    Connection(String),

    #[error("routing service returned HTTP {status}")]
    Http { status: u16 },

    #[error("unexpected routing failure: {0}")]
    Unexpected(String),
}

impl RouteError {
    /// Transient failures worth another attempt: timeouts, connection
    /// failures and gateway errors (502, 503, 504).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RouteError::Timeout
                | RouteError::Connection(_)
                | RouteError::Http { status: 502..=504 }
        )
    }
}

#[derive(Debug, Error)]
pub enum TripError {
    #[error("invalid request: {0}")]
    InvalidInput(String),

    #[error("could not geocode {location:?}")]
    GeocodingFailure { location: String },

    #[error("routing failed for leg {leg}: {source}")]
    RoutingFailure {
        leg:    &'static str,
        source: RouteError,
    },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Path(#[from] PathError),
}

impl TripError {
    /// HTTP status an endpoint should answer with.
    ///
    /// | Error                                               | Status |
    /// |-----------------------------------------------------|--------|
    /// | bad request, unusable hours, bad rules, geocoding   | 400    |
    /// | routing                                             | 503    |
    /// | malformed route geometry, engine stall              | 500    |
    pub fn status_code(&self) -> u16 {
        match self {
            TripError::InvalidInput(_) | TripError::GeocodingFailure { .. } => 400,
            TripError::RoutingFailure { .. } => 503,
            TripError::Schedule(e) => match e {
                ScheduleError::InvalidInput(_)
                | ScheduleError::NoCycleHoursAvailable { .. }
                | ScheduleError::InvalidRules(_) => 400,
                ScheduleError::ComputationStall { .. } => 500,
            },
            TripError::Path(_) => 500,
        }
    }
}

pub type TripResult<T> = Result<T, TripError>;
