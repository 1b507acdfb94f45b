//! Trip request body and its validation.

use serde::{Deserialize, Serialize};

use crate::{TripError, TripResult};

/// Raw request fields, as received.  Every field is optional so that a
/// missing value is reported by [`TripRequest::validate`] instead of
/// failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripRequest {
    pub current_location: Option<String>,
    pub pickup_location:  Option<String>,
    pub dropoff_location: Option<String>,
    pub hours_used:       Option<HoursUsed>,
}

/// Clients send hours either as a JSON number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HoursUsed {
    Number(f64),
    Text(String),
}

impl HoursUsed {
    fn parse(&self) -> Option<f64> {
        match self {
            HoursUsed::Number(h) => Some(*h),
            HoursUsed::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<f64> for HoursUsed {
    fn from(h: f64) -> Self {
        HoursUsed::Number(h)
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub current_location: String,
    pub pickup_location:  String,
    pub dropoff_location: String,
    pub hours_used:       f64,
}

impl TripRequest {
    pub fn new(
        current: impl Into<String>,
        pickup: impl Into<String>,
        dropoff: impl Into<String>,
        hours_used: f64,
    ) -> Self {
        Self {
            current_location: Some(current.into()),
            pickup_location:  Some(pickup.into()),
            dropoff_location: Some(dropoff.into()),
            hours_used:       Some(hours_used.into()),
        }
    }

    /// Check that all three locations are present and non-blank and that
    /// `hours_used` is a finite number in `[0, cycle_limit_hours)`.
    pub fn validate(&self, cycle_limit_hours: f64) -> TripResult<ValidatedRequest> {
        let location = |field: &Option<String>| -> TripResult<String> {
            match field.as_deref().map(str::trim) {
                Some(s) if !s.is_empty() => Ok(s.to_owned()),
                _ => Err(TripError::InvalidInput("all locations are required".to_owned())),
            }
        };
        let current_location = location(&self.current_location)?;
        let pickup_location = location(&self.pickup_location)?;
        let dropoff_location = location(&self.dropoff_location)?;

        let hours_used = self
            .hours_used
            .as_ref()
            .and_then(HoursUsed::parse)
            .filter(|h| h.is_finite())
            .ok_or_else(|| TripError::InvalidInput("invalid hours_used value".to_owned()))?;
        if hours_used < 0.0 {
            return Err(TripError::InvalidInput(format!(
                "hours used must be between 0 and {cycle_limit_hours}"
            )));
        }
        if hours_used >= cycle_limit_hours {
            return Err(TripError::InvalidInput(format!(
                "no driving hours available ({hours_used} of {cycle_limit_hours} used)"
            )));
        }

        Ok(ValidatedRequest { current_location, pickup_location, dropoff_location, hours_used })
    }
}
