//! Regulatory limits and trip policy.
//!
//! # Defaults
//!
//! [`HosRules::default`] is the US property-carrying 70-hour / 8-day rule set:
//!
//! | Limit                  | Value     |
//! |------------------------|-----------|
//! | Average speed          | 60 mph    |
//! | Break after driving    | 8 h       |
//! | Break length           | 30 min    |
//! | Daily driving          | 11 h      |
//! | Duty window            | 14 h      |
//! | Cycle                  | 70 h      |
//! | Sleeper rest           | 10 h      |
//! | Fuel stop              | 30 min every 1000 mi |
//! | Pickup / dropoff       | 1 h each  |
//!
//! All durations are whole [`Minutes`]; only speed and fuel interval are
//! floating point.

use serde::{Deserialize, Serialize};

use hos_core::Minutes;

use crate::{ScheduleError, ScheduleResult};

// ── HosRules ──────────────────────────────────────────────────────────────────

/// Hours-of-Service limits applied by the segmentation engine.
///
/// Typically left at its default, or loaded from a JSON/TOML config file
/// where any omitted field keeps its default value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HosRules {
    /// Constant cruising speed used to turn distance into driving time.
    pub avg_speed_mph: f64,

    /// Cumulative driving allowed before a break is required.
    pub break_after_driving: Minutes,
    pub break_duration: Minutes,

    /// Driving allowed between sleeper rests.
    pub max_daily_driving: Minutes,

    /// On-duty span allowed between sleeper rests.  Advances during driving,
    /// on-duty work and breaks; not during sleeper rest.
    pub duty_window: Minutes,

    /// Rolling on-duty budget across the work cycle.
    pub cycle_limit: Minutes,

    pub rest_duration: Minutes,

    pub fuel_interval_miles: f64,
    pub fuel_stop_duration: Minutes,

    pub pickup_duration: Minutes,
    pub dropoff_duration: Minutes,
}

impl Default for HosRules {
    fn default() -> Self {
        Self {
            avg_speed_mph:       60.0,
            break_after_driving: Minutes::hours(8),
            break_duration:      Minutes(30),
            max_daily_driving:   Minutes::hours(11),
            duty_window:         Minutes::hours(14),
            cycle_limit:         Minutes::hours(70),
            rest_duration:       Minutes::hours(10),
            fuel_interval_miles: 1000.0,
            fuel_stop_duration:  Minutes(30),
            pickup_duration:     Minutes::hours(1),
            dropoff_duration:    Minutes::hours(1),
        }
    }
}

impl HosRules {
    /// Reject rule sets under which the engine could never make progress.
    pub fn validate(&self) -> ScheduleResult<()> {
        if !(self.avg_speed_mph.is_finite() && self.avg_speed_mph > 0.0) {
            return Err(ScheduleError::InvalidRules(format!(
                "avg_speed_mph must be positive, got {}",
                self.avg_speed_mph
            )));
        }
        if !(self.fuel_interval_miles.is_finite() && self.fuel_interval_miles > 0.0) {
            return Err(ScheduleError::InvalidRules(format!(
                "fuel_interval_miles must be positive, got {}",
                self.fuel_interval_miles
            )));
        }
        let positive = [
            ("break_after_driving", self.break_after_driving),
            ("max_daily_driving", self.max_daily_driving),
            ("duty_window", self.duty_window),
            ("cycle_limit", self.cycle_limit),
        ];
        for (name, value) in positive {
            if value.is_zero() {
                return Err(ScheduleError::InvalidRules(format!("{name} must be non-zero")));
            }
        }
        Ok(())
    }

    /// Driving time needed to cover `miles`, rounded up to the next whole
    /// minute so the destination is never reported early.
    ///
    /// Values within 1e-6 min of a whole minute snap to it, so 300 mi at
    /// 60 mph is exactly 300 min rather than 301.  Any positive distance
    /// takes at least one minute.
    pub fn minutes_for_miles(&self, miles: f64) -> Minutes {
        if miles.is_nan() || miles <= 0.0 {
            return Minutes::ZERO;
        }
        let m = miles * Minutes::PER_HOUR as f64 / self.avg_speed_mph;
        let whole = m.round();
        let m = if (m - whole).abs() < 1e-6 { whole } else { m.ceil() };
        Minutes((m.min(u32::MAX as f64) as u32).max(1))
    }

    /// Distance covered in `minutes` of driving.
    #[inline]
    pub fn miles_for(&self, minutes: Minutes) -> f64 {
        minutes.as_hours() * self.avg_speed_mph
    }

    /// Cycle time left given `hours_used` already spent in the cycle.
    ///
    /// Fails with [`ScheduleError::NoCycleHoursAvailable`] only when
    /// `hours_used` reaches the cycle limit.  Any shortfall under the limit
    /// leaves at least one minute, so 69.995 h is accepted.
    pub fn available_cycle(&self, hours_used: f64) -> ScheduleResult<Minutes> {
        if hours_used.is_nan() || hours_used >= self.cycle_limit.as_hours() {
            return Err(ScheduleError::NoCycleHoursAvailable { hours_used });
        }
        let used = Minutes::from_hours_f64(hours_used);
        Ok(self.cycle_limit.saturating_sub(used).max(Minutes(1)))
    }
}

// ── PickupLegPolicy ───────────────────────────────────────────────────────────

/// How the empty drive from the driver's current location to the pickup is
/// scheduled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupLegPolicy {
    /// Pickup first, then one drive covering both legs: the whole route is
    /// logged as driving after the pickup.
    #[default]
    FoldIntoTrip,
    /// Drive to the pickup under HOS limits, load, then drive to the
    /// dropoff.  Counters carry across both legs.
    DriveToPickup,
}
