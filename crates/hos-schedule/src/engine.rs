//! The trip segmentation engine.
//!
//! # Timeline
//!
//! ```text
//! Pickup ─► loop while miles remain:
//!              cycle budget spent?        → limit marker, stop
//!              11 h driving / 14 h window → 10 h sleeper
//!              8 h since break            → 30 min break
//!              otherwise                  → drive min(limits) [+ fuel stop]
//!        ─► Dropoff
//! ```
//!
//! # Cycle reservation
//!
//! While driving, the cycle budget holds back the on-duty work still owed
//! (the dropoff, and the pickup under [`PickupLegPolicy::DriveToPickup`]).
//! A completed trip therefore never ends past the cycle limit; when the
//! owed work cannot fit, the limit marker takes its place.

use tracing::{debug, info, warn};

use hos_core::Minutes;

use crate::counters::{next_action, Action, TripCounters};
use crate::segment::{OffDutyReason, OnDutyActivity, Segment, SegmentKind};
use crate::{HosRules, PickupLegPolicy, ScheduleError, ScheduleResult};

// ── Inputs / outputs ──────────────────────────────────────────────────────────

/// Route distances for one trip.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TripLegs {
    /// Current location → pickup.
    pub to_pickup: f64,
    /// Pickup → dropoff.
    pub to_dropoff: f64,
}

impl TripLegs {
    /// A trip that starts at the pickup.
    pub fn single(distance_miles: f64) -> Self {
        Self { to_pickup: 0.0, to_dropoff: distance_miles }
    }

    pub fn total(&self) -> f64 {
        self.to_pickup + self.to_dropoff
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TripOutcome {
    /// Destination reached and dropoff logged.
    Completed,
    /// The cycle ran out first; the last segment is the limit marker.
    Truncated,
}

/// The engine's result: the segment timeline and the cycle time it uses.
#[derive(Clone, Debug)]
pub struct TripSchedule {
    pub segments: Vec<Segment>,
    pub cycle_consumed: Minutes,
    pub outcome: TripOutcome,
}

impl TripSchedule {
    pub fn cycle_hours_consumed(&self) -> f64 {
        self.cycle_consumed.as_hours()
    }

    /// End of the last segment.
    pub fn total_duration(&self) -> Minutes {
        self.segments.last().map_or(Minutes::ZERO, Segment::end)
    }

    pub fn total_hours(&self) -> f64 {
        self.total_duration().as_hours()
    }

    pub fn driven_miles(&self) -> f64 {
        self.segments.iter().map(Segment::distance_miles).sum()
    }

    pub fn is_truncated(&self) -> bool {
        self.outcome == TripOutcome::Truncated
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Schedule a trip of `distance_miles` under the default rules, for a driver
/// who has already used `hours_already_used` of the cycle.
pub fn compute_trip_segments(
    distance_miles: f64,
    hours_already_used: f64,
) -> ScheduleResult<TripSchedule> {
    compute_trip_segments_with(distance_miles, hours_already_used, &HosRules::default())
}

/// Like [`compute_trip_segments`] with explicit rules.
pub fn compute_trip_segments_with(
    distance_miles: f64,
    hours_already_used: f64,
    rules: &HosRules,
) -> ScheduleResult<TripSchedule> {
    compute_trip(
        TripLegs::single(distance_miles),
        hours_already_used,
        rules,
        PickupLegPolicy::FoldIntoTrip,
    )
}

/// Schedule a two-leg trip, placing the pickup according to `policy`.
pub fn compute_trip(
    legs: TripLegs,
    hours_already_used: f64,
    rules: &HosRules,
    policy: PickupLegPolicy,
) -> ScheduleResult<TripSchedule> {
    check_distance("distance to pickup", legs.to_pickup)?;
    check_distance("distance to dropoff", legs.to_dropoff)?;
    if !hours_already_used.is_finite() || hours_already_used < 0.0 {
        return Err(ScheduleError::InvalidInput(format!(
            "hours already used must be a non-negative number, got {hours_already_used}"
        )));
    }
    rules.validate()?;
    let available = rules.available_cycle(hours_already_used)?;

    let mut planner = Planner::new(rules, available);

    match policy {
        PickupLegPolicy::FoldIntoTrip => {
            planner.on_duty(OnDutyActivity::Pickup, rules.pickup_duration);
            planner.drive_leg(legs.total(), rules.dropoff_duration)?;
        }
        PickupLegPolicy::DriveToPickup => {
            planner.drive_leg(legs.to_pickup, rules.pickup_duration + rules.dropoff_duration)?;
            planner.owed_on_duty(OnDutyActivity::Pickup, rules.pickup_duration);
            planner.drive_leg(legs.to_dropoff, rules.dropoff_duration)?;
        }
    }
    planner.owed_on_duty(OnDutyActivity::Dropoff, rules.dropoff_duration);

    let schedule = planner.finish();
    info!(
        miles = legs.total(),
        hours_used = hours_already_used,
        segments = schedule.segments.len(),
        cycle_hours = schedule.cycle_hours_consumed(),
        total_hours = schedule.total_hours(),
        outcome = ?schedule.outcome,
        "trip schedule computed"
    );
    Ok(schedule)
}

fn check_distance(what: &str, miles: f64) -> ScheduleResult<()> {
    if miles.is_finite() && miles >= 0.0 {
        Ok(())
    } else {
        Err(ScheduleError::InvalidInput(format!(
            "{what} must be a non-negative number of miles, got {miles}"
        )))
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// Accumulates segments while threading [`TripCounters`] through each
/// transition.  Lives for one `compute_trip` call.
struct Planner<'r> {
    rules:     &'r HosRules,
    /// Cycle time available to this trip.
    available: Minutes,
    counters:  TripCounters,
    segments:  Vec<Segment>,
    truncated: bool,
}

impl<'r> Planner<'r> {
    fn new(rules: &'r HosRules, available: Minutes) -> Self {
        Self {
            rules,
            available,
            counters:  TripCounters::new(),
            segments:  Vec::new(),
            truncated: false,
        }
    }

    fn push(&mut self, kind: SegmentKind, duration: Minutes) {
        self.segments.push(Segment::new(kind, self.counters.current_time, duration));
    }

    /// Unconditional on-duty work.
    fn on_duty(&mut self, activity: OnDutyActivity, duration: Minutes) {
        self.push(SegmentKind::OnDuty(activity), duration);
        self.counters = self.counters.after_on_duty(duration);
    }

    /// On-duty work that must fit in the cycle.  Skipped once truncated.
    fn owed_on_duty(&mut self, activity: OnDutyActivity, duration: Minutes) {
        if self.truncated {
            return;
        }
        if self.counters.cycle_consumed + duration > self.available {
            self.mark_cycle_limit();
            return;
        }
        self.on_duty(activity, duration);
    }

    fn mark_cycle_limit(&mut self) {
        warn!(
            at = %self.counters.current_time,
            remaining_miles = self.counters.remaining_miles,
            "cycle limit reached before destination"
        );
        self.push(
            SegmentKind::OffDuty(OffDutyReason::CycleLimitReached { limit: self.rules.cycle_limit }),
            Minutes::ZERO,
        );
        self.truncated = true;
    }

    /// Drive `miles` under all limits, holding `reserved` cycle time back
    /// for work owed after this leg.
    fn drive_leg(&mut self, miles: f64, reserved: Minutes) -> ScheduleResult<()> {
        if self.truncated {
            return Ok(());
        }
        self.counters = self.counters.with_remaining(miles);
        let rules = self.rules;
        let budget = self.available.saturating_sub(reserved);

        while self.counters.remaining_miles > 0.0 {
            match next_action(&self.counters, rules, budget) {
                Action::CycleLimit => {
                    self.mark_cycle_limit();
                    return Ok(());
                }
                Action::Sleep => {
                    debug!(at = %self.counters.current_time, "sleeper rest");
                    self.push(SegmentKind::Sleeper, rules.rest_duration);
                    self.counters = self.counters.after_sleeper(rules.rest_duration);
                }
                Action::Break => {
                    debug!(at = %self.counters.current_time, "driving break");
                    self.push(SegmentKind::OffDuty(OffDutyReason::Break), rules.break_duration);
                    self.counters = self.counters.after_break(rules.break_duration);
                }
                Action::Drive(minutes) => {
                    // The leg's last drive covers exactly what is left.
                    let finish = rules.minutes_for_miles(self.counters.remaining_miles);
                    let miles = if minutes >= finish {
                        self.counters.remaining_miles
                    } else {
                        rules.miles_for(minutes)
                    };
                    debug!(at = %self.counters.current_time, %minutes, miles, "drive");
                    self.push(SegmentKind::Driving { distance_miles: miles }, minutes);
                    self.counters = self.counters.after_drive(minutes, miles);

                    if self.counters.fuel_due(rules) {
                        debug!(at = %self.counters.current_time, "fuel stop");
                        self.push(SegmentKind::OnDuty(OnDutyActivity::FuelStop), rules.fuel_stop_duration);
                        self.counters = self.counters.after_fuel_stop(rules.fuel_stop_duration);
                    }
                }
                Action::Stall => {
                    return Err(ScheduleError::ComputationStall {
                        at: self.counters.current_time,
                        remaining_miles: self.counters.remaining_miles,
                    });
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> TripSchedule {
        TripSchedule {
            segments:       self.segments,
            cycle_consumed: self.counters.cycle_consumed,
            outcome:        if self.truncated { TripOutcome::Truncated } else { TripOutcome::Completed },
        }
    }
}
