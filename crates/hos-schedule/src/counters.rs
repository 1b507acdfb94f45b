//! Per-computation duty counters and the pure transition functions over them.
//!
//! # State model
//!
//! [`TripCounters`] is a `Copy` value.  Every transition takes the counters
//! by value and returns the next state:
//!
//! ```text
//! counters = counters.after_drive(minutes, miles);
//! counters = counters.after_fuel_stop(rules.fuel_stop_duration);
//! ```
//!
//! Fuel is tracked in miles actually driven, not driving minutes: the last
//! drive of a leg is rounded up to a whole minute and would otherwise reach
//! the interval early.
//!
//! Nothing is shared between computations, and [`next_action`] can be
//! exercised directly from a hand-built state.

use hos_core::Minutes;

use crate::HosRules;

// ── TripCounters ──────────────────────────────────────────────────────────────

/// Running totals for one schedule computation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TripCounters {
    /// Miles left on the current leg.
    pub remaining_miles: f64,
    /// Offset of the next segment from trip start.
    pub current_time: Minutes,
    pub driving_since_break: Minutes,
    pub driving_daily: Minutes,
    pub on_duty_daily: Minutes,
    /// On-duty time charged against the cycle by this trip.
    pub cycle_consumed: Minutes,
    /// Distance actually driven since the last fuel stop.
    pub miles_since_fuel: f64,
}

impl TripCounters {
    /// Fresh counters at trip start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new leg of `miles`; all duty counters carry over.
    #[inline]
    pub fn with_remaining(self, miles: f64) -> Self {
        Self { remaining_miles: miles, ..self }
    }

    /// On-duty, not-driving work (pickup, dropoff).
    pub fn after_on_duty(self, duration: Minutes) -> Self {
        Self {
            current_time:   self.current_time + duration,
            on_duty_daily:  self.on_duty_daily + duration,
            cycle_consumed: self.cycle_consumed + duration,
            ..self
        }
    }

    /// Fuel stop: on-duty work that also restarts the fuel interval.
    pub fn after_fuel_stop(self, duration: Minutes) -> Self {
        Self {
            miles_since_fuel: 0.0,
            ..self.after_on_duty(duration)
        }
    }

    /// Sleeper rest resets the daily limits and the break clock.  It does
    /// not consume cycle time.
    pub fn after_sleeper(self, duration: Minutes) -> Self {
        Self {
            current_time:        self.current_time + duration,
            driving_since_break: Minutes::ZERO,
            driving_daily:       Minutes::ZERO,
            on_duty_daily:       Minutes::ZERO,
            ..self
        }
    }

    /// Short break resets the break clock.  The duty window keeps running;
    /// the cycle does not.
    pub fn after_break(self, duration: Minutes) -> Self {
        Self {
            current_time:        self.current_time + duration,
            on_duty_daily:       self.on_duty_daily + duration,
            driving_since_break: Minutes::ZERO,
            ..self
        }
    }

    /// Drive for `duration`, covering `miles`.  Remaining distance is
    /// clamped at zero.
    pub fn after_drive(self, duration: Minutes, miles: f64) -> Self {
        Self {
            remaining_miles:     (self.remaining_miles - miles).max(0.0),
            current_time:        self.current_time + duration,
            driving_since_break: self.driving_since_break + duration,
            driving_daily:       self.driving_daily + duration,
            on_duty_daily:       self.on_duty_daily + duration,
            cycle_consumed:      self.cycle_consumed + duration,
            miles_since_fuel:    self.miles_since_fuel + miles,
        }
    }

    /// A fuel stop is owed once the fuel interval is reached.
    #[inline]
    pub fn fuel_due(&self, rules: &HosRules) -> bool {
        rules.fuel_interval_miles - self.miles_since_fuel < FUEL_TOLERANCE_MILES
    }
}

/// Slack under the fuel interval that still counts as reaching it.
pub const FUEL_TOLERANCE_MILES: f64 = 0.1;

// ── TimeToLimits ──────────────────────────────────────────────────────────────

/// Driving time available before each forced action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimeToLimits {
    pub finish: Minutes,
    pub break_due: Minutes,
    pub daily_driving: Minutes,
    pub duty_window: Minutes,
    pub fuel: Minutes,
    pub cycle: Minutes,
}

impl TimeToLimits {
    /// Measure every limit from `counters`.  `cycle_budget` is the cycle
    /// time this leg may spend (available cycle minus reserved work).
    pub fn measure(counters: &TripCounters, rules: &HosRules, cycle_budget: Minutes) -> Self {
        Self {
            finish:        rules.minutes_for_miles(counters.remaining_miles),
            break_due:     rules.break_after_driving.saturating_sub(counters.driving_since_break),
            daily_driving: rules.max_daily_driving.saturating_sub(counters.driving_daily),
            duty_window:   rules.duty_window.saturating_sub(counters.on_duty_daily),
            fuel:          rules.minutes_for_miles(rules.fuel_interval_miles - counters.miles_since_fuel),
            cycle:         cycle_budget.saturating_sub(counters.cycle_consumed),
        }
    }

    /// The binding constraint: how long the next drive may last.
    pub fn min(&self) -> Minutes {
        [
            self.finish,
            self.break_due,
            self.daily_driving,
            self.duty_window,
            self.fuel,
            self.cycle,
        ]
        .into_iter()
        .min()
        .unwrap_or(Minutes::ZERO)
    }
}

// ── Action ────────────────────────────────────────────────────────────────────

/// What the engine does next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Cycle budget exhausted: emit the limit marker and stop.
    CycleLimit,
    /// Daily driving or duty window exhausted.
    Sleep,
    /// Cumulative driving since the last break reached the threshold.
    Break,
    Drive(Minutes),
    /// No limit is exhausted yet no driving time is available.
    Stall,
}

/// Decide the next action.
///
/// Limits are exact integer minutes, so "reached" means exactly zero and
/// simultaneous triggers resolve by fixed priority:
/// cycle > sleeper > break > drive.
pub fn next_action(counters: &TripCounters, rules: &HosRules, cycle_budget: Minutes) -> Action {
    if counters.cycle_consumed >= cycle_budget {
        return Action::CycleLimit;
    }

    let limits = TimeToLimits::measure(counters, rules, cycle_budget);

    if limits.daily_driving.is_zero() || limits.duty_window.is_zero() {
        return Action::Sleep;
    }
    if limits.break_due.is_zero() {
        return Action::Break;
    }

    match limits.min() {
        Minutes::ZERO => Action::Stall,
        drive => Action::Drive(drive),
    }
}
