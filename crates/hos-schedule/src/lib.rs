//! `hos-schedule` — Hours-of-Service trip segmentation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`rules`]    | `HosRules` (limits, config), `PickupLegPolicy`               |
//! | [`segment`]  | `Segment`, `SegmentKind`, `DutyStatus`, `SegmentRecord`      |
//! | [`counters`] | `TripCounters`, `TimeToLimits`, `next_action`                |
//! | [`engine`]   | `compute_trip_segments`, `compute_trip`, `TripSchedule`      |
//! | [`error`]    | `ScheduleError`, `ScheduleResult<T>`                         |
//!
//! # Example
//!
//! ```rust
//! use hos_schedule::{compute_trip_segments, DutyStatus};
//!
//! let schedule = compute_trip_segments(300.0, 10.0).unwrap();
//! let statuses: Vec<_> = schedule.segments.iter().map(|s| s.status()).collect();
//! assert_eq!(statuses, [DutyStatus::OnDuty, DutyStatus::Driving, DutyStatus::OnDuty]);
//! assert_eq!(schedule.total_hours(), 7.0);
//! ```

pub mod counters;
pub mod engine;
pub mod error;
pub mod rules;
pub mod segment;

#[cfg(test)]
mod tests;

pub use counters::{next_action, Action, TimeToLimits, TripCounters};
pub use engine::{
    compute_trip, compute_trip_segments, compute_trip_segments_with, TripLegs, TripOutcome,
    TripSchedule,
};
pub use error::{ScheduleError, ScheduleResult};
pub use rules::{HosRules, PickupLegPolicy};
pub use segment::{DutyStatus, OffDutyReason, OnDutyActivity, Segment, SegmentKind, SegmentRecord};
