//! Duty segments: the engine's output timeline.
//!
//! A [`Segment`] is one contiguous duty event.  Its [`SegmentKind`] is a
//! closed set with per-variant payload; the four-way [`DutyStatus`] used by
//! log sheets is derived from it, never stored separately.

use std::fmt;

use serde::{Deserialize, Serialize};

use hos_core::{Coordinate, Minutes};

// ── DutyStatus ────────────────────────────────────────────────────────────────

/// The four rows of a driver's daily log grid, in grid order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    OffDuty,
    Sleeper,
    Driving,
    OnDuty,
}

impl DutyStatus {
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::Sleeper,
        DutyStatus::Driving,
        DutyStatus::OnDuty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "off_duty",
            DutyStatus::Sleeper => "sleeper",
            DutyStatus::Driving => "driving",
            DutyStatus::OnDuty  => "on_duty",
        }
    }

    /// Position in [`DutyStatus::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ── SegmentKind ───────────────────────────────────────────────────────────────

/// On-duty, not-driving work.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnDutyActivity {
    Pickup,
    FuelStop,
    Dropoff,
}

/// Why the driver is off duty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffDutyReason {
    /// Mandatory short break after cumulative driving.
    Break,
    /// Zero-length marker: the cycle budget ran out before the destination.
    CycleLimitReached { limit: Minutes },
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Driving { distance_miles: f64 },
    OnDuty(OnDutyActivity),
    OffDuty(OffDutyReason),
    Sleeper,
}

impl SegmentKind {
    pub fn status(self) -> DutyStatus {
        match self {
            SegmentKind::Driving { .. } => DutyStatus::Driving,
            SegmentKind::OnDuty(_)      => DutyStatus::OnDuty,
            SegmentKind::OffDuty(_)     => DutyStatus::OffDuty,
            SegmentKind::Sleeper        => DutyStatus::Sleeper,
        }
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// One atomic duty event on the trip timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Offset from trip start.
    pub start: Minutes,
    pub duration: Minutes,
    /// Where the stop happens.  Set by the geo-annotator for non-driving
    /// segments only; driving segments are spans, not points.
    pub coordinate: Option<Coordinate>,
}

impl Segment {
    pub fn new(kind: SegmentKind, start: Minutes, duration: Minutes) -> Self {
        Self { kind, start, duration, coordinate: None }
    }

    #[inline]
    pub fn status(&self) -> DutyStatus {
        self.kind.status()
    }

    #[inline]
    pub fn end(&self) -> Minutes {
        self.start + self.duration
    }

    #[inline]
    pub fn is_driving(&self) -> bool {
        matches!(self.kind, SegmentKind::Driving { .. })
    }

    /// Hours since trip start.
    #[inline]
    pub fn start_time(&self) -> f64 {
        self.start.as_hours()
    }

    #[inline]
    pub fn duration_hours(&self) -> f64 {
        self.duration.as_hours()
    }

    /// Miles covered; zero for every non-driving kind.
    #[inline]
    pub fn distance_miles(&self) -> f64 {
        match self.kind {
            SegmentKind::Driving { distance_miles } => distance_miles,
            _ => 0.0,
        }
    }

    /// `true` for the zero-length cycle-limit marker.
    pub fn is_cycle_limit_marker(&self) -> bool {
        matches!(self.kind, SegmentKind::OffDuty(OffDutyReason::CycleLimitReached { .. }))
    }

    /// Human-readable label.  Informational only.
    pub fn description(&self) -> String {
        match self.kind {
            SegmentKind::Driving { distance_miles } => format!("Driving {distance_miles:.1} miles"),
            SegmentKind::OnDuty(OnDutyActivity::Pickup)   => "Pickup at Origin".to_owned(),
            SegmentKind::OnDuty(OnDutyActivity::FuelStop) => "Fuel Stop".to_owned(),
            SegmentKind::OnDuty(OnDutyActivity::Dropoff)  => "Dropoff at Destination".to_owned(),
            SegmentKind::OffDuty(OffDutyReason::Break) => {
                format!("{}-minute Mandatory Break", self.duration.0)
            }
            SegmentKind::OffDuty(OffDutyReason::CycleLimitReached { limit }) => {
                format!("REACHED {}-HOUR LIMIT", limit.as_hours())
            }
            SegmentKind::Sleeper => {
                format!("{}-hour Mandatory Rest", self.duration.as_hours())
            }
        }
    }

    /// Flat view used for JSON responses and CSV export.
    pub fn to_record(&self) -> SegmentRecord {
        SegmentRecord {
            kind:           self.status(),
            status:         self.status(),
            start_time:     self.start_time(),
            duration:       self.duration_hours(),
            description:    self.description(),
            distance_miles: self.distance_miles(),
            latitude:       self.coordinate.map(|c| c.lat),
            longitude:      self.coordinate.map(|c| c.lng),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {:<8} {}", self.start, self.end(), self.status(), self.description())?;
        if let Some(c) = self.coordinate {
            write!(f, " @ {c}")?;
        }
        Ok(())
    }
}

// ── SegmentRecord ─────────────────────────────────────────────────────────────

/// Plain row form of a [`Segment`]: hours as `f64`, coordinate split into
/// two nullable columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    #[serde(rename = "type")]
    pub kind:           DutyStatus,
    pub status:         DutyStatus,
    pub start_time:     f64,
    pub duration:       f64,
    pub description:    String,
    pub distance_miles: f64,
    pub latitude:       Option<f64>,
    pub longitude:      Option<f64>,
}
