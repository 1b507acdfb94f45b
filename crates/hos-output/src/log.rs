//! Daily duty-status log sheets.
//!
//! A trip timeline starts at hour 0 and may run for several days.  Log
//! sheets cover one 24-hour day each, so every segment is clipped to the
//! days it overlaps:
//!
//! ```text
//! trip:   |pickup|----drive----|brk|-drive-|======sleeper======|--drive--|fuel|drop|
//! day 1:  0 ─────────────────────────────────────────────────── 24h
//! day 2:                                                        0 ──────────────── …
//! ```
//!
//! Entry times are minutes since that day's midnight.

use hos_core::Minutes;
use hos_schedule::{DutyStatus, Segment};

/// Length of one log sheet.
pub const MINUTES_PER_DAY: u32 = 24 * Minutes::PER_HOUR;

/// One row on a log sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub status:      DutyStatus,
    /// Minutes since the day's midnight.
    pub start:       Minutes,
    pub end:         Minutes,
    pub description: String,
}

impl LogEntry {
    pub fn duration(&self) -> Minutes {
        self.end.saturating_sub(self.start)
    }
}

/// Time spent in each duty status, indexed like [`DutyStatus::ALL`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DutyTotals([Minutes; 4]);

impl DutyTotals {
    pub fn get(&self, status: DutyStatus) -> Minutes {
        self.0[status.index()]
    }

    pub fn hours(&self, status: DutyStatus) -> f64 {
        self.get(status).as_hours()
    }

    pub fn total(&self) -> Minutes {
        self.0.iter().copied().sum()
    }

    fn add(&mut self, status: DutyStatus, minutes: Minutes) {
        self.0[status.index()] += minutes;
    }
}

/// One 24-hour log sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLog {
    /// 1-based day number.
    pub day:     u32,
    pub entries: Vec<LogEntry>,
    pub totals:  DutyTotals,
}

/// Split a trip timeline into daily log sheets.
///
/// Always returns at least one sheet.  A zero-length segment (the cycle
/// limit marker) appears as a zero-length entry on the day it falls in; a
/// marker exactly at the end of the last day stays on that day.
pub fn daily_logs(segments: &[Segment]) -> Vec<DailyLog> {
    let total = segments.iter().map(Segment::end).max().unwrap_or(Minutes::ZERO);
    let days = total.0.div_ceil(MINUTES_PER_DAY).max(1);

    (0..days)
        .map(|d| {
            let day_start = Minutes(d * MINUTES_PER_DAY);
            let day_end = day_start + Minutes(MINUTES_PER_DAY);
            let mut log = DailyLog { day: d + 1, entries: Vec::new(), totals: DutyTotals::default() };

            for seg in segments {
                if seg.duration.is_zero() {
                    let on_day = (seg.start.0 / MINUTES_PER_DAY).min(days - 1);
                    if on_day == d {
                        let at = seg.start.saturating_sub(day_start);
                        log.entries.push(entry(seg, at, at));
                    }
                    continue;
                }

                let start = seg.start.max(day_start);
                let end = seg.end().min(day_end);
                if start < end {
                    log.entries.push(entry(seg, start.saturating_sub(day_start), end.saturating_sub(day_start)));
                    log.totals.add(seg.status(), end.saturating_sub(start));
                }
            }
            log
        })
        .collect()
}

fn entry(seg: &Segment, start: Minutes, end: Minutes) -> LogEntry {
    LogEntry { status: seg.status(), start, end, description: seg.description() }
}
