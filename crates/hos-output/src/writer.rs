//! The `LogWriter` trait implemented by export backends.

use hos_schedule::SegmentRecord;

use crate::{DailyLog, OutputResult};

/// Sink for a planned trip's segment rows and per-day duty totals.
pub trait LogWriter {
    /// Write a batch of segment rows.
    fn write_segments(&mut self, rows: &[SegmentRecord]) -> OutputResult<()>;

    /// Write one totals row per log sheet.
    fn write_daily_totals(&mut self, logs: &[DailyLog]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
