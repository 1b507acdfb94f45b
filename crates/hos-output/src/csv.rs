//! CSV export backend.
//!
//! Creates two files in the configured output directory:
//! - `trip_segments.csv`
//! - `daily_totals.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use hos_schedule::{DutyStatus, SegmentRecord};

use crate::writer::LogWriter;
use crate::{DailyLog, OutputResult};

/// Writes a trip log to two CSV files.
pub struct CsvLogWriter {
    segments: Writer<File>,
    totals:   Writer<File>,
    finished: bool,
}

impl CsvLogWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut segments = Writer::from_path(dir.join("trip_segments.csv"))?;
        segments.write_record([
            "type",
            "status",
            "start_time",
            "duration",
            "description",
            "distance_miles",
            "latitude",
            "longitude",
        ])?;

        let mut totals = Writer::from_path(dir.join("daily_totals.csv"))?;
        totals.write_record(["day", "off_duty", "sleeper", "driving", "on_duty"])?;

        Ok(Self { segments, totals, finished: false })
    }
}

/// Empty cell for a missing value.
fn opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl LogWriter for CsvLogWriter {
    fn write_segments(&mut self, rows: &[SegmentRecord]) -> OutputResult<()> {
        for row in rows {
            self.segments.write_record(&[
                row.kind.as_str().to_owned(),
                row.status.as_str().to_owned(),
                row.start_time.to_string(),
                row.duration.to_string(),
                row.description.clone(),
                row.distance_miles.to_string(),
                opt(row.latitude),
                opt(row.longitude),
            ])?;
        }
        Ok(())
    }

    fn write_daily_totals(&mut self, logs: &[DailyLog]) -> OutputResult<()> {
        for log in logs {
            let mut record = vec![log.day.to_string()];
            record.extend(DutyStatus::ALL.iter().map(|&s| log.totals.hours(s).to_string()));
            self.totals.write_record(&record)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.segments.flush()?;
        self.totals.flush()?;
        Ok(())
    }
}
