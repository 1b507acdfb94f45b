//! `hos-output` — log sheets and export for planned trips.
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`log`]    | `daily_logs`: split a timeline into 24-hour sheets     |
//! | [`writer`] | `LogWriter` trait                                      |
//! | [`csv`]    | `CsvLogWriter`: `trip_segments.csv`, `daily_totals.csv` |
//! | [`error`]  | `OutputError`, `OutputResult<T>`                       |
//!
//! # Usage
//!
//! ```rust,ignore
//! use hos_output::{daily_logs, CsvLogWriter, LogWriter};
//!
//! let mut writer = CsvLogWriter::new(Path::new("./output"))?;
//! writer.write_segments(&plan.trip_segments)?;
//! writer.write_daily_totals(&daily_logs(&plan.schedule.segments))?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod log;
pub mod writer;


pub use csv::CsvLogWriter;
pub use error::{OutputError, OutputResult};
pub use log::{daily_logs, DailyLog, DutyTotals, LogEntry, MINUTES_PER_DAY};
pub use writer::LogWriter;
