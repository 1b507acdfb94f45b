use hos_core::Minutes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no hours available in the duty cycle ({hours_used} h already used)")]
    NoCycleHoursAvailable { hours_used: f64 },

    #[error("invalid HOS rules: {0}")]
    InvalidRules(String),

    /// No limit could be resolved and no progress was possible.  Reported
    /// instead of returning a silently truncated schedule.
    #[error("schedule computation stalled at {at} with {remaining_miles:.1} miles remaining")]
    ComputationStall { at: Minutes, remaining_miles: f64 },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
