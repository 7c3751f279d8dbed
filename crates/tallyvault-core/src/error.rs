//! Error types for TallyVault core.

use thiserror::Error;

/// Errors raised when validating a proposal schedule at creation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("start time {start} is not after current time {now}")]
    StartNotInFuture { start: i64, now: i64 },

    #[error("duration {0} is not positive")]
    NonPositiveDuration(i64),

    #[error("end time overflows the timestamp range")]
    EndTimeOverflow,
}
