//! Proposal metadata and lifecycle.
//!
//! Lifecycle state is derived from time bounds rather than stored:
//! a proposal is Scheduled before its start time and Active from then
//! on, until an explicit authority action closes it. Window expiry
//! alone never closes a proposal, because closing triggers the
//! authority-gated reveal and must not happen implicitly.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ScheduleError;
use crate::types::ProposalId;

/// Lifecycle state of a proposal, derived at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Before the voting window opens.
    Scheduled,
    /// Voting window has opened and the proposal has not been closed.
    ///
    /// A proposal whose window elapsed but was never closed still
    /// reports Active; the accumulator refuses its ballots regardless.
    Active,
    /// Explicitly closed by the authority. Terminal.
    Closed,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Scheduled => write!(f, "scheduled"),
            LifecycleState::Active => write!(f, "active"),
            LifecycleState::Closed => write!(f, "closed"),
        }
    }
}

/// Proposal metadata.
///
/// Owned by the proposal registry and mutated only through defined
/// transitions: creation and `mark_closed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Sequential id, immutable after creation.
    pub id: ProposalId,
    /// Short human-readable title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// When the voting window opens (Unix ms).
    pub start_time: i64,
    /// When the voting window ends (Unix ms, exclusive).
    pub end_time: i64,
    /// When the authority closed the proposal, if it has.
    pub closed_at: Option<i64>,
}

impl Proposal {
    /// Create a new Scheduled proposal.
    pub fn new(
        id: ProposalId,
        title: impl Into<String>,
        description: impl Into<String>,
        start_time: i64,
        end_time: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            start_time,
            end_time,
            closed_at: None,
        }
    }

    /// Derive the lifecycle state at a given time.
    pub fn state_at(&self, now: i64) -> LifecycleState {
        if self.closed_at.is_some() {
            LifecycleState::Closed
        } else if now < self.start_time {
            LifecycleState::Scheduled
        } else {
            LifecycleState::Active
        }
    }

    /// Whether a ballot cast at `now` falls inside the voting window.
    ///
    /// The window is half-open: `[start_time, end_time)`.
    pub fn accepts_votes_at(&self, now: i64) -> bool {
        self.closed_at.is_none() && now >= self.start_time && now < self.end_time
    }

    /// Record the explicit closing transition.
    pub fn mark_closed(&mut self, now: i64) {
        self.closed_at = Some(now);
    }
}

/// Plaintext tally of a closed proposal.
///
/// Zero counts with `revealed = false` until the reveal executes;
/// immutable thereafter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedResult {
    pub yes_count: u64,
    pub no_count: u64,
    pub revealed: bool,
}

/// Validate a proposal schedule and compute the end time.
///
/// `start_time` must be strictly after `now` and `duration` strictly
/// positive; both in Unix milliseconds.
pub fn validate_schedule(now: i64, start_time: i64, duration: i64) -> Result<i64, ScheduleError> {
    if start_time <= now {
        return Err(ScheduleError::StartNotInFuture {
            start: start_time,
            now,
        });
    }
    if duration <= 0 {
        return Err(ScheduleError::NonPositiveDuration(duration));
    }
    start_time
        .checked_add(duration)
        .ok_or(ScheduleError::EndTimeOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(start: i64, end: i64) -> Proposal {
        Proposal::new(ProposalId::from_index(0), "t", "d", start, end)
    }

    #[test]
    fn test_state_derivation() {
        let p = proposal(1000, 2000);

        assert_eq!(p.state_at(999), LifecycleState::Scheduled);
        assert_eq!(p.state_at(1000), LifecycleState::Active);
        assert_eq!(p.state_at(1999), LifecycleState::Active);
    }

    #[test]
    fn test_expired_but_unclosed_reports_active() {
        let p = proposal(1000, 2000);

        // Window elapsed, no explicit close: still Active, but not voteable.
        assert_eq!(p.state_at(5000), LifecycleState::Active);
        assert!(!p.accepts_votes_at(5000));
    }

    #[test]
    fn test_closed_is_terminal() {
        let mut p = proposal(1000, 2000);
        p.mark_closed(2500);

        assert_eq!(p.state_at(2500), LifecycleState::Closed);
        assert_eq!(p.state_at(i64::MAX), LifecycleState::Closed);
        assert!(!p.accepts_votes_at(1500));
    }

    #[test]
    fn test_window_is_half_open() {
        let p = proposal(1000, 2000);

        assert!(!p.accepts_votes_at(999));
        assert!(p.accepts_votes_at(1000));
        assert!(p.accepts_votes_at(1999));
        assert!(!p.accepts_votes_at(2000));
    }

    #[test]
    fn test_validate_schedule_ok() {
        assert_eq!(validate_schedule(100, 200, 50), Ok(250));
    }

    #[test]
    fn test_validate_schedule_start_in_past() {
        assert_eq!(
            validate_schedule(100, 100, 50),
            Err(ScheduleError::StartNotInFuture {
                start: 100,
                now: 100
            })
        );
        assert!(validate_schedule(100, 50, 50).is_err());
    }

    #[test]
    fn test_validate_schedule_bad_duration() {
        assert_eq!(
            validate_schedule(100, 200, 0),
            Err(ScheduleError::NonPositiveDuration(0))
        );
        assert_eq!(
            validate_schedule(100, 200, -5),
            Err(ScheduleError::NonPositiveDuration(-5))
        );
    }

    #[test]
    fn test_validate_schedule_overflow() {
        assert_eq!(
            validate_schedule(100, i64::MAX - 1, 10),
            Err(ScheduleError::EndTimeOverflow)
        );
    }

    #[test]
    fn test_revealed_result_default() {
        let r = RevealedResult::default();
        assert_eq!(r.yes_count, 0);
        assert_eq!(r.no_count, 0);
        assert!(!r.revealed);
    }
}
