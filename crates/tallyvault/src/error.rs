//! Error types for the engine.
//!
//! Every precondition violation maps to its own variant so front ends
//! can render specific guidance ("voting has not started yet" vs "you
//! already voted"). Any failure aborts the operation with no state
//! mutation; retries are the caller's business.

use tallyvault_acl::AclError;
use tallyvault_cipher::CipherError;
use tallyvault_core::{Principal, ProposalId, ScheduleError};
use thiserror::Error;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Caller lacks the authority role.
    #[error("not authorized: {0}")]
    Unauthorized(#[from] AclError),

    /// Unknown proposal id.
    #[error("proposal {0} not found")]
    NotFound(ProposalId),

    /// Bad start time or duration at creation.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(#[from] ScheduleError),

    /// Ballot arrived before the voting window opened.
    #[error("voting on proposal {id} has not started (opens at {opens_at})")]
    VotingNotStarted { id: ProposalId, opens_at: i64 },

    /// Ballot arrived at or after the end of the window, or after closing.
    #[error("voting on proposal {id} has ended (ended at {ended_at})")]
    VotingEnded { id: ProposalId, ended_at: i64 },

    /// Single-use violation.
    #[error("{voter} already voted on proposal {id}")]
    DuplicateVote { id: ProposalId, voter: Principal },

    /// Ciphertext failed the proof or domain check on import.
    #[error("ballot rejected: {0}")]
    InvalidBallot(CipherError),

    /// Closing attempted while the window is still open.
    #[error("voting on proposal {id} is still open (ends at {ends_at})")]
    VotingStillOpen { id: ProposalId, ends_at: i64 },

    /// Closing attempted a second time.
    #[error("proposal {0} is already closed")]
    AlreadyClosed(ProposalId),

    /// Decrypt attempted without a grant. Unreachable when grants are
    /// issued on creation and every accepted vote, but surfaced rather
    /// than mishandled if a backend ever reports it.
    #[error("reveal failed: {0}")]
    AccessDenied(CipherError),

    /// Unexpected capability failure.
    #[error("cipher engine error: {0}")]
    Cipher(#[from] CipherError),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
