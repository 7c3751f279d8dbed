//! # TallyVault Core
//!
//! Core primitives for the TallyVault confidential ballot engine:
//! strong identifier types, proposal metadata with derived lifecycle
//! state, schedule validation, audit notifications, and the clock
//! abstraction the engine gates its time windows on.
//!
//! This crate is deliberately free of any cryptography beyond id
//! derivation; the ciphertext capability lives in `tallyvault-cipher`.

pub mod clock;
pub mod error;
pub mod event;
pub mod proposal;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::ScheduleError;
pub use event::Notification;
pub use proposal::{validate_schedule, LifecycleState, Proposal, RevealedResult};
pub use types::{Principal, ProposalId};
