//! # TallyVault
//!
//! A confidential ballot-tallying engine: an authority defines
//! time-bounded proposals, eligible participants each cast one secret
//! choice, choices accumulate into running encrypted counters, and
//! plaintext totals come into existence only when the authority
//! formally closes the proposal.
//!
//! ## Overview
//!
//! - **Proposals**: sequentially numbered, time-windowed, with derived
//!   lifecycle state (Scheduled / Active / Closed).
//! - **Ballots**: externally encrypted, proof-checked on import,
//!   folded into counters with a select-then-add rule that never
//!   trusts the raw ciphertext's domain.
//! - **Access**: decrypt rights are explicit, auditable grants; the
//!   reveal at closing is the only path to plaintext totals.
//! - **Audit**: every committed operation appends an ordered
//!   notification; vote notifications never carry the choice.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tallyvault::{Clock, Engine, MockCipherEngine, Principal, SystemClock};
//!
//! async fn example() {
//!     let authority = Principal::derive("authority");
//!     let engine = Engine::new(
//!         MockCipherEngine::new(),
//!         Arc::new(SystemClock),
//!         authority,
//!     );
//!
//!     let id = engine
//!         .create_proposal(authority, "budget 2026", "adopt the draft budget",
//!             SystemClock.now() + 60_000, 3_600_000)
//!         .await
//!         .unwrap();
//!
//!     // Participants seal ballots through the cipher capability and
//!     // submit them with engine.cast_vote(...); once the window
//!     // elapses, engine.close_proposal(authority, id) reveals totals.
//!     let _ = id;
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `tallyvault::core` - primitives (Proposal, Principal, Clock, ...)
//! - `tallyvault::cipher` - the ciphertext capability boundary
//! - `tallyvault::acl` - the access control ledger

pub mod engine;
pub mod error;
pub mod registry;
pub mod tally;

// Re-export component crates
pub use tallyvault_acl as acl;
pub use tallyvault_cipher as cipher;
pub use tallyvault_core as core;

// Re-export main types for convenience
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use registry::{ProposalRecord, ProposalRegistry, ProposalView};
pub use tally::EncryptedTally;

// Re-export commonly used component types
pub use tallyvault_acl::{AccessLedger, AclError};
pub use tallyvault_cipher::{
    BoolCiphertext, CipherEngine, CipherError, CipherId, Ciphertext, MockCipherEngine,
};
pub use tallyvault_core::{
    Clock, LifecycleState, ManualClock, Notification, Principal, Proposal, ProposalId,
    RevealedResult, ScheduleError, SystemClock,
};
