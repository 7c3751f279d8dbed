//! The Engine: unified API for TallyVault.
//!
//! The Engine brings together the proposal registry, the encrypted
//! ballot accumulator, the access control ledger, and the tally
//! revealer behind one serialized interface.
//!
//! Every public operation locks the whole engine state for its full
//! duration, capability calls included. That single discipline is what
//! makes each operation atomic (no observer sees a half-updated
//! counter) and linearizes concurrent ballots: two simultaneous votes
//! from one participant cannot both pass the duplicate check, because
//! the check and the commit happen under the same guard.

use std::sync::Arc;

use tokio::sync::Mutex;

use tallyvault_acl::AccessLedger;
use tallyvault_cipher::{CipherEngine, CipherError};
use tallyvault_core::{
    validate_schedule, Clock, Notification, Principal, ProposalId, RevealedResult,
};

use crate::error::{EngineError, Result};
use crate::registry::{ProposalRegistry, ProposalView};
use crate::tally::EncryptedTally;

/// The main Engine struct.
///
/// Generic over the ciphertext capability so deployments can plug in
/// a real homomorphic backend while tests use the reference engine.
pub struct Engine<C: CipherEngine> {
    /// The ciphertext capability.
    cipher: C,
    /// Source of "current time" for window gating.
    clock: Arc<dyn Clock>,
    /// The engine's own role, holder of decrypt rights on counters.
    revealer: Principal,
    /// All mutable state, serialized behind one lock.
    state: Mutex<EngineState>,
}

struct EngineState {
    ledger: AccessLedger,
    registry: ProposalRegistry,
    /// Ordered audit log of committed operations.
    events: Vec<Notification>,
}

impl<C: CipherEngine> Engine<C> {
    /// Create an engine with the designated authority.
    pub fn new(cipher: C, clock: Arc<dyn Clock>, authority: Principal) -> Self {
        Self {
            cipher,
            clock,
            revealer: Principal::derive("tallyvault/revealer"),
            state: Mutex::new(EngineState {
                ledger: AccessLedger::new(authority),
                registry: ProposalRegistry::new(),
                events: Vec::new(),
            }),
        }
    }

    /// The ciphertext capability backing this engine.
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// The engine's internal revealer role.
    pub fn revealer(&self) -> Principal {
        self.revealer
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Proposal Registry Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a time-bounded proposal. Authority only.
    ///
    /// `start_time` must be strictly in the future and `duration`
    /// strictly positive, both Unix milliseconds. On success the
    /// proposal is Scheduled, its counters hold encrypted zeros, and
    /// the revealer role already has decrypt rights on them (so a
    /// proposal closed with zero votes still reveals cleanly).
    pub async fn create_proposal(
        &self,
        caller: Principal,
        title: &str,
        description: &str,
        start_time: i64,
        duration: i64,
    ) -> Result<ProposalId> {
        let mut state = self.state.lock().await;
        state.ledger.require_authority(caller)?;

        let now = self.clock.now();
        let end_time = validate_schedule(now, start_time, duration)?;

        let tally = EncryptedTally::zeroed(&self.cipher).await?;
        self.cipher.grant_access(&tally.yes, self.revealer).await?;
        self.cipher.grant_access(&tally.no, self.revealer).await?;
        for cid in tally.counter_ids() {
            state.ledger.record_grant(cid, self.revealer);
        }

        let id = state
            .registry
            .allocate(title, description, start_time, end_time, tally);

        tracing::info!(%id, title, start_time, end_time, "proposal created");
        state.events.push(Notification::ProposalCreated {
            id,
            title: title.to_string(),
            start_time,
            end_time,
        });
        Ok(id)
    }

    /// Get proposal metadata and its lifecycle state as of now.
    pub async fn get_proposal(&self, id: ProposalId) -> Result<ProposalView> {
        let state = self.state.lock().await;
        let record = state.registry.get(id).ok_or(EngineError::NotFound(id))?;
        let now = self.clock.now();
        Ok(ProposalView {
            proposal: record.proposal.clone(),
            state: record.proposal.state_at(now),
        })
    }

    /// Number of proposals ever created.
    pub async fn count(&self) -> u64 {
        self.state.lock().await.registry.count()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ballot Accumulator Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Cast a secret ballot on an active proposal.
    ///
    /// Preconditions, checked in order: proposal exists; current time
    /// inside `[start_time, end_time)` and not closed; caller has not
    /// voted; the ballot's validity proof checks out on import. The
    /// accepted ballot is folded into both counters via the
    /// select-then-add rule and decrypt rights on the fresh counters
    /// go to the revealer role and to the voter, who may thereby
    /// verify their contribution was incorporated without learning
    /// the aggregate.
    pub async fn cast_vote(
        &self,
        caller: Principal,
        id: ProposalId,
        raw_ballot: &[u8],
        proof: &[u8],
    ) -> Result<()> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        let (start_time, end_time, closed, already_voted, tally) = {
            let record = state.registry.get(id).ok_or(EngineError::NotFound(id))?;
            (
                record.proposal.start_time,
                record.proposal.end_time,
                record.proposal.closed_at.is_some(),
                record.voters.contains(&caller),
                record.tally.clone(),
            )
        };

        if now < start_time {
            return Err(EngineError::VotingNotStarted {
                id,
                opens_at: start_time,
            });
        }
        if closed || now >= end_time {
            return Err(EngineError::VotingEnded {
                id,
                ended_at: end_time,
            });
        }
        if already_voted {
            return Err(EngineError::DuplicateVote { id, voter: caller });
        }

        let ballot = self
            .cipher
            .import_external(raw_ballot, proof)
            .await
            .map_err(|e| match e {
                e @ (CipherError::InvalidProof | CipherError::Malformed(_)) => {
                    EngineError::InvalidBallot(e)
                }
                other => EngineError::Cipher(other),
            })?;

        let updated = tally.absorb(&self.cipher, &ballot).await?;

        // All fallible work is done; grant, then commit.
        for principal in [self.revealer, caller] {
            self.cipher.grant_access(&updated.yes, principal).await?;
            self.cipher.grant_access(&updated.no, principal).await?;
        }
        for cid in updated.counter_ids() {
            state.ledger.record_grant(cid, self.revealer);
            state.ledger.record_grant(cid, caller);
        }

        let record = state
            .registry
            .get_mut(id)
            .ok_or(EngineError::NotFound(id))?;
        record.voters.insert(caller);
        record.tally = updated;

        tracing::debug!(%id, voter = %caller, "ballot accepted");
        state
            .events
            .push(Notification::VoteCast { id, voter: caller });
        Ok(())
    }

    /// Whether `principal` has an accepted ballot on record for `id`.
    pub async fn has_voted(&self, id: ProposalId, principal: Principal) -> Result<bool> {
        let state = self.state.lock().await;
        let record = state.registry.get(id).ok_or(EngineError::NotFound(id))?;
        Ok(record.voters.contains(&principal))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tally Revealer Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Close a proposal and reveal its plaintext totals. Authority
    /// only; requires the window to have strictly elapsed. This is the
    /// only place plaintext vote totals ever come into existence.
    pub async fn close_proposal(
        &self,
        caller: Principal,
        id: ProposalId,
    ) -> Result<RevealedResult> {
        let mut state = self.state.lock().await;
        state.ledger.require_authority(caller)?;

        let now = self.clock.now();
        let (end_time, closed, tally) = {
            let record = state.registry.get(id).ok_or(EngineError::NotFound(id))?;
            (
                record.proposal.end_time,
                record.proposal.closed_at.is_some(),
                record.tally.clone(),
            )
        };

        if closed {
            return Err(EngineError::AlreadyClosed(id));
        }
        if now <= end_time {
            return Err(EngineError::VotingStillOpen {
                id,
                ends_at: end_time,
            });
        }

        let map_denied = |e: CipherError| match e {
            e @ CipherError::AccessDenied { .. } => EngineError::AccessDenied(e),
            other => EngineError::Cipher(other),
        };
        let yes_count = self
            .cipher
            .decrypt(&tally.yes, self.revealer)
            .await
            .map_err(map_denied)?;
        let no_count = self
            .cipher
            .decrypt(&tally.no, self.revealer)
            .await
            .map_err(map_denied)?;

        let record = state
            .registry
            .get_mut(id)
            .ok_or(EngineError::NotFound(id))?;
        record.proposal.mark_closed(now);
        let result = RevealedResult {
            yes_count,
            no_count,
            revealed: true,
        };
        record.result = result;

        tracing::info!(%id, yes_count, no_count, "proposal closed, results revealed");
        state.events.push(Notification::ResultsRevealed {
            id,
            yes_count,
            no_count,
        });
        state.events.push(Notification::ProposalClosed { id });
        Ok(result)
    }

    /// Read the revealed result; zero counts and `revealed = false`
    /// for any proposal not yet closed.
    pub async fn get_results(&self, id: ProposalId) -> Result<RevealedResult> {
        let state = self.state.lock().await;
        let record = state.registry.get(id).ok_or(EngineError::NotFound(id))?;
        Ok(record.result)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Audit Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// The ordered notification log of all committed operations.
    pub async fn events(&self) -> Vec<Notification> {
        self.state.lock().await.events.clone()
    }
}
