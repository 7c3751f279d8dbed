//! The proposal registry.
//!
//! An arena of proposals indexed by their sequential id. Each record
//! owns its proposal metadata, its encrypted tally, its own voter set
//! (the single-use record), and the lazily populated revealed result.

use std::collections::BTreeSet;

use tallyvault_core::{LifecycleState, Principal, Proposal, ProposalId, RevealedResult};

use crate::tally::EncryptedTally;

/// Everything the engine holds for one proposal.
#[derive(Debug)]
pub struct ProposalRecord {
    pub proposal: Proposal,
    pub tally: EncryptedTally,
    /// Principals that have cast an accepted ballot. Grows
    /// monotonically; an entry exists only for accepted ballots.
    pub voters: BTreeSet<Principal>,
    /// Zero counts and `revealed = false` until closing.
    pub result: RevealedResult,
}

/// Proposal metadata with its lifecycle state, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalView {
    pub proposal: Proposal,
    pub state: LifecycleState,
}

/// Arena of all proposals ever created.
#[derive(Debug, Default)]
pub struct ProposalRegistry {
    records: Vec<ProposalRecord>,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of proposals created. Monotonic.
    pub fn count(&self) -> u64 {
        self.records.len() as u64
    }

    /// Store a new Scheduled proposal and return its id.
    pub fn allocate(
        &mut self,
        title: &str,
        description: &str,
        start_time: i64,
        end_time: i64,
        tally: EncryptedTally,
    ) -> ProposalId {
        let id = ProposalId::from_index(self.records.len() as u64);
        self.records.push(ProposalRecord {
            proposal: Proposal::new(id, title, description, start_time, end_time),
            tally,
            voters: BTreeSet::new(),
            result: RevealedResult::default(),
        });
        id
    }

    pub fn get(&self, id: ProposalId) -> Option<&ProposalRecord> {
        self.records.get(id.index() as usize)
    }

    pub fn get_mut(&mut self, id: ProposalId) -> Option<&mut ProposalRecord> {
        self.records.get_mut(id.index() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallyvault_cipher::{CipherEngine, MockCipherEngine};

    async fn empty_tally(eng: &MockCipherEngine) -> EncryptedTally {
        EncryptedTally {
            yes: eng.encrypt_zero().await.unwrap(),
            no: eng.encrypt_zero().await.unwrap(),
        }
    }

    #[tokio::test]
    async fn test_sequential_ids() {
        let eng = MockCipherEngine::from_seed([5; 32]);
        let mut registry = ProposalRegistry::new();

        let a = registry.allocate("a", "", 100, 200, empty_tally(&eng).await);
        let b = registry.allocate("b", "", 100, 200, empty_tally(&eng).await);

        assert_eq!(a, ProposalId::from_index(0));
        assert_eq!(b, ProposalId::from_index(1));
        assert_eq!(registry.count(), 2);
    }

    #[tokio::test]
    async fn test_unassigned_id_is_absent() {
        let eng = MockCipherEngine::from_seed([6; 32]);
        let mut registry = ProposalRegistry::new();
        registry.allocate("a", "", 100, 200, empty_tally(&eng).await);

        assert!(registry.get(ProposalId::from_index(0)).is_some());
        assert!(registry.get(ProposalId::from_index(1)).is_none());
    }
}
