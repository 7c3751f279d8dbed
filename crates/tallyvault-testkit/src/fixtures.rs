//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: an engine over the
//! reference cipher, a manually driven clock, and shortcuts for the
//! schedule / vote / close choreography.

use std::sync::Arc;

use tallyvault::{Clock, Engine, Result};
use tallyvault_cipher::MockCipherEngine;
use tallyvault_core::{ManualClock, Principal, ProposalId, RevealedResult};

/// Epoch for fixture clocks, Unix milliseconds.
pub const EPOCH: i64 = 1_700_000_000_000;
/// How far in the future fixture proposals open.
pub const LEAD_MS: i64 = 60_000;
/// Default fixture voting window length.
pub const DURATION_MS: i64 = 3_600_000;

/// A test fixture with an engine, a frozen clock, and an authority.
pub struct TestFixture {
    pub engine: Engine<MockCipherEngine>,
    pub clock: Arc<ManualClock>,
    pub authority: Principal,
}

impl TestFixture {
    /// Create a fixture with random cipher keys.
    pub fn new() -> Self {
        Self::build(MockCipherEngine::new())
    }

    /// Create a fixture with cipher keys derived from a seed, for
    /// deterministic tests.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::build(MockCipherEngine::from_seed(seed))
    }

    fn build(cipher: MockCipherEngine) -> Self {
        let clock = Arc::new(ManualClock::new(EPOCH));
        let authority = Principal::derive("fixture-authority");
        let engine = Engine::new(cipher, clock.clone(), authority);
        Self {
            engine,
            clock,
            authority,
        }
    }

    /// Create a proposal opening `LEAD_MS` from now and running for
    /// `DURATION_MS`.
    pub async fn schedule(&self, title: &str) -> Result<ProposalId> {
        self.engine
            .create_proposal(
                self.authority,
                title,
                "fixture proposal",
                self.clock.now() + LEAD_MS,
                DURATION_MS,
            )
            .await
    }

    /// Jump the clock inside the voting window of a freshly scheduled
    /// proposal.
    pub fn open_window(&self) {
        self.clock.advance(LEAD_MS);
    }

    /// Jump the clock strictly past the voting window.
    pub fn elapse_window(&self) {
        self.clock.advance(LEAD_MS + DURATION_MS + 1);
    }

    /// Seal a ballot for `choice` and cast it as `voter`.
    pub async fn cast(&self, id: ProposalId, voter: Principal, choice: bool) -> Result<()> {
        let (raw, proof) = self.engine.cipher().seal_ballot(choice)?;
        self.engine.cast_vote(voter, id, &raw, &proof).await
    }

    /// Close the proposal as the authority and return the totals.
    pub async fn close(&self, id: ProposalId) -> Result<RevealedResult> {
        self.engine.close_proposal(self.authority, id).await
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive `count` distinct voter principals.
pub fn voters(count: usize) -> Vec<Principal> {
    (0..count)
        .map(|i| Principal::derive(&format!("fixture-voter-{i}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallyvault_core::LifecycleState;

    #[tokio::test]
    async fn test_fixture_round_trip() {
        let fx = TestFixture::with_seed([1; 32]);
        let id = fx.schedule("round trip").await.unwrap();

        fx.open_window();
        let vs = voters(3);
        fx.cast(id, vs[0], true).await.unwrap();
        fx.cast(id, vs[1], false).await.unwrap();
        fx.cast(id, vs[2], true).await.unwrap();

        fx.elapse_window();
        let result = fx.close(id).await.unwrap();
        assert_eq!((result.yes_count, result.no_count), (2, 1));

        let view = fx.engine.get_proposal(id).await.unwrap();
        assert_eq!(view.state, LifecycleState::Closed);
    }

    #[tokio::test]
    async fn test_voters_are_distinct() {
        let vs = voters(4);
        for i in 0..vs.len() {
            for j in (i + 1)..vs.len() {
                assert_ne!(vs[i], vs[j]);
            }
        }
    }
}
