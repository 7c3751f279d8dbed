//! Proptest generators for property-based testing.

use proptest::prelude::*;

use tallyvault_core::{Principal, ProposalId};

/// Generate a random principal.
pub fn principal() -> impl Strategy<Value = Principal> {
    any::<[u8; 32]>().prop_map(Principal)
}

/// Generate a random proposal id.
pub fn proposal_id() -> impl Strategy<Value = ProposalId> {
    any::<u64>().prop_map(ProposalId::from_index)
}

/// Generate a ballot sequence of up to `max` yes/no choices, one per
/// distinct voter.
pub fn ballots(max: usize) -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..=max)
}

/// Generate a cipher seed.
pub fn seed() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>()
}

/// Generate a schedule as `(lead, duration)` millisecond offsets, both
/// strictly positive and small enough to never overflow the epoch.
pub fn schedule_offsets() -> impl Strategy<Value = (i64, i64)> {
    (1i64..=86_400_000, 1i64..=86_400_000)
}

/// Run an async property body on a private runtime.
///
/// Proptest closures are synchronous, so each case spins up its own
/// current-thread runtime.
pub fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime")
        .block_on(fut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{voters, TestFixture};
    use tallyvault::Clock;

    proptest! {
        /// Revealed totals conserve ballots: every accepted ballot
        /// lands in exactly one counter.
        #[test]
        fn test_totals_conserve_accepted_ballots(
            seed in seed(),
            choices in ballots(12),
        ) {
            block_on(async {
                let fx = TestFixture::with_seed(seed);
                let id = fx.schedule("conservation").await.unwrap();
                fx.open_window();

                let vs = voters(choices.len());
                let expected_yes = choices.iter().filter(|c| **c).count() as u64;
                for (voter, choice) in vs.iter().zip(&choices) {
                    fx.cast(id, *voter, *choice).await.unwrap();
                }

                fx.elapse_window();
                let result = fx.close(id).await.unwrap();

                prop_assert_eq!(result.yes_count, expected_yes);
                prop_assert_eq!(result.no_count, choices.len() as u64 - expected_yes);
                prop_assert_eq!(
                    result.yes_count + result.no_count,
                    choices.len() as u64
                );
                Ok(())
            })?;
        }

        /// Repeat ballots from one voter never move the totals.
        #[test]
        fn test_repeat_ballots_are_inert(
            seed in seed(),
            first in any::<bool>(),
            retries in prop::collection::vec(any::<bool>(), 1..=5),
        ) {
            block_on(async {
                let fx = TestFixture::with_seed(seed);
                let id = fx.schedule("single use").await.unwrap();
                fx.open_window();

                let voter = Principal::derive("repeat-voter");
                fx.cast(id, voter, first).await.unwrap();
                for retry in retries {
                    prop_assert!(fx.cast(id, voter, retry).await.is_err());
                }

                fx.elapse_window();
                let result = fx.close(id).await.unwrap();
                prop_assert_eq!(result.yes_count + result.no_count, 1);
                prop_assert_eq!(result.yes_count, first as u64);
                Ok(())
            })?;
        }

        /// Ballots sealing a plaintext outside {0, 1} contribute to
        /// neither counter, whatever the plaintext.
        #[test]
        fn test_out_of_domain_ballots_count_nowhere(
            seed in seed(),
            forged in 2u64..,
        ) {
            block_on(async {
                let fx = TestFixture::with_seed(seed);
                let id = fx.schedule("normalization").await.unwrap();
                fx.open_window();

                let honest = Principal::derive("honest");
                let faulty = Principal::derive("faulty");
                fx.cast(id, honest, true).await.unwrap();

                let (raw, proof) = fx.engine.cipher().forge_ballot(forged).unwrap();
                fx.engine.cast_vote(faulty, id, &raw, &proof).await.unwrap();

                fx.elapse_window();
                let result = fx.close(id).await.unwrap();
                prop_assert_eq!((result.yes_count, result.no_count), (1, 0));
                Ok(())
            })?;
        }

        /// Scheduling succeeds for any strictly positive lead and
        /// duration, and the stored window matches.
        #[test]
        fn test_any_positive_schedule_is_accepted(
            seed in seed(),
            (lead, duration) in schedule_offsets(),
        ) {
            block_on(async {
                let fx = TestFixture::with_seed(seed);
                let start = fx.clock.now() + lead;
                let id = fx
                    .engine
                    .create_proposal(fx.authority, "window", "", start, duration)
                    .await
                    .unwrap();

                let view = fx.engine.get_proposal(id).await.unwrap();
                prop_assert_eq!(view.proposal.start_time, start);
                prop_assert_eq!(view.proposal.end_time, start + duration);
                Ok(())
            })?;
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Principals survive the hex round trip.
        #[test]
        fn test_principal_hex_round_trip(p in principal()) {
            let hex = p.to_hex();
            prop_assert_eq!(Principal::from_hex(&hex).unwrap(), p);
        }
    }
}
