//! The encrypted ballot accumulator.
//!
//! One pair of ciphertext counters per proposal, only ever touched by
//! the select-then-add update rule below. Counters are never read in
//! plaintext until the authority closes the proposal.

use tallyvault_cipher::{CipherEngine, CipherError, CipherId, Ciphertext};

/// Running encrypted (yes, no) counters for one proposal.
#[derive(Debug, Clone)]
pub struct EncryptedTally {
    pub yes: Ciphertext,
    pub no: Ciphertext,
}

impl EncryptedTally {
    /// Initialize both counters to encrypted zero.
    pub async fn zeroed<C: CipherEngine + ?Sized>(cipher: &C) -> Result<Self, CipherError> {
        Ok(Self {
            yes: cipher.encrypt_zero().await?,
            no: cipher.encrypt_zero().await?,
        })
    }

    /// Fold one imported ballot into the counters, returning the
    /// updated tally. The caller commits the result, which keeps the
    /// operation all-or-nothing.
    ///
    /// The raw ballot is never added directly. The proof step bounds
    /// its plaintext domain by protocol only, so the arithmetic here
    /// normalizes it: homomorphic equality against the yes and no
    /// encodings, then a conditional select of an encrypted 0 or 1
    /// for each counter. A ballot can never land in both counters or
    /// carry a weight other than one; a plaintext outside {0, 1}
    /// contributes to neither.
    pub async fn absorb<C: CipherEngine + ?Sized>(
        &self,
        cipher: &C,
        ballot: &Ciphertext,
    ) -> Result<Self, CipherError> {
        let yes_code = cipher.encrypt(1).await?;
        let no_code = cipher.encrypt(0).await?;

        let is_yes = cipher.equals(ballot, &yes_code).await?;
        let is_no = cipher.equals(ballot, &no_code).await?;

        let one = cipher.encrypt(1).await?;
        let zero = cipher.encrypt(0).await?;

        let yes_inc = cipher.select(&is_yes, &one, &zero).await?;
        let no_inc = cipher.select(&is_no, &one, &zero).await?;

        Ok(Self {
            yes: cipher.add(&self.yes, &yes_inc).await?,
            no: cipher.add(&self.no, &no_inc).await?,
        })
    }

    /// Content ids of both counters, for grant bookkeeping.
    pub fn counter_ids(&self) -> [CipherId; 2] {
        [self.yes.id(), self.no.id()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallyvault_cipher::MockCipherEngine;
    use tallyvault_core::Principal;

    async fn reveal(eng: &MockCipherEngine, tally: &EncryptedTally) -> (u64, u64) {
        let reader = Principal::derive("reader");
        eng.grant_access(&tally.yes, reader).await.unwrap();
        eng.grant_access(&tally.no, reader).await.unwrap();
        (
            eng.decrypt(&tally.yes, reader).await.unwrap(),
            eng.decrypt(&tally.no, reader).await.unwrap(),
        )
    }

    async fn import(eng: &MockCipherEngine, choice: bool) -> Ciphertext {
        let (raw, proof) = eng.seal_ballot(choice).unwrap();
        eng.import_external(&raw, &proof).await.unwrap()
    }

    #[tokio::test]
    async fn test_zeroed_tally_reveals_zero() {
        let eng = MockCipherEngine::from_seed([1; 32]);
        let tally = EncryptedTally::zeroed(&eng).await.unwrap();
        assert_eq!(reveal(&eng, &tally).await, (0, 0));
    }

    #[tokio::test]
    async fn test_absorb_counts_each_side_once() {
        let eng = MockCipherEngine::from_seed([2; 32]);
        let mut tally = EncryptedTally::zeroed(&eng).await.unwrap();

        for choice in [true, false, true] {
            let ballot = import(&eng, choice).await;
            tally = tally.absorb(&eng, &ballot).await.unwrap();
        }

        assert_eq!(reveal(&eng, &tally).await, (2, 1));
    }

    #[tokio::test]
    async fn test_absorb_yields_fresh_counter_ids() {
        let eng = MockCipherEngine::from_seed([3; 32]);
        let tally = EncryptedTally::zeroed(&eng).await.unwrap();
        let before = tally.counter_ids();

        let ballot = import(&eng, true).await;
        let updated = tally.absorb(&eng, &ballot).await.unwrap();

        assert_ne!(updated.counter_ids(), before);
    }

    #[tokio::test]
    async fn test_out_of_domain_ballot_counts_toward_neither() {
        let eng = MockCipherEngine::from_seed([4; 32]);
        let tally = EncryptedTally::zeroed(&eng).await.unwrap();

        let (raw, proof) = eng.forge_ballot(7).unwrap();
        let ballot = eng.import_external(&raw, &proof).await.unwrap();
        let updated = tally.absorb(&eng, &ballot).await.unwrap();

        assert_eq!(reveal(&eng, &updated).await, (0, 0));
    }
}
