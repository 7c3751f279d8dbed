//! The ciphertext capability trait.
//!
//! The ballot engine consumes homomorphic encryption through this
//! boundary and never looks inside a ciphertext. Any concrete
//! homomorphic backend (an FHE library, an MPC co-processor, the
//! in-process reference engine) plugs in behind it.

use async_trait::async_trait;
use tallyvault_core::Principal;

use crate::error::Result;
use crate::handle::{BoolCiphertext, Ciphertext};

/// Capability set over opaque encrypted integers.
///
/// # Design Notes
///
/// - Homomorphic results are fresh ciphertexts with fresh ids; callers
///   that track decrypt grants must re-grant after every update.
/// - `decrypt` is authority-gated: it fails with `AccessDenied` unless
///   a prior `grant_access` covered the (ciphertext, principal) pair.
/// - All methods are async because real backends are remote or
///   hardware-bound; the reference engine resolves immediately.
#[async_trait]
pub trait CipherEngine: Send + Sync {
    /// Encrypt a plaintext integer under the engine's own key.
    async fn encrypt(&self, value: u64) -> Result<Ciphertext>;

    /// Encrypt zero; the initial value of every tally counter.
    async fn encrypt_zero(&self) -> Result<Ciphertext> {
        self.encrypt(0).await
    }

    /// Homomorphic addition.
    async fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext>;

    /// Homomorphic equality; the result encrypts 1 if equal, else 0.
    async fn equals(&self, a: &Ciphertext, b: &Ciphertext) -> Result<BoolCiphertext>;

    /// Homomorphic conditional select: `cond ? if_true : if_false`.
    async fn select(
        &self,
        cond: &BoolCiphertext,
        if_true: &Ciphertext,
        if_false: &Ciphertext,
    ) -> Result<Ciphertext>;

    /// Import an externally encrypted ballot.
    ///
    /// `proof` must attest that `raw` was correctly formed and encodes
    /// a value in the permitted ballot domain; fails with
    /// `InvalidProof` otherwise.
    async fn import_external(&self, raw: &[u8], proof: &[u8]) -> Result<Ciphertext>;

    /// Permit `principal` to decrypt `ct`. Idempotent.
    async fn grant_access(&self, ct: &Ciphertext, principal: Principal) -> Result<()>;

    /// Decrypt to plaintext. Requires a prior grant for `principal`.
    async fn decrypt(&self, ct: &Ciphertext, principal: Principal) -> Result<u64>;
}
