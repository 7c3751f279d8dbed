//! In-process reference implementation of the capability.
//!
//! Ciphertext bodies are ChaCha20-Poly1305 seals of the little-endian
//! plaintext under a key the engine holds; ballot proofs are keyed
//! blake3 MACs issued by the sealing helper. Homomorphic operations
//! open, compute, and re-seal with a fresh nonce.
//!
//! This models the capability contract faithfully (opaque handles,
//! grant-gated decrypt, proof-checked import) but is NOT a homomorphic
//! cryptosystem: the process holding the engine can open anything.
//! Use it for tests and demos only.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;
use tallyvault_core::Principal;

use crate::engine::CipherEngine;
use crate::error::{CipherError, Result};
use crate::handle::{BoolCiphertext, CipherId, Ciphertext};

/// Reference cipher engine backed by AEAD under a process-local key.
pub struct MockCipherEngine {
    aead_key: [u8; 32],
    proof_key: [u8; 32],
    grants: RwLock<HashMap<CipherId, BTreeSet<Principal>>>,
}

impl MockCipherEngine {
    /// Create an engine with random keys.
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        Self::from_seed(seed)
    }

    /// Create an engine with keys derived from a seed, for
    /// deterministic tests.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            aead_key: blake3::derive_key("tallyvault-v0-mock-aead", &seed),
            proof_key: blake3::derive_key("tallyvault-v0-mock-proof", &seed),
            grants: RwLock::new(HashMap::new()),
        }
    }

    fn seal(&self, value: u64) -> Result<Ciphertext> {
        let mut nonce = [0u8; 12];
        rand::thread_rng().fill_bytes(&mut nonce);

        let cipher = ChaCha20Poly1305::new_from_slice(&self.aead_key)
            .map_err(|e| CipherError::Malformed(e.to_string()))?;
        let body = cipher
            .encrypt(Nonce::from_slice(&nonce), value.to_le_bytes().as_ref())
            .map_err(|e| CipherError::Malformed(e.to_string()))?;

        Ok(Ciphertext::from_parts(nonce, Bytes::from(body)))
    }

    fn open(&self, ct: &Ciphertext) -> Result<u64> {
        let cipher = ChaCha20Poly1305::new_from_slice(&self.aead_key)
            .map_err(|e| CipherError::Malformed(e.to_string()))?;
        let plain = cipher
            .decrypt(Nonce::from_slice(&ct.nonce), ct.body.as_ref())
            .map_err(|_| CipherError::Malformed("AEAD open failed".to_string()))?;

        let bytes: [u8; 8] = plain
            .as_slice()
            .try_into()
            .map_err(|_| CipherError::Malformed("plaintext is not 8 bytes".to_string()))?;
        Ok(u64::from_le_bytes(bytes))
    }

    fn proof_for(&self, raw: &[u8]) -> blake3::Hash {
        blake3::keyed_hash(&self.proof_key, raw)
    }

    /// Seal a well-formed yes/no ballot and issue its validity proof.
    ///
    /// Returns `(raw, proof)` as submitted by a voter. The typed
    /// `bool` is what keeps honest proofs inside the `{0, 1}` domain.
    pub fn seal_ballot(&self, choice: bool) -> Result<(Vec<u8>, Vec<u8>)> {
        let raw = self.seal(choice as u64)?.to_wire();
        let proof = self.proof_for(&raw).as_bytes().to_vec();
        Ok((raw, proof))
    }

    /// Seal an arbitrary plaintext and issue a proof for it anyway.
    ///
    /// Models a faulty prover that attests an out-of-domain value.
    /// Exists so tests can exercise the accumulator's defensive
    /// normalization; real provers never issue such proofs.
    pub fn forge_ballot(&self, value: u64) -> Result<(Vec<u8>, Vec<u8>)> {
        let raw = self.seal(value)?.to_wire();
        let proof = self.proof_for(&raw).as_bytes().to_vec();
        Ok((raw, proof))
    }
}

impl Default for MockCipherEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CipherEngine for MockCipherEngine {
    async fn encrypt(&self, value: u64) -> Result<Ciphertext> {
        self.seal(value)
    }

    async fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        let sum = self.open(a)?.wrapping_add(self.open(b)?);
        self.seal(sum)
    }

    async fn equals(&self, a: &Ciphertext, b: &Ciphertext) -> Result<BoolCiphertext> {
        let eq = self.open(a)? == self.open(b)?;
        Ok(BoolCiphertext(self.seal(eq as u64)?))
    }

    async fn select(
        &self,
        cond: &BoolCiphertext,
        if_true: &Ciphertext,
        if_false: &Ciphertext,
    ) -> Result<Ciphertext> {
        let chosen = if self.open(&cond.0)? != 0 {
            self.open(if_true)?
        } else {
            self.open(if_false)?
        };
        self.seal(chosen)
    }

    async fn import_external(&self, raw: &[u8], proof: &[u8]) -> Result<Ciphertext> {
        let expected = self.proof_for(raw);
        let provided: [u8; 32] = proof.try_into().map_err(|_| CipherError::InvalidProof)?;
        // blake3::Hash equality is constant-time.
        if expected != blake3::Hash::from_bytes(provided) {
            return Err(CipherError::InvalidProof);
        }

        let ct = Ciphertext::from_wire(raw)
            .ok_or_else(|| CipherError::Malformed("ballot wire form too short".to_string()))?;
        // Proof covers the raw bytes, so the AEAD open must succeed.
        self.open(&ct)?;
        Ok(ct)
    }

    async fn grant_access(&self, ct: &Ciphertext, principal: Principal) -> Result<()> {
        let mut grants = self.grants.write().expect("grants lock poisoned");
        grants.entry(ct.id()).or_default().insert(principal);
        Ok(())
    }

    async fn decrypt(&self, ct: &Ciphertext, principal: Principal) -> Result<u64> {
        {
            let grants = self.grants.read().expect("grants lock poisoned");
            let allowed = grants
                .get(&ct.id())
                .map(|set| set.contains(&principal))
                .unwrap_or(false);
            if !allowed {
                return Err(CipherError::AccessDenied {
                    id: ct.id(),
                    principal,
                });
            }
        }
        self.open(ct)
    }
}
