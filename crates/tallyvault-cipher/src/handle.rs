//! Opaque ciphertext handles.
//!
//! A `Ciphertext` is what the engine passes around: content-addressed,
//! cloneable, and meaningless without the capability that produced it.
//! Every homomorphic operation yields a fresh handle with a fresh id,
//! which is why decrypt grants must be re-issued after each update.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte ciphertext identifier, computed from the ciphertext body.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CipherId(pub [u8; 32]);

impl CipherId {
    /// Create a CipherId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for CipherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CipherId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for CipherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// An opaque encrypted integer.
///
/// The payload layout is private to the engine that produced it; the
/// id is stable across clones and is what access grants attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext {
    pub(crate) id: CipherId,
    pub(crate) nonce: [u8; 12],
    pub(crate) body: Bytes,
}

impl Ciphertext {
    pub(crate) fn from_parts(nonce: [u8; 12], body: Bytes) -> Self {
        let id = compute_id(&nonce, &body);
        Self { id, nonce, body }
    }

    /// The content id grants and audit records refer to.
    pub fn id(&self) -> CipherId {
        self.id
    }

    /// Serialize to the external wire form (`nonce || body`).
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.body.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.body);
        out
    }

    /// Parse the external wire form.
    pub(crate) fn from_wire(raw: &[u8]) -> Option<Self> {
        if raw.len() <= 12 {
            return None;
        }
        let mut nonce = [0u8; 12];
        nonce.copy_from_slice(&raw[..12]);
        let body = Bytes::copy_from_slice(&raw[12..]);
        Some(Self::from_parts(nonce, body))
    }
}

/// A ciphertext whose plaintext is known (by construction) to be 0 or 1.
///
/// Produced only by homomorphic equality; consumed by conditional
/// select. The newtype keeps raw imports out of select conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolCiphertext(pub(crate) Ciphertext);

impl BoolCiphertext {
    /// The content id of the underlying ciphertext.
    pub fn id(&self) -> CipherId {
        self.0.id()
    }
}

fn compute_id(nonce: &[u8; 12], body: &[u8]) -> CipherId {
    let mut hasher = blake3::Hasher::new_derive_key("tallyvault-v0-cipher-id");
    hasher.update(nonce);
    hasher.update(body);
    CipherId(*hasher.finalize().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_content_derived() {
        let a = Ciphertext::from_parts([1u8; 12], Bytes::from_static(b"body"));
        let b = Ciphertext::from_parts([1u8; 12], Bytes::from_static(b"body"));
        let c = Ciphertext::from_parts([2u8; 12], Bytes::from_static(b"body"));

        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn test_wire_roundtrip() {
        let ct = Ciphertext::from_parts([7u8; 12], Bytes::from_static(b"payload"));
        let wire = ct.to_wire();
        let recovered = Ciphertext::from_wire(&wire).unwrap();

        assert_eq!(ct, recovered);
        assert_eq!(ct.id(), recovered.id());
    }

    #[test]
    fn test_wire_too_short_rejected() {
        assert!(Ciphertext::from_wire(&[0u8; 12]).is_none());
        assert!(Ciphertext::from_wire(&[]).is_none());
    }
}
