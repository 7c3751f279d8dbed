//! The access control ledger.
//!
//! Two concerns live here: the single authority principal (set once at
//! initialization, immutable thereafter) and the auditable record of
//! which principals may request plaintext disclosure of which
//! ciphertexts. The underlying scheme requires explicit delegation
//! before any principal, the engine's own revealer role included, may
//! decrypt; centralizing that bookkeeping keeps the accumulator and
//! revealer from duplicating access logic.

use std::collections::{BTreeSet, HashMap};

use tallyvault_cipher::CipherId;
use tallyvault_core::Principal;

use crate::error::{AclError, Result};

/// Authority role plus per-ciphertext decrypt grants.
#[derive(Debug)]
pub struct AccessLedger {
    authority: Principal,
    grants: HashMap<CipherId, BTreeSet<Principal>>,
}

impl AccessLedger {
    /// Create a ledger with the designated authority.
    pub fn new(authority: Principal) -> Self {
        Self {
            authority,
            grants: HashMap::new(),
        }
    }

    /// The designated authority.
    pub fn authority(&self) -> Principal {
        self.authority
    }

    /// Fail unless `caller` is the authority.
    pub fn require_authority(&self, caller: Principal) -> Result<()> {
        if caller != self.authority {
            return Err(AclError::Unauthorized { caller });
        }
        Ok(())
    }

    /// Record that `principal` may request disclosure of `id`.
    ///
    /// Idempotent: returns true only when the grant is new.
    pub fn record_grant(&mut self, id: CipherId, principal: Principal) -> bool {
        self.grants.entry(id).or_default().insert(principal)
    }

    /// Whether a disclosure grant is on record.
    pub fn is_granted(&self, id: &CipherId, principal: &Principal) -> bool {
        self.grants
            .get(id)
            .map(|set| set.contains(principal))
            .unwrap_or(false)
    }

    /// All principals granted disclosure of `id`, in stable order.
    pub fn grants_for(&self, id: &CipherId) -> Vec<Principal> {
        self.grants
            .get(id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(byte: u8) -> CipherId {
        CipherId::from_bytes([byte; 32])
    }

    #[test]
    fn test_require_authority() {
        let authority = Principal::derive("authority");
        let stranger = Principal::derive("stranger");
        let ledger = AccessLedger::new(authority);

        assert!(ledger.require_authority(authority).is_ok());
        assert_eq!(
            ledger.require_authority(stranger),
            Err(AclError::Unauthorized { caller: stranger })
        );
    }

    #[test]
    fn test_record_grant_idempotent() {
        let mut ledger = AccessLedger::new(Principal::derive("authority"));
        let alice = Principal::derive("alice");

        assert!(ledger.record_grant(cid(1), alice));
        assert!(!ledger.record_grant(cid(1), alice));
        assert!(ledger.is_granted(&cid(1), &alice));
    }

    #[test]
    fn test_grants_are_per_ciphertext() {
        let mut ledger = AccessLedger::new(Principal::derive("authority"));
        let alice = Principal::derive("alice");

        ledger.record_grant(cid(1), alice);

        assert!(ledger.is_granted(&cid(1), &alice));
        assert!(!ledger.is_granted(&cid(2), &alice));
    }

    #[test]
    fn test_grants_for_lists_all_principals() {
        let mut ledger = AccessLedger::new(Principal::derive("authority"));
        let alice = Principal::derive("alice");
        let bob = Principal::derive("bob");

        ledger.record_grant(cid(1), alice);
        ledger.record_grant(cid(1), bob);

        let listed = ledger.grants_for(&cid(1));
        assert_eq!(listed.len(), 2);
        assert!(listed.contains(&alice));
        assert!(listed.contains(&bob));
        assert!(ledger.grants_for(&cid(9)).is_empty());
    }
}
