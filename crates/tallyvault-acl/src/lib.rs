//! # TallyVault ACL
//!
//! Access control ledger: the immutable authority role and the
//! auditable bookkeeping of per-ciphertext decrypt grants.

pub mod error;
pub mod ledger;

pub use error::{AclError, Result};
pub use ledger::AccessLedger;
