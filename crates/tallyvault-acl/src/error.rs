//! Error types for the access control ledger.

use tallyvault_core::Principal;
use thiserror::Error;

/// Errors raised by ledger checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AclError {
    #[error("caller {caller} is not the authority")]
    Unauthorized { caller: Principal },
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, AclError>;
