//! Error types for the ciphertext capability.

use tallyvault_core::Principal;
use thiserror::Error;

use crate::handle::CipherId;

/// Errors raised by a ciphertext capability.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The validity proof accompanying an external ballot failed.
    #[error("ballot validity proof rejected")]
    InvalidProof,

    /// Decrypt requested without a prior grant.
    #[error("decrypt access denied for principal {principal} on ciphertext {id}")]
    AccessDenied { id: CipherId, principal: Principal },

    /// The ciphertext bytes could not be interpreted.
    #[error("malformed ciphertext: {0}")]
    Malformed(String),
}

/// Result type for capability operations.
pub type Result<T> = std::result::Result<T, CipherError>;
