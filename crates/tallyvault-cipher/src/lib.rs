//! # TallyVault Cipher
//!
//! The ciphertext capability boundary: an opaque encrypted-integer
//! handle plus the trait the ballot engine consumes homomorphic
//! encryption through. The engine never sees plaintext; everything it
//! does to a ballot goes through [`CipherEngine`].
//!
//! [`MockCipherEngine`] is the in-process reference backend used by
//! tests and demos. It honors the full contract (proof-checked import,
//! grant-gated decrypt, fresh handles per operation) without being a
//! real homomorphic cryptosystem.

pub mod engine;
pub mod error;
pub mod handle;
pub mod mock;

pub use engine::CipherEngine;
pub use error::{CipherError, Result};
pub use handle::{BoolCiphertext, CipherId, Ciphertext};
pub use mock::MockCipherEngine;
