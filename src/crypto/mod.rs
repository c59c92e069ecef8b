//! Cryptographic primitives for passbox.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption with a detached nonce (`encryption`)
//! - Passphrase → 32-byte key normalization (`keys`)

pub mod encryption;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, SymmetricKey, ...};
pub use encryption::{decrypt, encrypt, Sealed, NONCE_LEN};
pub use keys::{normalize_key, SymmetricKey, KEY_LEN};
