//! AES-256-GCM authenticated encryption with a detached nonce.
//!
//! Each call to `encrypt` draws a fresh random 12-byte nonce from the OS
//! RNG.  The nonce is returned next to the ciphertext rather than
//! prepended, because the store keeps the two in separate files.
//!
//! No associated data is authenticated.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};

use super::keys::SymmetricKey;
use crate::errors::{PassboxError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Ciphertext and the nonce it was sealed with.
///
/// The two only make sense together, and only under the key that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    /// Ciphertext followed by the 16-byte auth tag.
    pub blob: Vec<u8>,
    /// The 12-byte nonce used for this encryption.
    pub nonce: Vec<u8>,
}

/// Encrypt `plaintext` under `key` with a freshly generated nonce.
pub fn encrypt(key: &SymmetricKey, plaintext: &[u8]) -> Result<Sealed> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| PassboxError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| PassboxError::RandomnessFailed(e.to_string()))?;

    let blob = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| PassboxError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(Sealed {
        blob,
        nonce: nonce.to_vec(),
    })
}

/// Decrypt and authenticate `blob` with `key` and `nonce`.
///
/// Every failure (bad nonce length, wrong key, altered ciphertext or
/// tag) is reported as `DecryptionFailed`.
pub fn decrypt(key: &SymmetricKey, nonce: &[u8], blob: &[u8]) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN || blob.len() < TAG_LEN {
        return Err(PassboxError::DecryptionFailed);
    }

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| PassboxError::DecryptionFailed)?;

    cipher
        .decrypt(Nonce::from_slice(nonce), blob)
        .map_err(|_| PassboxError::DecryptionFailed)
}
