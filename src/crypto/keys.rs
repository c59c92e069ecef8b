//! Passphrase → AES-256 key normalization.
//!
//! The key is the passphrase itself, cut or zero-padded to 32 bytes.
//! This is *not* a key-derivation function: there is no salt and no
//! stretching, and two passphrases that agree on their first 32 bytes
//! produce the same key.  It is kept byte-for-byte compatible with
//! stores written by earlier versions of the tool.

use zeroize::Zeroize;

/// Length of the AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// Map an arbitrary-length passphrase onto exactly `KEY_LEN` bytes.
///
/// - longer than 32 bytes: the first 32 bytes are kept
/// - shorter than 32 bytes: right-padded with `0x00`
/// - exactly 32 bytes: returned unchanged
///
/// Total over every input, including the empty slice.
pub fn normalize_key(raw: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    let take = raw.len().min(KEY_LEN);
    key[..take].copy_from_slice(&raw[..take]);
    key
}

/// A 32-byte symmetric key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct SymmetricKey {
    bytes: [u8; KEY_LEN],
}

impl SymmetricKey {
    /// Create a key from already-normalized bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Normalize a raw passphrase into a key.
    pub fn from_passphrase(raw: &[u8]) -> Self {
        let mut bytes = normalize_key(raw);
        let key = Self::new(bytes);
        bytes.zeroize();
        key
    }

    /// Access the raw key bytes (e.g. to build the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
