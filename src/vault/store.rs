//! The encrypted password store.
//!
//! `PasswordStore` owns the in-memory label -> password map.  It is
//! built from a `(blob, nonce, passphrase)` triple and exported back to
//! a fresh `(blob, nonce)` pair with `seal`.  It never touches the
//! filesystem; see `vault::files` for that.

use std::collections::{BTreeMap, HashMap};

use zeroize::{Zeroize, Zeroizing};

use crate::crypto::encryption::{decrypt, encrypt, Sealed};
use crate::crypto::keys::SymmetricKey;
use crate::errors::{PassboxError, Result};

/// In-memory label -> password mapping.
///
/// Passwords are wiped from memory when the store is dropped.
#[derive(Default)]
pub struct PasswordStore {
    entries: HashMap<String, String>,
}

impl PasswordStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// An empty store, as used on first run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlock a persisted store.
    ///
    /// - `blob` and `nonce` both empty: nothing has been saved yet, so an
    ///   empty store is returned.
    /// - exactly one of them empty: `InconsistentState`.  A half-present
    ///   pair is never treated as "no data".
    /// - both present: decrypt with the normalized passphrase.  A wrong
    ///   passphrase or any tampering gives `DecryptionFailed`; plaintext
    ///   that is not a label -> password object gives `SerializationError`.
    ///
    /// An empty passphrase is rejected up front with `EmptyPassphrase`.
    pub fn open(blob: &[u8], nonce: &[u8], passphrase: &[u8]) -> Result<Self> {
        if passphrase.is_empty() {
            return Err(PassboxError::EmptyPassphrase);
        }

        match (blob.is_empty(), nonce.is_empty()) {
            (true, true) => Ok(Self::new()),
            (false, true) => Err(PassboxError::InconsistentState(
                "encrypted store exists but its nonce is missing".into(),
            )),
            (true, false) => Err(PassboxError::InconsistentState(
                "nonce exists but the encrypted store is missing".into(),
            )),
            (false, false) => {
                let key = SymmetricKey::from_passphrase(passphrase);
                let plaintext = Zeroizing::new(decrypt(&key, nonce, blob)?);
                let entries = decode_entries(&plaintext)?;
                Ok(Self { entries })
            }
        }
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Insert a password, overwriting any previous value for `label`.
    pub fn put(&mut self, label: &str, password: &str) {
        if let Some(mut old) = self.entries.insert(label.to_string(), password.to_string()) {
            old.zeroize();
        }
    }

    /// Look up the password stored under `label`.
    pub fn get(&self, label: &str) -> Result<&str> {
        self.entries
            .get(label)
            .map(String::as_str)
            .ok_or_else(|| PassboxError::EntryNotFound(label.to_string()))
    }

    /// Remove `label`.  Absence is an error and leaves the map untouched.
    pub fn remove(&mut self, label: &str) -> Result<()> {
        match self.entries.remove(label) {
            Some(mut old) => {
                old.zeroize();
                Ok(())
            }
            None => Err(PassboxError::EntryNotFound(label.to_string())),
        }
    }

    /// All labels, in no particular order.
    pub fn labels(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Returns `true` if an entry exists for `label`.
    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Encrypt the current map under `passphrase` with a fresh nonce.
    ///
    /// Does not modify the store.  Passing a different passphrase from
    /// the one used in `open` rotates the key.
    pub fn seal(&self, passphrase: &[u8]) -> Result<Sealed> {
        if passphrase.is_empty() {
            return Err(PassboxError::EmptyPassphrase);
        }

        let plaintext = self.encode_entries()?;
        let key = SymmetricKey::from_passphrase(passphrase);
        encrypt(&key, &plaintext)
    }

    /// Serialize to a JSON object with keys in sorted order.
    fn encode_entries(&self) -> Result<Zeroizing<Vec<u8>>> {
        let ordered: BTreeMap<&str, &str> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        serde_json::to_vec(&ordered)
            .map(Zeroizing::new)
            .map_err(|e| PassboxError::SerializationError(format!("entries: {e}")))
    }
}

impl Drop for PasswordStore {
    fn drop(&mut self) {
        for value in self.entries.values_mut() {
            value.zeroize();
        }
    }
}

/// Parse decrypted plaintext back into the entry map.
///
/// A JSON `null` is accepted as an empty map.
fn decode_entries(plaintext: &[u8]) -> Result<HashMap<String, String>> {
    let parsed: Option<HashMap<String, String>> = serde_json::from_slice(plaintext)
        .map_err(|e| PassboxError::SerializationError(format!("entries: {e}")))?;
    Ok(parsed.unwrap_or_default())
}
