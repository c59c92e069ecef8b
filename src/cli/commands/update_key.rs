//! `passbox update-key`: re-seal the store under a new passphrase.
//!
//! Unlocks with the current passphrase, then seals the same entries
//! under the new one with a fresh nonce and writes both files.

use subtle::ConstantTimeEq;

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{prompt_new_passphrase, Cli, StoreContext};
use crate::crypto::{normalize_key, KEY_LEN};
use crate::errors::{PassboxError, Result};

/// Execute the `update-key` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = StoreContext::load(cli)?;

    // 1. Open the store with the current passphrase.
    output::info("Enter your current passphrase.");
    let (store, old_passphrase) = ctx.unlock()?;

    // 2. Prompt for the new passphrase (with confirmation).
    output::info("Choose your new passphrase.");
    let new_passphrase = prompt_new_passphrase()?;

    // 3. Refuse a no-op rotation.  Only the first KEY_LEN bytes reach the
    //    cipher, so compare the keys rather than the raw passphrases.
    if same_key(old_passphrase.as_bytes(), new_passphrase.as_bytes()) {
        return Err(PassboxError::SamePassphrase);
    }
    if new_passphrase.len() > KEY_LEN {
        output::warning(&format!(
            "Only the first {KEY_LEN} bytes of the new passphrase are used"
        ));
    }

    // 4. Seal under the new passphrase and write.
    ctx.persist(&store, new_passphrase.as_bytes())?;

    let op_detail = format!("{} entries re-sealed", store.len());
    ctx.audit("update-key", None, Some(&op_detail));

    output::success(&format!(
        "Passphrase updated ({} entries re-sealed)",
        store.len()
    ));

    Ok(())
}

/// `true` when both passphrases normalize to the same key.
fn same_key(old: &[u8], new: &[u8]) -> bool {
    let old_key = Zeroizing::new(normalize_key(old));
    let new_key = Zeroizing::new(normalize_key(new));
    bool::from(old_key.as_slice().ct_eq(new_key.as_slice()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_passphrases_share_a_key() {
        assert!(same_key(b"hunter2", b"hunter2"));
    }

    #[test]
    fn passphrases_differing_past_key_len_share_a_key() {
        let old = format!("{}-old-suffix", "p".repeat(KEY_LEN));
        let new = format!("{}-new-suffix", "p".repeat(KEY_LEN));
        assert!(same_key(old.as_bytes(), new.as_bytes()));
    }

    #[test]
    fn different_passphrases_differ() {
        assert!(!same_key(b"old-pass", b"new-pass"));
    }
}
