//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{resolve_store_dir, Settings};
use crate::errors::{PassboxError, Result};
use crate::vault::{read_pair, write_pair, PasswordStore, StorePaths};

/// Environment variable consulted before prompting for the passphrase.
pub const PASSPHRASE_ENV: &str = "PASSBOX_PASSPHRASE";

/// Environment variable consulted before prompting for a new passphrase.
pub const NEW_PASSPHRASE_ENV: &str = "PASSBOX_NEW_PASSPHRASE";

/// Upper bound for generated password length.
const MAX_GENERATED_LEN: usize = 4096;

/// Upper bound for label length.
const MAX_LABEL_LEN: usize = 256;

/// passbox: a passphrase-locked local password store.
#[derive(Parser)]
#[command(
    name = "passbox",
    about = "Passphrase-locked local password store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store directory (default: ~/.passbox)
    #[arg(long, env = "PASSBOX_DIR", global = true)]
    pub store_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// List all labels
    List,

    /// Show the password stored under a label
    Show {
        /// Entry label
        label: String,
    },

    /// Generate a password and store it under a label
    Add {
        /// Entry label
        label: String,
        /// Password length (default from config, 20)
        length: Option<usize>,
    },

    /// Store a password you supply (piped stdin or prompt)
    Set {
        /// Entry label
        label: String,
    },

    /// Remove an entry
    Remove {
        /// Entry label
        label: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Re-seal the store under a new passphrase
    UpdateKey,

    /// Print a random password without storing it
    Generate {
        /// Password length (default from config, 20)
        length: Option<usize>,
    },

    /// View the audit log of store operations
    #[cfg(feature = "audit-log")]
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Where the store lives and how it is laid out, resolved once per run.
pub struct StoreContext {
    pub store_dir: PathBuf,
    pub settings: Settings,
    pub paths: StorePaths,
}

impl StoreContext {
    /// Resolve the store directory and load its `config.toml`.
    pub fn load(cli: &Cli) -> Result<Self> {
        let store_dir = resolve_store_dir(cli.store_dir.as_deref());
        let settings = Settings::load(&store_dir)?;
        let paths = settings.store_paths(&store_dir);
        Ok(Self {
            store_dir,
            settings,
            paths,
        })
    }

    /// Which prompt `unlock` shows: a store that does not exist yet gets
    /// its passphrase chosen here, so it must be typed twice.
    pub fn passphrase_prompt(&self) -> PassphrasePrompt {
        if self.paths.any_exists() {
            PassphrasePrompt::Unlock
        } else {
            PassphrasePrompt::Create
        }
    }

    /// Prompt for the passphrase and unlock the store from disk.
    ///
    /// Returns the passphrase too so the caller can re-seal with it.
    pub fn unlock(&self) -> Result<(PasswordStore, Zeroizing<String>)> {
        let passphrase = prompt_passphrase(self.passphrase_prompt())?;
        let (blob, nonce) = read_pair(&self.paths)?;
        let store = PasswordStore::open(&blob, &nonce, passphrase.as_bytes())?;
        Ok((store, passphrase))
    }

    /// Seal the store under `passphrase` and write both files.
    pub fn persist(&self, store: &PasswordStore, passphrase: &[u8]) -> Result<()> {
        let sealed = store.seal(passphrase)?;
        write_pair(&self.paths, &sealed)
    }

    /// Record an operation in the audit log (no-op without `audit-log`).
    pub fn audit(&self, op: &str, label: Option<&str>, details: Option<&str>) {
        #[cfg(feature = "audit-log")]
        crate::audit::log_audit(&self.store_dir, op, label, details);

        #[cfg(not(feature = "audit-log"))]
        let _ = (op, label, details);
    }
}

/// How the store passphrase is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassphrasePrompt {
    /// Existing store: ask once.
    Unlock,
    /// New store: ask twice and require both to match.
    Create,
}

/// Get the store passphrase, trying in order:
/// 1. `PASSBOX_PASSPHRASE` env var (scripts, tests)
/// 2. Interactive masked prompt, confirmed when creating a store
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase(kind: PassphrasePrompt) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSPHRASE_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let mut prompt = dialoguer::Password::new();
    match kind {
        PassphrasePrompt::Unlock => {
            prompt = prompt.with_prompt("Passphrase");
        }
        PassphrasePrompt::Create => {
            prompt = prompt
                .with_prompt("Choose a passphrase for the new store")
                .with_confirmation("Repeat passphrase", "Passphrases do not match, try again");
        }
    }
    let pw = prompt
        .interact()
        .map_err(|e| PassboxError::CommandFailed(format!("passphrase prompt: {e}")))?;
    non_empty(Zeroizing::new(pw))
}

/// Prompt for a new passphrase with confirmation (used by `update-key`).
///
/// Also respects `PASSBOX_NEW_PASSPHRASE` for scripted usage.
pub fn prompt_new_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(NEW_PASSPHRASE_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("New passphrase")
        .with_confirmation(
            "Repeat new passphrase",
            "Passphrases do not match, try again",
        )
        .interact()
        .map_err(|e| PassboxError::CommandFailed(format!("passphrase prompt: {e}")))?;
    non_empty(Zeroizing::new(pw))
}

fn non_empty(pw: Zeroizing<String>) -> Result<Zeroizing<String>> {
    if pw.is_empty() {
        return Err(PassboxError::EmptyPassphrase);
    }
    Ok(pw)
}

/// Validate that a label is usable on the command line.
///
/// Must be non-empty, at most 256 bytes, and free of control characters.
pub fn validate_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(PassboxError::CommandFailed("label cannot be empty".into()));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(PassboxError::CommandFailed(format!(
            "label cannot exceed {MAX_LABEL_LEN} bytes"
        )));
    }
    if label.chars().any(char::is_control) {
        return Err(PassboxError::CommandFailed(format!(
            "label '{}' contains control characters",
            label.escape_debug()
        )));
    }
    Ok(())
}

/// Pick the password length: explicit value or the configured default.
pub fn resolve_length(explicit: Option<usize>, settings: &Settings) -> Result<usize> {
    let len = explicit.unwrap_or(settings.default_length);
    if len == 0 || len > MAX_GENERATED_LEN {
        return Err(PassboxError::CommandFailed(format!(
            "password length must be between 1 and {MAX_GENERATED_LEN} (got {len})"
        )));
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &std::path::Path) -> StoreContext {
        let settings = Settings::default();
        let paths = settings.store_paths(dir);
        StoreContext {
            store_dir: dir.to_path_buf(),
            settings,
            paths,
        }
    }

    #[test]
    fn new_store_asks_for_confirmed_passphrase() {
        let tmp = tempfile::TempDir::new().unwrap();
        let ctx = context_in(tmp.path());
        assert_eq!(ctx.passphrase_prompt(), PassphrasePrompt::Create);
    }

    #[test]
    fn existing_store_asks_once() {
        let tmp = tempfile::TempDir::new().unwrap();
        let ctx = context_in(tmp.path());
        std::fs::write(&ctx.paths.blob, b"x").unwrap();
        assert_eq!(ctx.passphrase_prompt(), PassphrasePrompt::Unlock);
    }

    #[test]
    fn half_written_store_is_not_treated_as_new() {
        let tmp = tempfile::TempDir::new().unwrap();
        let ctx = context_in(tmp.path());
        std::fs::write(&ctx.paths.nonce, [0u8; 12]).unwrap();
        assert_eq!(ctx.passphrase_prompt(), PassphrasePrompt::Unlock);
    }

    #[test]
    fn valid_labels() {
        assert!(validate_label("email").is_ok());
        assert!(validate_label("bank/checking").is_ok());
        assert!(validate_label("wifi home 5G").is_ok());
    }

    #[test]
    fn rejects_empty_label() {
        assert!(validate_label("").is_err());
    }

    #[test]
    fn rejects_control_characters() {
        assert!(validate_label("bad\nlabel").is_err());
        assert!(validate_label("tab\there").is_err());
    }

    #[test]
    fn rejects_too_long_label() {
        assert!(validate_label(&"a".repeat(257)).is_err());
    }

    #[test]
    fn length_falls_back_to_settings() {
        let settings = Settings::default();
        assert_eq!(resolve_length(None, &settings).unwrap(), 20);
        assert_eq!(resolve_length(Some(8), &settings).unwrap(), 8);
    }

    #[test]
    fn length_zero_rejected() {
        assert!(resolve_length(Some(0), &Settings::default()).is_err());
        assert!(resolve_length(Some(MAX_GENERATED_LEN + 1), &Settings::default()).is_err());
    }
}
