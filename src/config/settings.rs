use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PassboxError, Result};
use crate::vault::StorePaths;

/// Store-level configuration, loaded from `<store_dir>/config.toml`.
///
/// Every field has a sensible default so passbox works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// File name of the encrypted blob inside the store directory.
    #[serde(default = "default_blob_file")]
    pub blob_file: String,

    /// File name of the nonce inside the store directory.
    #[serde(default = "default_nonce_file")]
    pub nonce_file: String,

    /// Length used by `add` and `generate` when none is given.
    #[serde(default = "default_length")]
    pub default_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_blob_file() -> String {
    "passwd.db".to_string()
}

fn default_nonce_file() -> String {
    "nonce".to_string()
}

fn default_length() -> usize {
    20
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            blob_file: default_blob_file(),
            nonce_file: default_nonce_file(),
            default_length: default_length(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the store directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<store_dir>/config.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(store_dir: &Path) -> Result<Self> {
        let config_path = store_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassboxError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        validate_file_name("blob_file", &settings.blob_file)?;
        validate_file_name("nonce_file", &settings.nonce_file)?;
        if settings.blob_file == settings.nonce_file {
            return Err(PassboxError::ConfigError(format!(
                "blob_file and nonce_file must differ (both are '{}')",
                settings.blob_file
            )));
        }

        Ok(settings)
    }

    /// Build the blob + nonce paths inside `store_dir`.
    ///
    /// Example: `~/.passbox/passwd.db` and `~/.passbox/nonce`
    pub fn store_paths(&self, store_dir: &Path) -> StorePaths {
        StorePaths {
            blob: store_dir.join(&self.blob_file),
            nonce: store_dir.join(&self.nonce_file),
        }
    }
}

/// Names the store directory already uses for its own files.
const RESERVED_NAMES: [&str; 2] = [Settings::FILE_NAME, "audit.db"];

/// A store file name must be a plain name that stays inside the store
/// directory and does not shadow the config or the audit log.
fn validate_file_name(field: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PassboxError::ConfigError(format!("{field} cannot be empty")));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(PassboxError::ConfigError(format!(
            "{field} '{name}' must be a plain file name inside the store directory"
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(PassboxError::ConfigError(format!(
            "{field} '{}' contains control characters",
            name.escape_debug()
        )));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(PassboxError::ConfigError(format!(
            "{field} '{name}' is reserved by passbox"
        )));
    }
    Ok(())
}

/// Resolve the store directory: explicit value, else `$HOME/.passbox`,
/// else `.passbox` relative to the working directory.
pub fn resolve_store_dir(explicit: Option<&str>) -> PathBuf {
    if let Some(dir) = explicit {
        return PathBuf::from(dir);
    }
    match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(".passbox"),
        _ => PathBuf::from(".passbox"),
    }
}

// ── Tests ────────────────────────────────────────────────────────────
