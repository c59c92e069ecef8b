use thiserror::Error;

/// All errors that can occur in passbox.
#[derive(Debug, Error)]
pub enum PassboxError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong passphrase or corrupted store")]
    DecryptionFailed,

    #[error("Random number generator failed: {0}")]
    RandomnessFailed(String),

    #[error("Passphrase cannot be empty")]
    EmptyPassphrase,

    // --- Store errors ---
    #[error("Inconsistent store on disk: {0}")]
    InconsistentState(String),

    #[error("No entry labelled '{0}'")]
    EntryNotFound(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("New passphrase is the same as the current one")]
    SamePassphrase,

    #[error("Audit error: {0}")]
    AuditError(String),
}

impl PassboxError {
    /// True for the failures that mean "this store could not be unlocked".
    ///
    /// Callers must never fall back to an empty store on these.
    pub fn is_unlock_failure(&self) -> bool {
        matches!(
            self,
            Self::DecryptionFailed | Self::InconsistentState(_) | Self::SerializationError(_)
        )
    }
}

/// Convenience type alias for passbox results.
pub type Result<T> = std::result::Result<T, PassboxError>;
