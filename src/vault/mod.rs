//! Vault module: the encrypted password store and its files.
//!
//! This module provides:
//! - `PasswordStore`, the in-memory map with `open`/`seal` (`store`)
//! - The blob + nonce file pair on disk (`files`)

pub mod files;
pub mod store;

// Re-export the most commonly used items.
pub use files::{read_pair, write_pair, StorePaths};
pub use store::PasswordStore;
