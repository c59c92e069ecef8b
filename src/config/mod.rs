//! Configuration: store directory resolution and `config.toml`.

pub mod settings;

pub use settings::{resolve_store_dir, Settings};
