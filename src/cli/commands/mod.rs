//! One module per subcommand, each exposing an `execute` function.

pub mod add;
#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod completions;
pub mod generate;
pub mod list;
pub mod remove;
pub mod set;
pub mod show;
pub mod update_key;
