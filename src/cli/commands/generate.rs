//! `passbox generate`: print a random password without storing it.

use crate::cli::{resolve_length, Cli, StoreContext};
use crate::errors::Result;
use crate::generator;

/// Execute the `generate` command.
pub fn execute(cli: &Cli, length: Option<usize>) -> Result<()> {
    // Only the config is needed here; the store stays locked.
    let ctx = StoreContext::load(cli)?;
    let len = resolve_length(length, &ctx.settings)?;

    println!("{}", generator::generate(len));

    Ok(())
}
