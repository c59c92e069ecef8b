//! `passbox show`: print the password stored under a label.

use crate::cli::{validate_label, Cli, StoreContext};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, label: &str) -> Result<()> {
    validate_label(label)?;

    let ctx = StoreContext::load(cli)?;
    let (store, _passphrase) = ctx.unlock()?;

    // Print only the password so the output can be piped.
    println!("{}", store.get(label)?);

    Ok(())
}
