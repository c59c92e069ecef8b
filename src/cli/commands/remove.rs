//! `passbox remove`: delete an entry from the store.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{validate_label, Cli, StoreContext};
use crate::errors::{PassboxError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, label: &str, force: bool) -> Result<()> {
    validate_label(label)?;

    let ctx = StoreContext::load(cli)?;
    let (mut store, passphrase) = ctx.unlock()?;

    // Fail on a missing label before asking for confirmation.
    if !store.contains(label) {
        return Err(PassboxError::EntryNotFound(label.to_string()));
    }

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove '{label}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassboxError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.remove(label)?;
    ctx.persist(&store, passphrase.as_bytes())?;

    ctx.audit("remove", Some(label), None);
    output::success(&format!("Removed '{label}'"));

    Ok(())
}
