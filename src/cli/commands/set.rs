//! `passbox set`: store a password supplied by the user.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{validate_label, Cli, StoreContext};
use crate::errors::{PassboxError, Result};

/// Execute the `set` command.
pub fn execute(cli: &Cli, label: &str) -> Result<()> {
    validate_label(label)?;

    let ctx = StoreContext::load(cli)?;

    let fresh = !ctx.paths.any_exists();

    // Unlock first so a wrong passphrase is reported before asking for
    // the new password.
    let (mut store, passphrase) = ctx.unlock()?;

    let password = read_password(label)?;
    if password.is_empty() {
        return Err(PassboxError::CommandFailed("password cannot be empty".into()));
    }

    let existed = store.contains(label);
    store.put(label, &password);
    ctx.persist(&store, passphrase.as_bytes())?;
    if fresh {
        output::info(&format!("Created new store in {}", ctx.store_dir.display()));
    }

    let op_detail = if existed { "updated" } else { "added" };
    ctx.audit("set", Some(label), Some(op_detail));

    output::success(&format!(
        "Password for '{}' {} ({} total)",
        label,
        op_detail,
        store.len()
    ));

    Ok(())
}

/// Read the password from piped stdin, or prompt for it (masked, confirmed).
fn read_password(label: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(['\r', '\n']).to_string();
        return Ok(Zeroizing::new(trimmed));
    }

    let pw = dialoguer::Password::new()
        .with_prompt(format!("Password for {label}"))
        .with_confirmation("Repeat password", "Passwords do not match, try again")
        .interact()
        .map_err(|e| PassboxError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
