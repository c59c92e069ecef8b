//! `passbox add`: generate a password and store it under a label.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{resolve_length, validate_label, Cli, StoreContext};
use crate::errors::Result;
use crate::generator;

/// Execute the `add` command.
pub fn execute(cli: &Cli, label: &str, length: Option<usize>) -> Result<()> {
    validate_label(label)?;

    let ctx = StoreContext::load(cli)?;
    let len = resolve_length(length, &ctx.settings)?;

    let fresh = !ctx.paths.any_exists();
    let (mut store, passphrase) = ctx.unlock()?;

    let password = Zeroizing::new(generator::generate(len));
    let existed = store.contains(label);
    store.put(label, &password);
    ctx.persist(&store, passphrase.as_bytes())?;

    let op_detail = format!("generated {len} chars");
    ctx.audit("add", Some(label), Some(&op_detail));

    // The password goes first on stdout so it can be captured with `head -1`.
    println!("{}", password.as_str());
    if fresh {
        output::info(&format!("Created new store in {}", ctx.store_dir.display()));
    }
    if existed {
        output::warning(&format!("Replaced existing password for '{label}'"));
    }
    output::success(&format!(
        "Stored '{}' ({} total)",
        label,
        store.len()
    ));

    Ok(())
}
