//! `passbox list`: display all labels in a table.

use crate::cli::output;
use crate::cli::{Cli, StoreContext};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = StoreContext::load(cli)?;
    let (store, _passphrase) = ctx.unlock()?;

    let labels = store.labels();

    output::info(&format!(
        "{} — {} entr{}",
        ctx.store_dir.display(),
        labels.len(),
        if labels.len() == 1 { "y" } else { "ies" }
    ));

    output::print_labels_table(&labels);

    Ok(())
}
