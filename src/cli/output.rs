//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print labels in a single-column table, sorted.
///
/// The store itself is unordered; sorting happens here, at the display
/// boundary.
pub fn print_labels_table(labels: &[String]) {
    if labels.is_empty() {
        info("No entries in this store yet.");
        tip("Run `passbox add <LABEL>` to generate your first password.");
        return;
    }

    let mut sorted: Vec<&String> = labels.iter().collect();
    sorted.sort();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Label"]);

    for label in sorted {
        table.add_row(vec![label.as_str()]);
    }

    println!("{table}");
}
