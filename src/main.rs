use clap::Parser;
use passbox::cli::{output, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List => passbox::cli::commands::list::execute(&cli),
        Commands::Show { ref label } => passbox::cli::commands::show::execute(&cli, label),
        Commands::Add { ref label, length } => {
            passbox::cli::commands::add::execute(&cli, label, length)
        }
        Commands::Set { ref label } => passbox::cli::commands::set::execute(&cli, label),
        Commands::Remove { ref label, force } => {
            passbox::cli::commands::remove::execute(&cli, label, force)
        }
        Commands::UpdateKey => passbox::cli::commands::update_key::execute(&cli),
        Commands::Generate { length } => passbox::cli::commands::generate::execute(&cli, length),
        #[cfg(feature = "audit-log")]
        Commands::Audit { last, ref since } => {
            passbox::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { shell } => passbox::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        if e.is_unlock_failure() {
            output::tip("The store was left untouched. Check the passphrase and both store files.");
        }
        std::process::exit(1);
    }
}
