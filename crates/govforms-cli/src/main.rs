mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "govforms")]
#[command(version, about = "govforms CLI - check portal forms against the client-side validation rules", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every field of a saved form snapshot
    Check {
        /// Form config (TOML). Defaults are used if the file is missing
        #[arg(short, long, default_value = "form.toml")]
        config: PathBuf,

        /// Form snapshot (JSON) as collected by the page
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Message catalog (JSON msgid -> msgstr)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print outcomes as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Show which rule a field name resolves to
    Resolve {
        /// Field name, e.g. `resource_ref_number`
        field: String,

        /// Resolve as on a resource form
        #[arg(short, long)]
        resource: bool,

        /// Resolve against the contact form rule set
        #[arg(long, conflicts_with = "resource")]
        contact: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("govforms_validation={level},govforms={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check {
            config,
            snapshot,
            catalog,
            json,
        } => {
            commands::check::execute(&config, &snapshot, catalog.as_deref(), json)?;
        }
        Commands::Resolve {
            field,
            resource,
            contact,
        } => {
            commands::resolve::execute(&field, resource, contact)?;
        }
    }

    Ok(())
}
