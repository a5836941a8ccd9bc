//! Projector: switch an editor workspace between named projects.
//!
//! # Usage
//!
//! ```text
//! projector list [--json]
//! projector open <name>
//! projector select
//! projector refresh
//! projector current
//! projector watch
//! ```
//!
//! Every command accepts `--root <dir>` and `--workspace-file <path>`.

mod commands;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{list::ListArgs, open::OpenArgs, GlobalArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "projector",
    version,
    about = "Switch the editor workspace between named projects",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List projects from the workspace registry (or the legacy config list).
    List(ListArgs),

    /// Switch the workspace to the named project.
    Open(OpenArgs),

    /// Pick a project interactively.
    Select,

    /// Re-read the project list and print the status line.
    Refresh,

    /// Show the current project.
    Current,

    /// Watch the workspace and config files and refresh on change.
    Watch,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = match cli.command {
        Commands::Watch => "info",
        _ => "warn",
    };
    init_tracing(default_level);

    match cli.command {
        Commands::List(args) => args.run(&cli.global),
        Commands::Open(args) => args.run(&cli.global),
        Commands::Select => commands::select::run(&cli.global),
        Commands::Refresh => commands::refresh::run(&cli.global),
        Commands::Current => commands::current::run(&cli.global),
        Commands::Watch => commands::watch::run(&cli.global),
    }
}

fn init_tracing(default_level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
