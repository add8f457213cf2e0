use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// regsync - keep analyzer containers in step with the analyzer registry
#[derive(Parser, Debug)]
#[command(name = "regsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of human-readable lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file (defaults to <root>/regsync.toml, then the user config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the registry and reconcile on every change (Ctrl+C to stop)
    Watch {
        /// Run one pass before waiting for changes
        #[arg(long)]
        reconcile_on_start: bool,
    },

    /// Run one reconciliation pass and exit
    Reconcile,

    /// Show which services would be added and removed
    Plan,

    /// Delete an analyzer with its service, files, and registry entry
    Delete {
        /// Analyzer display name (e.g. "Foo Bar")
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
