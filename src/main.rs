//! regsync CLI - analyzer registry reconciliation
//!
//! Usage: regsync <COMMAND>
//!
//! Commands:
//!   watch      Watch the registry and reconcile on every change
//!   reconcile  Run one reconciliation pass
//!   plan       Show which services would be added and removed
//!   delete     Delete an analyzer and everything generated for it

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use cli::{Cli, Commands};
use commands::Project;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project = Project::load(cli.root.as_deref(), cli.config.as_deref())?;

    match cli.command {
        Commands::Watch { reconcile_on_start } => {
            commands::watch::cmd_watch(&project, reconcile_on_start, cli.json)
        }
        Commands::Reconcile => commands::reconcile::cmd_reconcile(&project, cli.json),
        Commands::Plan => commands::plan::cmd_plan(&project, cli.json),
        Commands::Delete { name, yes } => commands::delete::cmd_delete(&project, &name, yes, cli.json),
    }
}

/// Diagnostics go to stderr so stdout stays a clean event stream.
///
/// `RUST_LOG` wins over the `-v` count.
fn init_tracing(verbose: u8) {
    let level = level_for(verbose);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}

fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
