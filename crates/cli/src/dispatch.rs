//! Command dispatch logic.
//!
//! Responsibilities:
//! - Resolve the project layout once and route parsed CLI arguments to command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Logging setup (see `main()`).

use anyhow::{Context, Result};

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let layout = cli.layout().context("Failed to resolve project layout")?;
    tracing::debug!(
        root = %layout.root().display(),
        resources = %layout.resources_dir().display(),
        backups = %layout.backup_dir().display(),
        "project layout resolved"
    );

    match cli.command {
        Commands::Apply {
            env,
            keep_kafka,
            keep_redis,
            keep_urls,
        } => {
            let options = commands::apply::ApplyOptions {
                keep_kafka,
                keep_redis,
                keep_urls,
            };
            commands::apply::run(layout, &env, options, cli.quiet)?;
        }
        Commands::Restore { env } => {
            commands::restore::run(layout, &env, cli.quiet)?;
        }
        Commands::List { output } => {
            commands::list::run(&layout, &output)?;
        }
    }

    Ok(())
}
