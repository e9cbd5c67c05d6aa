//! envpatch - Apply environment overlays to Spring application configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build the project layout and hand requests to the overlay engine.
//! - Print outcomes and map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Document parsing, mutation or backups (see `crates/engine`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.envpatch.env` can provide clap defaults.
//! - Global options (like `--project-root`) are applied consistently across all subcommands.

mod args;
mod commands;
mod dispatch;
mod error;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use envpatch_engine::LayoutLoader;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .envpatch.env BEFORE CLI parsing so clap env defaults can read its values
    if let Err(e) = LayoutLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::from(&e).as_i32());
    }

    let cli = Cli::parse();

    let filter = if cli.verbose && std::env::var_os("RUST_LOG").is_none() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
