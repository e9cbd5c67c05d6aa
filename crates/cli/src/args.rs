//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Resolve the project layout from global flags.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use envpatch_engine::constants::{ENV_BACKUP_DIR, ENV_PROJECT_ROOT, ENV_RESOURCES_DIR};
use envpatch_engine::{ConfigError, LayoutLoader, ProjectLayout};

#[derive(Parser)]
#[command(name = "envpatch")]
#[command(about = "Apply environment overlays to Spring application configuration", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envpatch apply dev\n  envpatch apply application-qa.yml --keep-kafka --keep-urls\n  envpatch restore dev\n  envpatch list -o json\n  envpatch --project-root ../orders apply staging\n"
)]
pub struct Cli {
    /// Project root containing the resources directory (defaults to the current directory)
    #[arg(long, global = true, env = ENV_PROJECT_ROOT, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Resources directory, relative to the project root unless absolute
    #[arg(long, global = true, env = ENV_RESOURCES_DIR, value_name = "DIR")]
    pub resources_dir: Option<PathBuf>,

    /// Backup directory, relative to the project root unless absolute
    #[arg(long, global = true, env = ENV_BACKUP_DIR, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress success messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Activate an environment: set the profile, switch off listeners, fill placeholders
    Apply {
        /// Environment identifier (e.g. `dev`) or overlay file name (e.g. `application-dev.yml`)
        env: String,

        /// Leave kafka.listener.enabled untouched
        #[arg(long)]
        keep_kafka: bool,

        /// Leave redis.consumer.enabled untouched
        #[arg(long)]
        keep_redis: bool,

        /// Skip the URLS_<ENV> rewrites
        #[arg(long)]
        keep_urls: bool,
    },

    /// Restore the documents of an environment from their backups
    Restore {
        /// Environment identifier or overlay file name
        env: String,
    },

    /// List environments found in the resources directory
    List {
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

impl Cli {
    /// Build the project layout from global flags, `ENVPATCH_*` variables and defaults.
    ///
    /// Blank/whitespace-only flag values are ignored to allow fallback to defaults.
    pub fn layout(&self) -> Result<ProjectLayout, ConfigError> {
        let mut loader = LayoutLoader::new();
        if let Some(root) = non_blank(&self.project_root) {
            loader = loader.with_project_root(root);
        }
        if let Some(dir) = non_blank(&self.resources_dir) {
            loader = loader.with_resources_dir(dir);
        }
        if let Some(dir) = non_blank(&self.backup_dir) {
            loader = loader.with_backup_dir(dir);
        }
        loader.from_env().build()
    }
}

fn non_blank(path: &Option<PathBuf>) -> Option<PathBuf> {
    path.as_ref()
        .filter(|p| !p.to_string_lossy().trim().is_empty())
        .cloned()
}
