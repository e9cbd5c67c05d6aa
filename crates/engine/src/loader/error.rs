//! Error types for layout loading.
//!
//! Invariants:
//! - Dotenv errors NEVER include raw dotenv line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a `ProjectLayout`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Project root {0} is not a directory")]
    ProjectRootMissing(PathBuf),

    #[error("Unable to determine the current directory: {0}")]
    CurrentDirUnavailable(ErrorKind),

    /// Failed to parse the dotenv file due to invalid syntax.
    ///
    /// SAFETY: Only the byte index of the failure is kept, never the offending line.
    #[error(
        "Failed to parse .envpatch.env at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip dotenv loading"
    )]
    DotenvParse { error_index: usize },

    #[error("Failed to read .envpatch.env: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from the dotenvy crate).
    #[error("Failed to load .envpatch.env. Hint: set DOTENV_DISABLED=1 to skip dotenv loading")]
    DotenvUnknown,
}
