//! Error types for overlay operations.
//!
//! Responsibilities:
//! - Define the failures an apply or restore operation can surface to its caller.
//! - Attach the offending path to every I/O and codec failure.
//!
//! Does NOT handle:
//! - Configuration loading errors (see `loader::error`), except by wrapping them.
//! - Exit code mapping (see the CLI crate).
//!
//! Invariants:
//! - Malformed environment-definition lines, existing backups and restores without a
//!   backup are NOT errors; they never produce an `EngineError`.
//! - Structural mismatches inside a document (a scalar where a mapping is expected) are
//!   resolved by overwriting, never reported.

use std::path::PathBuf;
use thiserror::Error;

use crate::loader::ConfigError;

/// Errors that abort an apply or restore operation.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid environment identifier '{0}'")]
    InvalidEnvironment(String),

    /// The base or overlay document for the requested environment does not exist.
    #[error("Configuration document not found at {path}")]
    MissingDocument { path: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML document at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize YAML document for {path}: {source}")]
    YamlSerialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A hierarchical document whose root is a scalar or a sequence.
    #[error("Document {index} in {path} is not a mapping")]
    NotAMapping { path: PathBuf, index: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }
}
