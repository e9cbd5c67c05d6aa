//! In-memory configuration documents and their two on-disk encodings.
//!
//! Responsibilities:
//! - Define the document tree (`Node`, `Mapping`) shared by both encodings.
//! - Define the `DocumentCodec` seam and select a codec per `DocumentFormat`.
//!
//! Does NOT handle:
//! - Deciding which format a project uses (see `layout`).
//! - Orchestrating mutations (see `engine`).
//!
//! Invariants:
//! - A decoded file is a non-empty list of root mappings.
//! - Flat documents are one level deep: dotted keys map directly to string values, so the
//!   recursive walks in `tree` apply to both encodings unchanged.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::constants::{PROPERTIES_EXTENSION, YAML_EXTENSION};
use crate::error::EngineError;

pub mod properties;
pub mod tree;
pub mod yaml;

pub use properties::PropertiesCodec;
pub use yaml::YamlCodec;

/// A document tree node: a scalar, a sequence, or a nested mapping.
pub type Node = serde_yaml::Value;

/// An ordered mapping of keys to nodes; the root of every document.
pub type Mapping = serde_yaml::Mapping;

/// Serialization format of a project's configuration documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Nested YAML mappings, possibly several `---` separated documents per file.
    Hierarchical,
    /// Java properties: dotted keys to string values.
    Flat,
}

impl DocumentFormat {
    /// File extension used by documents in this format.
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Hierarchical => YAML_EXTENSION,
            DocumentFormat::Flat => PROPERTIES_EXTENSION,
        }
    }

    /// The codec that reads and writes documents in this format.
    pub fn codec(self) -> &'static dyn DocumentCodec {
        match self {
            DocumentFormat::Hierarchical => &YamlCodec,
            DocumentFormat::Flat => &PropertiesCodec,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Hierarchical => write!(f, "YAML"),
            DocumentFormat::Flat => write!(f, "properties"),
        }
    }
}

/// Reads, writes and addresses documents of one encoding.
///
/// `path` arguments are used for error context only; codecs never touch the file system.
pub trait DocumentCodec: Send + Sync {
    fn format(&self) -> DocumentFormat;

    /// Decode a file's text into one root mapping per document (never an empty list).
    fn decode(&self, path: &Path, text: &str) -> Result<Vec<Mapping>, EngineError>;

    /// Encode documents back to file text.
    fn encode(&self, path: &Path, documents: &[Mapping]) -> Result<String, EngineError>;

    /// Assign `value` at the dotted `key_path`, creating whatever the encoding needs.
    fn set_value(&self, document: &mut Mapping, key_path: &str, value: Node);

    /// Whether `key_path` is present in `document`.
    fn contains_path(&self, document: &Mapping, key_path: &str) -> bool;

    /// Whether everything above the leaf of `key_path` is present; the leaf may be missing.
    fn contains_parent(&self, document: &Mapping, key_path: &str) -> bool;
}
