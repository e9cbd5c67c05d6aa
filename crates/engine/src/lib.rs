//! Environment overlay engine for Spring-style application configuration.
//!
//! This crate applies a bounded set of environment-specific mutations to a base
//! application document and a per-environment overlay document (YAML or Java
//! properties), and restores the pre-mutation bytes from a backup area.

pub mod backup;
pub mod constants;
pub mod document;
pub mod engine;
pub mod env_block;
mod error;
mod fsutil;
pub mod layout;
mod loader;
pub mod request;

pub use backup::{BackupStatus, BackupStore, RestoreStatus};
pub use document::{DocumentCodec, DocumentFormat, Mapping, Node};
pub use engine::OverlayEngine;
pub use env_block::EnvironmentTable;
pub use error::EngineError;
pub use layout::{ProjectLayout, environment_from_file_name};
pub use loader::{ConfigError, LayoutLoader, env_var_or_none};
pub use request::{ApplyReport, MutationRequest, Outcome, Request, RestoreReport};

