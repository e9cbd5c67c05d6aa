//! Layout loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `LayoutLoader` for the project root and directory overrides.
//! - Build the final `ProjectLayout`, defaulting the root to the current directory.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.envpatch.env` loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy` is called.

use std::path::{Path, PathBuf};

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{DOTENV_FILE, ENV_DOTENV_DISABLED};
use crate::layout::ProjectLayout;

/// Loader that builds a `ProjectLayout` from overrides, environment variables and defaults.
#[derive(Debug, Default)]
pub struct LayoutLoader {
    project_root: Option<PathBuf>,
    resources_dir: Option<PathBuf>,
    backup_dir: Option<PathBuf>,
}

impl LayoutLoader {
    /// Create a new layout loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load variables from `.envpatch.env` in the current directory, if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", nothing is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The file exists but cannot be read (`ConfigError::DotenvIo`)
    ///
    /// A missing file is silently ignored.
    ///
    /// SAFETY: Error messages never include raw dotenv line contents.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::from_filename(DOTENV_FILE) {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Set the project root.
    pub fn with_project_root(mut self, root: PathBuf) -> Self {
        self.project_root = Some(root);
        self
    }

    /// Override the resources directory (relative to the root unless absolute).
    pub fn with_resources_dir(mut self, dir: PathBuf) -> Self {
        self.resources_dir = Some(dir);
        self
    }

    /// Override the backup directory (relative to the root unless absolute).
    pub fn with_backup_dir(mut self, dir: PathBuf) -> Self {
        self.backup_dir = Some(dir);
        self
    }

    /// Fill unset fields from `ENVPATCH_*` environment variables.
    pub fn from_env(mut self) -> Self {
        apply_env(&mut self);
        self
    }

    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    pub fn resources_dir(&self) -> Option<&Path> {
        self.resources_dir.as_deref()
    }

    pub fn backup_dir(&self) -> Option<&Path> {
        self.backup_dir.as_deref()
    }

    pub(super) fn set_project_root(&mut self, root: PathBuf) {
        self.project_root = Some(root);
    }

    pub(super) fn set_resources_dir(&mut self, dir: PathBuf) {
        self.resources_dir = Some(dir);
    }

    pub(super) fn set_backup_dir(&mut self, dir: PathBuf) {
        self.backup_dir = Some(dir);
    }

    /// Build the layout.
    ///
    /// # Errors
    ///
    /// - `ConfigError::CurrentDirUnavailable` if no root was set and the current directory
    ///   cannot be determined.
    /// - `ConfigError::ProjectRootMissing` if the root is not an existing directory.
    pub fn build(self) -> Result<ProjectLayout, ConfigError> {
        let root = match self.project_root {
            Some(root) => root,
            None => std::env::current_dir()
                .map_err(|e| ConfigError::CurrentDirUnavailable(e.kind()))?,
        };

        if !root.is_dir() {
            return Err(ConfigError::ProjectRootMissing(root));
        }

        let mut layout = ProjectLayout::new(root);
        if let Some(dir) = self.resources_dir {
            layout = layout.with_resources_dir(dir);
        }
        if let Some(dir) = self.backup_dir {
            layout = layout.with_backup_dir(dir);
        }
        Ok(layout)
    }
}
