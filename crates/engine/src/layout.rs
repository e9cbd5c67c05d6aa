//! Project file layout: where documents, definitions and backups live.
//!
//! Responsibilities:
//! - Resolve base, overlay and environment-definition paths under a project root.
//! - Detect the project's document format from which base document exists.
//! - Discover available environments from overlay file names.
//!
//! Does NOT handle:
//! - Reading root/directory overrides from the process environment (see `loader`).
//!
//! Invariants:
//! - Relative resources and backup directories are resolved against the project root.
//! - A project is hierarchical iff `<resources>/application.yml` exists.

use std::path::{Path, PathBuf};

use crate::backup::BackupStore;
use crate::constants::{
    APPLICATION_STEM, DEFAULT_BACKUP_DIR, DEFAULT_RESOURCES_DIR, ENV_DEFINITION_FILE,
    OVERLAY_PREFIX, YAML_EXTENSION,
};
use crate::document::DocumentFormat;
use crate::error::EngineError;

/// Paths of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    resources_dir: PathBuf,
    backup_dir: PathBuf,
}

impl ProjectLayout {
    /// Layout with the default resources and backup directories under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            resources_dir: root.join(DEFAULT_RESOURCES_DIR),
            backup_dir: root.join(DEFAULT_BACKUP_DIR),
            root,
        }
    }

    /// Override the resources directory (relative to the root unless absolute).
    pub fn with_resources_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.resources_dir = self.root.join(dir);
        self
    }

    /// Override the backup directory (relative to the root unless absolute).
    pub fn with_backup_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.backup_dir = self.root.join(dir);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    pub fn backup_store(&self) -> BackupStore {
        BackupStore::new(&self.backup_dir)
    }

    /// Hierarchical when `application.yml` exists, flat otherwise.
    pub fn detect_format(&self) -> DocumentFormat {
        let yaml_base = self
            .resources_dir
            .join(format!("{}.{}", APPLICATION_STEM, YAML_EXTENSION));
        if yaml_base.is_file() {
            DocumentFormat::Hierarchical
        } else {
            DocumentFormat::Flat
        }
    }

    /// `<resources>/application.<ext>`
    pub fn base_document(&self, format: DocumentFormat) -> PathBuf {
        self.resources_dir
            .join(format!("{}.{}", APPLICATION_STEM, format.extension()))
    }

    /// `<resources>/application-<env>.<ext>`
    pub fn overlay_document(&self, env: &str, format: DocumentFormat) -> PathBuf {
        self.resources_dir
            .join(format!("{}{}.{}", OVERLAY_PREFIX, env, format.extension()))
    }

    /// `<resources>/.env`
    pub fn env_file(&self) -> PathBuf {
        self.resources_dir.join(ENV_DEFINITION_FILE)
    }

    /// Environments with an overlay document in `format`, sorted by name.
    ///
    /// A missing resources directory yields an empty list.
    pub fn environments(&self, format: DocumentFormat) -> Result<Vec<String>, EngineError> {
        let entries = match std::fs::read_dir(&self.resources_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(EngineError::io(&self.resources_dir, e)),
        };

        let suffix = format!(".{}", format.extension());
        let mut environments = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| EngineError::io(&self.resources_dir, e))?;
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(env) = name
                .to_str()
                .and_then(|name| name.strip_prefix(OVERLAY_PREFIX))
                .and_then(|rest| rest.strip_suffix(&suffix))
            else {
                continue;
            };
            if !env.is_empty() {
                environments.push(env.to_string());
            }
        }

        environments.sort();
        Ok(environments)
    }
}

/// Derive an environment identifier from an overlay file name.
///
/// Takes the text after `application-` (the whole name if absent) and drops the last
/// extension, so `application-dev.yml` yields `dev`.
pub fn environment_from_file_name(file_name: &str) -> &str {
    let rest = file_name
        .split_once(OVERLAY_PREFIX)
        .map_or(file_name, |(_, rest)| rest);
    rest.rsplit_once('.').map_or(rest, |(stem, _)| stem)
}

/// Reject identifiers that cannot name an overlay file inside the resources directory.
pub(crate) fn validate_environment(env: &str) -> Result<(), EngineError> {
    let trimmed = env.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." || env.contains(['/', '\\']) {
        return Err(EngineError::InvalidEnvironment(env.to_string()));
    }
    Ok(())
}
