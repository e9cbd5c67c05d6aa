//! Verbatim backups of configuration documents.
//!
//! Responsibilities:
//! - Capture a document's bytes into the backup directory before its first mutation.
//! - Copy captured bytes back over the live document on restore.
//!
//! Does NOT handle:
//! - Deleting backups; they accumulate until removed by the user.
//! - Deciding which documents to back up (see `engine`).
//!
//! Invariants:
//! - A backup is written at most once per file name and directory: an existing backup is
//!   never overwritten, so it always holds the state before the first apply.
//! - Restoring without a backup is a no-op, reported as `RestoreStatus::NothingToRestore`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants::BACKUP_SUFFIX;
use crate::error::EngineError;
use crate::fsutil::atomic_write;

/// Result of `BackupStore::ensure_backup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupStatus {
    /// The document's current bytes were captured.
    Created,
    /// A backup already existed and was left as is.
    AlreadyPresent,
}

/// Result of `BackupStore::restore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreStatus {
    Restored,
    NothingToRestore,
}

/// Backup directory holding `<file name>.bak` copies.
#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the backup for `document`, keyed by its file name.
    pub fn backup_path_for(&self, document: &Path) -> PathBuf {
        let mut name = document
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(BACKUP_SUFFIX);
        self.dir.join(name)
    }

    pub fn has_backup(&self, document: &Path) -> bool {
        self.backup_path_for(document).is_file()
    }

    /// Capture `source` unless a backup for its file name already exists.
    ///
    /// Creates the backup directory if absent.
    pub fn ensure_backup(&self, source: &Path) -> Result<BackupStatus, EngineError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| EngineError::io(&self.dir, e))?;

        let backup = self.backup_path_for(source);
        if backup.exists() {
            tracing::debug!(backup = %backup.display(), "backup already present");
            return Ok(BackupStatus::AlreadyPresent);
        }

        let bytes = std::fs::read(source).map_err(|e| EngineError::io(source, e))?;
        atomic_write(&backup, &bytes).map_err(|e| EngineError::io(&backup, e))?;
        tracing::debug!(
            source = %source.display(),
            backup = %backup.display(),
            bytes = bytes.len(),
            "backup created"
        );
        Ok(BackupStatus::Created)
    }

    /// Overwrite `target` with its backup, if one exists.
    pub fn restore(&self, target: &Path) -> Result<RestoreStatus, EngineError> {
        let backup = self.backup_path_for(target);
        let bytes = match std::fs::read(&backup) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(backup = %backup.display(), "no backup to restore");
                return Ok(RestoreStatus::NothingToRestore);
            }
            Err(e) => return Err(EngineError::io(&backup, e)),
        };

        atomic_write(target, &bytes).map_err(|e| EngineError::io(target, e))?;
        tracing::debug!(target = %target.display(), "document restored from backup");
        Ok(RestoreStatus::Restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_backup_path_uses_file_name_and_suffix() {
        let store = BackupStore::new("/project/.env-backups");
        assert_eq!(
            store.backup_path_for(Path::new("/project/src/main/resources/application-dev.yml")),
            PathBuf::from("/project/.env-backups/application-dev.yml.bak")
        );
    }

    #[test]
    fn test_ensure_backup_creates_directory_and_copies_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("application.yml");
        fs::write(&source, "a: 1\n# keep me\n").unwrap();
        let store = BackupStore::new(dir.path().join("backups"));

        let status = store.ensure_backup(&source).unwrap();

        assert_eq!(status, BackupStatus::Created);
        assert_eq!(
            fs::read_to_string(store.backup_path_for(&source)).unwrap(),
            "a: 1\n# keep me\n"
        );
    }

    #[test]
    fn test_ensure_backup_keeps_first_capture() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("application.properties");
        fs::write(&source, "original=1\n").unwrap();
        let store = BackupStore::new(dir.path().join("backups"));

        store.ensure_backup(&source).unwrap();
        fs::write(&source, "mutated=1\n").unwrap();
        let second = store.ensure_backup(&source).unwrap();

        assert_eq!(second, BackupStatus::AlreadyPresent);
        assert_eq!(
            fs::read_to_string(store.backup_path_for(&source)).unwrap(),
            "original=1\n"
        );
    }

    #[test]
    fn test_ensure_backup_missing_source_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = BackupStore::new(dir.path().join("backups"));
        let err = store
            .ensure_backup(&dir.path().join("missing.yml"))
            .unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[test]
    fn test_restore_overwrites_target() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("application.yml");
        fs::write(&source, "before\n").unwrap();
        let store = BackupStore::new(dir.path().join("backups"));
        store.ensure_backup(&source).unwrap();
        fs::write(&source, "after\n").unwrap();

        let status = store.restore(&source).unwrap();

        assert_eq!(status, RestoreStatus::Restored);
        assert_eq!(fs::read_to_string(&source).unwrap(), "before\n");
        assert!(store.has_backup(&source), "restore must not delete the backup");
    }

    #[test]
    fn test_restore_without_backup_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("application-qa.yml");
        fs::write(&target, "live\n").unwrap();
        let store = BackupStore::new(dir.path().join("backups"));

        let status = store.restore(&target).unwrap();

        assert_eq!(status, RestoreStatus::NothingToRestore);
        assert_eq!(fs::read_to_string(&target).unwrap(), "live\n");
    }
}
