//! Tests for `LayoutLoader::build`.

use std::path::{Path, PathBuf};

use serial_test::serial;

use crate::loader::builder::LayoutLoader;
use crate::loader::error::ConfigError;

#[test]
fn test_build_with_explicit_root_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let layout = LayoutLoader::new()
        .with_project_root(dir.path().to_path_buf())
        .build()
        .unwrap();

    assert_eq!(layout.root(), dir.path());
    assert_eq!(layout.resources_dir(), dir.path().join("src/main/resources"));
    assert_eq!(layout.backup_dir(), dir.path().join(".env-backups"));
}

#[test]
fn test_build_applies_directory_overrides() {
    let dir = tempfile::tempdir().unwrap();

    let layout = LayoutLoader::new()
        .with_project_root(dir.path().to_path_buf())
        .with_resources_dir(PathBuf::from("conf"))
        .with_backup_dir(PathBuf::from("/somewhere/else"))
        .build()
        .unwrap();

    assert_eq!(layout.resources_dir(), dir.path().join("conf"));
    assert_eq!(layout.backup_dir(), Path::new("/somewhere/else"));
}

#[test]
fn test_build_rejects_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = LayoutLoader::new()
        .with_project_root(missing.clone())
        .build()
        .unwrap_err();

    assert!(matches!(err, ConfigError::ProjectRootMissing(path) if path == missing));
}

#[test]
fn test_build_rejects_file_as_root() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("file.txt");
    std::fs::write(&file, "x").unwrap();

    let err = LayoutLoader::new().with_project_root(file).build().unwrap_err();

    assert!(matches!(err, ConfigError::ProjectRootMissing(_)));
}

#[test]
#[serial]
fn test_build_defaults_root_to_current_dir() {
    let cwd = std::env::current_dir().unwrap();

    let layout = LayoutLoader::new().build().unwrap();

    assert_eq!(layout.root(), cwd);
}
