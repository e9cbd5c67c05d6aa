//! Shared test utilities for envpatch integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Provide a throwaway project fixture with a resources directory.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - `ENVPATCH_*` variables from the host never reach the spawned process.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use envpatch_engine::constants::{
    ENV_BACKUP_DIR, ENV_DOTENV_DISABLED, ENV_PROJECT_ROOT, ENV_RESOURCES_DIR,
};
use tempfile::TempDir;

/// Returns a hermetic `envpatch` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.envpatch.env` contamination.
/// - Layout variables are cleared to ensure no leakage from the host.
pub fn envpatch_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envpatch");

    // Hermeticity: prevent loading local .envpatch.env
    cmd.env(ENV_DOTENV_DISABLED, "1");

    // Clear potential host leakage
    cmd.env_remove(ENV_PROJECT_ROOT)
        .env_remove(ENV_RESOURCES_DIR)
        .env_remove(ENV_BACKUP_DIR)
        .env_remove("RUST_LOG");

    cmd
}

/// A temporary project with the default `src/main/resources` layout.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/main/resources")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn resource(&self, name: &str) -> PathBuf {
        self.root().join("src/main/resources").join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.resource(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.resource(name)).unwrap()
    }

    /// `envpatch_cmd()` pointed at this project via `--project-root`.
    pub fn cmd(&self) -> Command {
        let mut cmd = envpatch_cmd();
        cmd.arg("--project-root").arg(self.root());
        cmd
    }
}
