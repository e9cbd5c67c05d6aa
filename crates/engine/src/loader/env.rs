//! Environment variable parsing for layout configuration.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - Variables only fill fields the builder has not already set.

use std::path::PathBuf;

use super::builder::LayoutLoader;
use crate::constants::{ENV_BACKUP_DIR, ENV_PROJECT_ROOT, ENV_RESOURCES_DIR};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply `ENVPATCH_*` variables to fields not yet set on the loader.
pub(super) fn apply_env(loader: &mut LayoutLoader) {
    if loader.project_root().is_none()
        && let Some(root) = env_var_or_none(ENV_PROJECT_ROOT)
    {
        loader.set_project_root(PathBuf::from(root));
    }
    if loader.resources_dir().is_none()
        && let Some(dir) = env_var_or_none(ENV_RESOURCES_DIR)
    {
        loader.set_resources_dir(PathBuf::from(dir));
    }
    if loader.backup_dir().is_none()
        && let Some(dir) = env_var_or_none(ENV_BACKUP_DIR)
    {
        loader.set_backup_dir(PathBuf::from(dir));
    }
}
