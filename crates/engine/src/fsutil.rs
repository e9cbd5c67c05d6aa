//! File-system helpers shared by the backup store and the engine.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Write `bytes` to `path` via a sibling temporary file and a rename.
///
/// The parent directory is created if missing. On failure the target is left untouched.
/// A symlinked `path` stays a symlink: the file it points to is the one replaced. An
/// existing file keeps its permissions.
pub(crate) fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let target = resolve_target(path)?;
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let permissions = std::fs::metadata(&target).ok().map(|meta| meta.permissions());
    let temp_path = temp_sibling(&target);
    std::fs::write(&temp_path, bytes)?;

    let renamed = match permissions {
        Some(permissions) => std::fs::set_permissions(&temp_path, permissions),
        None => Ok(()),
    }
    .and_then(|()| std::fs::rename(&temp_path, &target));

    if let Err(e) = renamed {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}

/// The file that a write to `path` should replace, following symlinks.
///
/// Paths that do not exist yet (including dangling links) are written as given.
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
