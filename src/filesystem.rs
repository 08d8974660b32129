//! Host filesystem helpers for the working copy, log and output directories.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Remove `dir` and everything below it, overriding read-only permissions.
///
/// A missing `dir` is not an error. When the first removal attempt fails,
/// every entry is made writable and the removal is retried.
pub fn force_remove_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::debug!(
                "Removing {} failed ({}), resetting permissions",
                dir.display(),
                e
            );
            make_tree_writable(dir);
            fs::remove_dir_all(dir)?;
            Ok(())
        }
    }
}

/// Reset permissions on every reachable entry below `root`.
///
/// Symlinks are left alone: `set_permissions` follows them, and their
/// targets may live outside the tree. Entries that cannot be visited or
/// changed are skipped; the retried removal reports whatever still blocks it.
fn make_tree_writable(root: &Path) {
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.path_is_symlink())
    {
        if let Err(e) = make_writable(entry.path()) {
            log::debug!("Cannot reset permissions on {}: {}", entry.path().display(), e);
        }
    }
}

#[cfg(unix)]
fn make_writable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o777))
}

#[cfg(not(unix))]
fn make_writable(path: &Path) -> std::io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
}

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Copy every regular file directly inside `src_dir` into `dst_dir`.
///
/// Existing files in `dst_dir` with the same name are overwritten.
/// Subdirectories are skipped. Returns the destination paths in name order.
pub fn copy_files(src_dir: &Path, dst_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(src_dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut copied = Vec::new();
    for entry in entries {
        let path = entry.path();
        if !path.is_file() {
            log::debug!("Skipping non-file entry {}", path.display());
            continue;
        }
        let target = dst_dir.join(entry.file_name());
        fs::copy(&path, &target)?;
        log::debug!("Copied {} -> {}", path.display(), target.display());
        copied.push(target);
    }
    Ok(copied)
}
