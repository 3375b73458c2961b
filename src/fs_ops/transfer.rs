//! Platform mutation primitives used inside action thunks.
//! - copy_file: byte copy plus times/permissions (like `cp -p`).
//! - copy_tree: recursive copy; nested symlinks are recreated as links.
//! - move_path: rename, falling back to copy + remove across filesystems.
//! - remove_path: unlink an entry or remove a real directory tree.
//!
//! All functions return io::Result so the executor can tag failures with the
//! action description; inner steps carry their own op/path context.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::helpers::{io_error_with_help_io, is_cross_device};
use super::meta::{preserve_metadata, preserve_symlink_times};
use crate::platform;

/// True if something occupies `p`, including a dangling symlink.
pub fn exists_nofollow(p: &Path) -> bool {
    fs::symlink_metadata(p).is_ok()
}

/// True if `p` is a directory and not a symlink to one.
pub fn is_real_dir(p: &Path) -> bool {
    fs::symlink_metadata(p)
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}

/// Best-effort fsync of a directory so a rename survives a crash.
#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

fn sync_parent(p: &Path) {
    if let Some(parent) = p.parent().filter(|p| !p.as_os_str().is_empty()) {
        let _ = fsync_dir(parent);
    }
}

/// Copy one regular file (following a symlinked source) and keep its metadata.
pub fn copy_file(src: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(src, dest).map_err(io_error_with_help_io("copy file", src))?;
    let meta = fs::metadata(src).map_err(io_error_with_help_io("stat", src))?;
    preserve_metadata(dest, &meta).map_err(io_error_with_help_io("preserve metadata", dest))
}

/// Recreate symlink `src` at `dest` with the same (possibly dangling) target.
pub fn copy_link(src: &Path, dest: &Path) -> io::Result<()> {
    let target = fs::read_link(src).map_err(io_error_with_help_io("read link", src))?;
    platform::symlink(&target, dest).map_err(io_error_with_help_io("create symlink", dest))?;
    if let Ok(meta) = fs::symlink_metadata(src) {
        preserve_symlink_times(dest, &meta);
    }
    Ok(())
}

/// Recursively copy directory `src` to `dest`, which must not exist yet.
pub fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    let mut dirs = Vec::new();

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let target = dest.join(rel);
        let ft = entry.file_type();

        if ft.is_dir() {
            fs::create_dir(&target).map_err(io_error_with_help_io("create directory", &target))?;
            let meta = entry.metadata().map_err(io::Error::from)?;
            dirs.push((target, meta));
        } else if ft.is_symlink() {
            copy_link(entry.path(), &target)?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }

    // Directory modes last, deepest first, so read-only dirs don't block their children.
    for (dir, meta) in dirs.into_iter().rev() {
        preserve_metadata(&dir, &meta).map_err(io_error_with_help_io("preserve metadata", &dir))?;
    }
    debug!(src = %src.display(), dest = %dest.display(), "copied tree");
    Ok(())
}

/// Copy whatever `src` is: real directory, symlink or file.
fn copy_any(src: &Path, dest: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(src).map_err(io_error_with_help_io("stat", src))?;
    if meta.file_type().is_dir() {
        copy_tree(src, dest)
    } else if meta.file_type().is_symlink() {
        copy_link(src, dest)
    } else {
        copy_file(src, dest)
    }
}

/// Move `src` to `dest`. Renames when possible; across filesystems copies then
/// removes the source.
pub fn move_path(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => {
            sync_parent(dest);
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            warn!(src = %src.display(), dest = %dest.display(), "rename crossed filesystems; copying then removing source");
            copy_any(src, dest)?;
            remove_path(src)
        }
        Err(e) => Err(io_error_with_help_io("rename", src)(e)),
    }
}

/// Remove a single entry, or a whole tree if `p` is a real directory.
pub fn remove_path(p: &Path) -> io::Result<()> {
    if is_real_dir(p) {
        fs::remove_dir_all(p).map_err(io_error_with_help_io("remove directory tree", p))
    } else {
        platform::remove_entry(p).map_err(io_error_with_help_io("remove", p))
    }
}
