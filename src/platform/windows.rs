//! Non-Unix implementations of platform helpers (best-effort).
//!
//! Notes:
//! - No POSIX owner model: chown and name lookups report Unsupported.
//! - chmod maps to the readonly attribute (owner write bit).

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

fn unsupported(what: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        format!("{what} is not supported on this platform"),
    )
}

/// Open log file for appending (no permission hardening available via std).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Approximate chmod: only the owner write bit is honored.
pub fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_readonly(mode & 0o200 == 0);
    fs::set_permissions(path, perms)
}

pub fn chown(_path: &Path, _uid: Option<u32>, _gid: Option<u32>) -> io::Result<()> {
    Err(unsupported("chown"))
}

pub fn lookup_user(name: &str) -> io::Result<Option<u32>> {
    name.parse::<u32>().map(Some).map_err(|_| unsupported("user name lookup"))
}

pub fn lookup_group(name: &str) -> io::Result<Option<u32>> {
    name.parse::<u32>().map(Some).map_err(|_| unsupported("group name lookup"))
}

pub fn user_name(uid: u32) -> String {
    uid.to_string()
}

pub fn group_name(gid: u32) -> String {
    gid.to_string()
}

/// Create `link` pointing at `target`; directory links need their own call.
#[cfg(windows)]
pub fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    let resolved = link
        .parent()
        .map(|p| p.join(target))
        .unwrap_or_else(|| target.to_path_buf());
    if resolved.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(not(windows))]
pub fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(unsupported("symlink"))
}

/// Remove a non-directory entry; directory symlinks need remove_dir on Windows.
pub fn remove_entry(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let is_link = fs::symlink_metadata(path)
                .map(|m| m.file_type().is_symlink())
                .unwrap_or(false);
            if is_link { fs::remove_dir(path) } else { Err(e) }
        }
    }
}
