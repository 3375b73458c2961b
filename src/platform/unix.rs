//! Unix implementations of platform helpers.

use nix::unistd::{Gid, Group, Uid, User};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

/// Open log file for appending; set 0600 only when creating a new file.
/// If the file already exists, we preserve its existing permissions to avoid
/// clobbering administrator adjustments (e.g. group-readable for log shipping).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    let existed = path.exists();
    let f = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600) // applies on create
        .open(path)?;
    if !existed {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(f)
}

/// chmod (follows symlinks, like chmod(2)).
pub fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

/// chown (follows symlinks). `None` leaves that id unchanged.
pub fn chown(path: &Path, uid: Option<u32>, gid: Option<u32>) -> io::Result<()> {
    nix::unistd::chown(path, uid.map(Uid::from_raw), gid.map(Gid::from_raw))
        .map_err(io::Error::from)
}

/// Numeric uid for a user name or a numeric string. `Ok(None)` if no such user.
pub fn lookup_user(name: &str) -> io::Result<Option<u32>> {
    if let Ok(id) = name.parse::<u32>() {
        return Ok(Some(id));
    }
    let user = User::from_name(name).map_err(io::Error::from)?;
    Ok(user.map(|u| u.uid.as_raw()))
}

/// Numeric gid for a group name or a numeric string. `Ok(None)` if no such group.
pub fn lookup_group(name: &str) -> io::Result<Option<u32>> {
    if let Ok(id) = name.parse::<u32>() {
        return Ok(Some(id));
    }
    let group = Group::from_name(name).map_err(io::Error::from)?;
    Ok(group.map(|g| g.gid.as_raw()))
}

/// User name for display, numeric fallback.
pub fn user_name(uid: u32) -> String {
    match User::from_uid(Uid::from_raw(uid)) {
        Ok(Some(u)) => u.name,
        _ => uid.to_string(),
    }
}

/// Group name for display, numeric fallback.
pub fn group_name(gid: u32) -> String {
    match Group::from_gid(Gid::from_raw(gid)) {
        Ok(Some(g)) => g.name,
        _ => gid.to_string(),
    }
}

/// Create `link` pointing at `target` (target is stored verbatim).
pub fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Remove a non-directory entry (file or symlink of any kind).
pub fn remove_entry(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}
