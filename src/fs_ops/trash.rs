//! Per-user trash (freedesktop layout).
//! - `<root>/files/<name>` holds the trashed entry.
//! - `<root>/info/<name>.trashinfo` records where it came from and when.
//! - Name collisions inside the trash get a `-<millis>-<pid>[-n]` suffix before
//!   the extension, so nothing already in the trash is clobbered.

use chrono::{DateTime, Local};
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::helpers::io_error_with_help_io;
use super::transfer::{exists_nofollow, move_path};

pub const TRASHINFO_EXTENSION: &str = "trashinfo";
pub const TRASHINFO_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Default trash root: `<data dir>/Trash` (`~/.local/share/Trash` on Linux).
pub fn default_trash_root() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("Trash"))
}

#[derive(Debug, Clone)]
pub struct Trash {
    root: PathBuf,
}

impl Trash {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn files_dir(&self) -> PathBuf {
        self.root.join("files")
    }

    pub fn info_dir(&self) -> PathBuf {
        self.root.join("info")
    }

    pub fn exists(&self) -> bool {
        self.files_dir().is_dir() && self.info_dir().is_dir()
    }

    /// Create `files/` and `info/` (idempotent).
    pub fn ensure(&self) -> io::Result<()> {
        let files = self.files_dir();
        let info = self.info_dir();
        fs::create_dir_all(&files).map_err(io_error_with_help_io("create trash directory", &files))?;
        fs::create_dir_all(&info).map_err(io_error_with_help_io("create trash directory", &info))
    }

    /// Where `p` would land if trashed now.
    pub fn slot_for(&self, p: &Path) -> PathBuf {
        let name = p
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("unnamed"));
        unique_destination(&self.files_dir().join(name))
    }

    /// Move `p` into the trash and write its info record. Returns the new location.
    pub fn put(&self, p: &Path, now: DateTime<Local>) -> io::Result<PathBuf> {
        self.ensure()?;
        let dest = self.slot_for(p);
        let mut info_name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        info_name.push(".");
        info_name.push(TRASHINFO_EXTENSION);
        let info_path = self.info_dir().join(info_name);

        let original = std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());
        let record = format!(
            "[Trash Info]\nPath={}\nDeletionDate={}\n",
            encode_path(&original),
            now.format(TRASHINFO_TIME_FORMAT)
        );
        let mut f = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&info_path)
            .map_err(io_error_with_help_io("create trash info", &info_path))?;
        f.write_all(record.as_bytes())
            .map_err(io_error_with_help_io("write trash info", &info_path))?;

        if let Err(e) = move_path(p, &dest) {
            let _ = fs::remove_file(&info_path);
            return Err(e);
        }
        Ok(dest)
    }
}

/// Raw bytes of `p`; non-UTF-8 names survive on Unix.
#[cfg(unix)]
fn path_bytes(p: &Path) -> std::borrow::Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    std::borrow::Cow::Borrowed(p.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(p: &Path) -> std::borrow::Cow<'_, [u8]> {
    std::borrow::Cow::Owned(p.to_string_lossy().into_owned().into_bytes())
}

/// Percent-encode everything but unreserved characters and `/`.
fn encode_path(p: &Path) -> String {
    let raw = path_bytes(p);
    let mut out = String::with_capacity(raw.len());
    for &b in raw.iter() {
        if b.is_ascii_alphanumeric() || matches!(b, b'/' | b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// Return `candidate` if free, else a sibling named
/// `<stem>-<millis>-<pid>[-<n>][.<ext>]` that is.
pub(crate) fn unique_destination(candidate: &Path) -> PathBuf {
    if !exists_nofollow(candidate) {
        return candidate.to_path_buf();
    }

    let epoch_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let pid = std::process::id();
    let stem = candidate
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("file"));
    let ext = candidate.extension().map(|e| e.to_os_string());

    let with_suffix = |suffix: String| {
        let mut name = stem.clone();
        name.push(suffix);
        if let Some(e) = &ext {
            name.push(".");
            name.push(e);
        }
        candidate.with_file_name(name)
    };

    let mut dest = with_suffix(format!("-{epoch_ms}-{pid}"));
    let mut n = 2u32;
    while exists_nofollow(&dest) {
        dest = with_suffix(format!("-{epoch_ms}-{pid}-{n}"));
        n += 1;
    }
    dest
}
