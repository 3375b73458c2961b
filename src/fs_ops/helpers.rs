//! I/O error helpers.
//!
//! Turns raw `io::Error`s into messages with an actionable hint, used when the
//! executor reports a failed action and when multi-step primitives (copy tree,
//! cross-device move) need to say which step and path failed.
//!
//! Usage:
//!   fs::create_dir(dir).map_err(io_error_with_help_io("create directory", dir))?;

use std::io;
use std::path::Path;

/// Platform hint for a raw OS error code, if we know one.
fn hint_for_code(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        let hint = match code {
            libc::EACCES | libc::EPERM => "permission denied; check ownership and mode bits",
            libc::EXDEV => "cross-device link; source and destination are on different filesystems",
            libc::EBUSY => "resource busy; another process is using it",
            libc::ENOENT => "path not found; verify it exists",
            libc::EEXIST => "already exists",
            libc::ENOTEMPTY => "directory not empty",
            libc::ENOTDIR => "a path component is not a directory",
            libc::EISDIR => "is a directory",
            libc::ENOSPC => "no space left on device",
            libc::EROFS => "read-only filesystem",
            libc::ELOOP => "too many levels of symbolic links",
            libc::ENAMETOOLONG => "file name too long",
            _ => return None,
        };
        Some(hint)
    }
    #[cfg(windows)]
    {
        let hint = match code {
            5 => "access denied; check permissions",
            17 => "not same device; cross-filesystem move",
            32 => "sharing violation; file is in use",
            2 | 3 => "path not found; verify it exists",
            80 | 183 => "already exists",
            112 => "disk full",
            19 => "write protected media",
            206 => "file name too long",
            _ => return None,
        };
        Some(hint)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

fn hint_for_kind(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and mode bits"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        io::ErrorKind::DirectoryNotEmpty => Some("directory not empty"),
        _ => None,
    }
}

/// Render an io::Error with a hint and, when present, the OS error code.
/// Errors carrying their own message (e.g. from `io_error_with_help_io`) are
/// rendered as-is.
pub fn describe_io_error(e: &io::Error) -> String {
    let mut msg = e.to_string();
    if e.get_ref().is_some() {
        return msg;
    }
    let hint = match e.raw_os_error() {
        Some(code) => hint_for_code(code),
        None => hint_for_kind(e.kind()),
    };
    if let Some(h) = hint {
        msg.push_str(" (");
        msg.push_str(h);
        msg.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Adapter for io::Result code: prefixes the failing step and path while
/// preserving the original ErrorKind and OS code in the message.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| {
        io::Error::new(
            e.kind(),
            format!("{} '{}': {}", op, path.display(), describe_io_error(&e)),
        )
    }
}

/// True when a rename failed because source and destination live on different filesystems.
pub(crate) fn is_cross_device(e: &io::Error) -> bool {
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => e.kind() == io::ErrorKind::CrossesDevices,
    }
}
