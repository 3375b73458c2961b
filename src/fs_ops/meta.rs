//! Metadata preservation for copies.
//! Copies access/modification times and permission bits from source to destination.

use filetime::{FileTime, set_file_times, set_symlink_file_times};
use std::fs;
use std::io;
use std::path::Path;

fn times_of(meta: &fs::Metadata) -> (FileTime, FileTime) {
    (
        FileTime::from_last_access_time(meta),
        FileTime::from_last_modification_time(meta),
    )
}

/// Apply `src_meta`'s times and mode bits to `dest` (which must not be a symlink).
pub(crate) fn preserve_metadata(dest: &Path, src_meta: &fs::Metadata) -> io::Result<()> {
    fs::set_permissions(dest, src_meta.permissions())?;
    let (at, mt) = times_of(src_meta);
    set_file_times(dest, at, mt)
}

/// Times only, applied to the link itself. Best-effort: some platforms refuse.
pub(crate) fn preserve_symlink_times(dest: &Path, src_meta: &fs::Metadata) {
    let (at, mt) = times_of(src_meta);
    let _ = set_symlink_file_times(dest, at, mt);
}
