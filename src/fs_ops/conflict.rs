//! Destination conflict handling.
//!
//! Called only when a destination is already occupied (a dangling symlink counts).
//! - Abort: refuse with a conflict error, no prompt.
//! - Backup: move the occupant to `<dest>.bak.<YYYYmmdd-HHMMSS>` after confirmation.
//! - Force: remove the occupant after confirmation.
//!
//! The backup move and the removal are themselves actions, so in dry-run they are
//! only announced. A refused prompt cancels the batch.

use chrono::{DateTime, Local};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::executor::perform_in;
use super::transfer::{is_real_dir, move_path, remove_path};
use crate::confirm::confirm;
use crate::errors::FsxError;
use crate::mode::Invocation;

pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    #[default]
    Abort,
    Force,
    Backup,
}

impl ConflictPolicy {
    /// Build the policy from the `--force` / `--backup` switches.
    pub fn from_flags(force: bool, backup: bool) -> Result<Self, FsxError> {
        match (force, backup) {
            (true, true) => Err(FsxError::usage("--force and --backup are mutually exclusive")),
            (true, false) => Ok(ConflictPolicy::Force),
            (false, true) => Ok(ConflictPolicy::Backup),
            (false, false) => Ok(ConflictPolicy::Abort),
        }
    }
}

/// `<dest>.bak.<timestamp>` next to `dest`.
pub fn backup_target(dest: &Path, now: DateTime<Local>) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("backup"));
    name.push(format!(".bak.{}", now.format(BACKUP_TIMESTAMP_FORMAT)));
    dest.with_file_name(name)
}

/// Clear the way at `dest` according to `policy`.
pub fn resolve_conflict(
    inv: &Invocation<'_>,
    dest: &Path,
    policy: ConflictPolicy,
) -> Result<(), FsxError> {
    debug!(dest = %dest.display(), ?policy, "destination occupied");
    match policy {
        ConflictPolicy::Abort => Err(FsxError::Conflict {
            path: dest.to_path_buf(),
        }),
        ConflictPolicy::Backup => {
            let bk = backup_target(dest, (inv.clock)());
            let question = format!(
                "Conflict: {} exists. Backup existing target to {}?",
                dest.display(),
                bk.display()
            );
            if !confirm(inv.prompter, &question, inv.assume_yes) {
                return Err(FsxError::Cancelled(format!("backup of {}", dest.display())));
            }
            let desc = format!("mv {} -> {}", dest.display(), bk.display());
            perform_in(inv.mode, desc, || move_path(dest, &bk))?;
            Ok(())
        }
        ConflictPolicy::Force => {
            let question = format!("Conflict: {} exists. Overwrite?", dest.display());
            if !confirm(inv.prompter, &question, inv.assume_yes) {
                return Err(FsxError::Cancelled(format!("overwrite of {}", dest.display())));
            }
            let desc = if is_real_dir(dest) {
                format!("rm -r {}", dest.display())
            } else {
                format!("rm {}", dest.display())
            };
            perform_in(inv.mode, desc, || remove_path(dest))?;
            Ok(())
        }
    }
}
