//! Delete, optionally filtered, optionally into the trash.
//!
//! Guards, checked before any prompt or mutation:
//! - `--file-only` excludes `--dir-only` and `--empty-only`.
//! - A real directory needs `--recursive` or `--empty-only` unless it is being
//!   trashed or filtered out by `--file-only`. This is a hard refusal, not a prompt.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{BatchReport, check_interrupt};
use crate::confirm::{confirm, confirm_each};
use crate::errors::FsxError;
use crate::fs_ops::transfer::remove_path;
use crate::fs_ops::{Outcome, PathSet, Trash, exists_nofollow, is_real_dir, perform_in, resolve_paths};
use crate::mode::{Invocation, RunMode};
use crate::platform;

#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    pub paths: Vec<String>,
    pub file_only: bool,
    pub dir_only: bool,
    pub empty_only: bool,
    pub recursive: bool,
    /// Trash root to move entries into instead of deleting them.
    pub trash: Option<PathBuf>,
}

impl DeleteOptions {
    fn validate(&self) -> Result<(), FsxError> {
        if self.file_only && self.dir_only {
            return Err(FsxError::usage("--file-only and --dir-only are mutually exclusive"));
        }
        if self.file_only && self.empty_only {
            return Err(FsxError::usage("--file-only and --empty-only are mutually exclusive"));
        }
        Ok(())
    }

    /// Directory deletion needs an explicit recursive or empty-only choice.
    fn check_directory_guard(&self, items: &PathSet) -> Result<(), FsxError> {
        if self.trash.is_some() || self.recursive || self.empty_only || self.file_only {
            return Ok(());
        }
        if let Some(dir) = items.iter().find(|p| is_real_dir(p)) {
            return Err(FsxError::usage(format!(
                "{} is a directory; use --recursive or --empty-only",
                dir.display()
            )));
        }
        Ok(())
    }

    /// Reason to leave `p` alone under the active filters, if any.
    fn filter_out(&self, p: &Path) -> Option<&'static str> {
        let real_dir = is_real_dir(p);
        if self.file_only && real_dir {
            return Some("skip directory (--file-only)");
        }
        if self.dir_only && !real_dir {
            return Some("skip non-directory (--dir-only)");
        }
        if self.empty_only {
            if !real_dir {
                return Some("skip non-directory (--empty-only)");
            }
            if !dir_is_empty(p) {
                return Some("skip non-empty directory");
            }
        }
        None
    }
}

fn dir_is_empty(p: &Path) -> bool {
    fs::read_dir(p)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

pub fn delete(inv: &Invocation<'_>, opts: &DeleteOptions) -> Result<BatchReport, FsxError> {
    opts.validate()?;
    let items = resolve_paths(&opts.paths)?;
    if items.is_empty() {
        return Err(FsxError::usage("no paths matched"));
    }
    opts.check_directory_guard(&items)?;

    if inv.mode == RunMode::Execute
        && !confirm(inv.prompter, &format!("Delete {} entries?", items.len()), inv.assume_yes)
    {
        return Err(FsxError::Cancelled("delete".into()));
    }

    let trash = opts.trash.as_ref().map(Trash::new);
    let mut trash_ready = trash.as_ref().is_none_or(Trash::exists);

    let mut report = BatchReport::default();
    for p in &items {
        check_interrupt()?;
        if !exists_nofollow(p) {
            report.skip(p, "missing");
            continue;
        }
        if let Some(reason) = opts.filter_out(p) {
            report.skip(p, reason);
            continue;
        }

        let result = (|| -> Result<Outcome, FsxError> {
            if let Some(trash) = &trash {
                if !trash_ready {
                    let root = trash.files_dir();
                    info!(trash = %root.display(), "creating trash directory");
                    perform_in(inv.mode, format!("mkdir -p {}", root.display()), || trash.ensure())?;
                    trash_ready = true;
                }
                confirm_each(inv, &format!("Move to trash: {}?", p.display()))?;
                let slot = trash.slot_for(p);
                return perform_in(
                    inv.mode,
                    format!("trash {} -> {}", p.display(), slot.display()),
                    || trash.put(p, (inv.clock)()).map(|_| ()),
                );
            }

            if is_real_dir(p) {
                if opts.empty_only {
                    confirm_each(inv, &format!("Remove empty directory: {}?", p.display()))?;
                    perform_in(inv.mode, format!("rmdir {}", p.display()), || fs::remove_dir(p))
                } else {
                    confirm_each(inv, &format!("Delete directory recursively: {}?", p.display()))?;
                    perform_in(inv.mode, format!("rm -r {}", p.display()), || remove_path(p))
                }
            } else {
                confirm_each(inv, &format!("Delete file: {}?", p.display()))?;
                perform_in(inv.mode, format!("rm {}", p.display()), || platform::remove_entry(p))
            }
        })();
        report.absorb(p, result)?;
    }
    debug!(performed = report.performed, skipped = report.skipped, "delete finished");
    Ok(report)
}
