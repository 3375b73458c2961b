//! Create `LINKPATH -> TARGET`.
//!
//! The link slot is cleared and filled inside one thunk: whatever occupies it at
//! execution time is removed right before the link is created.

use std::io;
use std::path::Path;

use super::{BatchReport, check_interrupt};
use crate::confirm::confirm_each;
use crate::errors::FsxError;
use crate::fs_ops::transfer::remove_path;
use crate::fs_ops::{ConflictPolicy, Outcome, exists_nofollow, expand_tilde, perform_in, resolve_conflict};
use crate::mode::Invocation;
use crate::platform;

#[derive(Debug, Clone, Default)]
pub struct SymlinkOptions {
    pub target: String,
    pub link: String,
    pub policy: ConflictPolicy,
}

fn replace_with_link(target: &Path, link: &Path) -> io::Result<()> {
    if exists_nofollow(link) {
        match remove_path(link) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    platform::symlink(target, link)
}

pub fn symlink(inv: &Invocation<'_>, opts: &SymlinkOptions) -> Result<BatchReport, FsxError> {
    if opts.target.is_empty() || opts.link.is_empty() {
        return Err(FsxError::usage("ln needs TARGET and LINKPATH"));
    }
    let target = expand_tilde(&opts.target);
    let link = expand_tilde(&opts.link);
    check_interrupt()?;

    let result = (|| -> Result<Outcome, FsxError> {
        if exists_nofollow(&link) {
            resolve_conflict(inv, &link, opts.policy)?;
        }
        confirm_each(inv, &format!("Symlink: {} -> {}?", link.display(), target.display()))?;
        perform_in(
            inv.mode,
            format!("ln -s {} {}", target.display(), link.display()),
            || replace_with_link(&target, &link),
        )
    })();

    let mut report = BatchReport::default();
    report.absorb(&link, result)?;
    Ok(report)
}
