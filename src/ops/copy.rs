//! Copy: files keep their times and mode; directories are copied recursively.
//! A symlink source is followed unless it dangles, in which case the link
//! itself is copied.

use std::path::Path;
use tracing::debug;

use super::{BatchReport, TransferOptions, TransferPlan, check_interrupt, ensure_distinct};
use crate::confirm::confirm_each;
use crate::errors::FsxError;
use crate::fs_ops::transfer::{copy_file, copy_link, copy_tree};
use crate::fs_ops::{Outcome, exists_nofollow, is_real_dir, perform_in, resolve_conflict, resolve_paths};
use crate::mode::Invocation;

fn is_dangling_link(p: &Path) -> bool {
    exists_nofollow(p) && !p.exists()
}

pub fn copy(inv: &Invocation<'_>, opts: &TransferOptions) -> Result<BatchReport, FsxError> {
    let sources = resolve_paths(&opts.sources)?;
    if sources.is_empty() {
        return Err(FsxError::usage("no source matched"));
    }
    let plan = TransferPlan::new(sources.len(), &opts.destination)?;
    let pairs = plan.pairs(&sources)?;
    debug!(sources = sources.len(), dest = %plan.destination.display(), into_dir = plan.into_dir, "copy planned");

    let mut report = BatchReport::default();
    for (src, dest) in &pairs {
        check_interrupt()?;
        if !exists_nofollow(src) {
            report.skip(src, "source missing");
            continue;
        }

        let result = (|| -> Result<Outcome, FsxError> {
            ensure_distinct("cp", src, dest)?;
            if exists_nofollow(dest) {
                resolve_conflict(inv, dest, opts.policy)?;
            }
            if is_real_dir(src) {
                confirm_each(inv, &format!("Copy directory: {} -> {}?", src.display(), dest.display()))?;
                perform_in(
                    inv.mode,
                    format!("cp -a {} -> {}", src.display(), dest.display()),
                    || copy_tree(src, dest),
                )
            } else if is_dangling_link(src) {
                confirm_each(inv, &format!("Copy link: {} -> {}?", src.display(), dest.display()))?;
                perform_in(
                    inv.mode,
                    format!("cp -P {} -> {}", src.display(), dest.display()),
                    || copy_link(src, dest),
                )
            } else {
                confirm_each(inv, &format!("Copy file: {} -> {}?", src.display(), dest.display()))?;
                perform_in(
                    inv.mode,
                    format!("cp {} -> {}", src.display(), dest.display()),
                    || copy_file(src, dest),
                )
            }
        })();
        report.absorb(src, result)?;
    }
    Ok(report)
}
