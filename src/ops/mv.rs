//! Move: rename when possible, copy + remove across filesystems.

use tracing::debug;

use super::{BatchReport, TransferOptions, TransferPlan, check_interrupt, ensure_distinct};
use crate::confirm::confirm_each;
use crate::errors::FsxError;
use crate::fs_ops::transfer::move_path;
use crate::fs_ops::{Outcome, exists_nofollow, perform_in, resolve_conflict, resolve_paths};
use crate::mode::Invocation;

pub fn move_paths(inv: &Invocation<'_>, opts: &TransferOptions) -> Result<BatchReport, FsxError> {
    let sources = resolve_paths(&opts.sources)?;
    if sources.is_empty() {
        return Err(FsxError::usage("no source matched"));
    }
    let plan = TransferPlan::new(sources.len(), &opts.destination)?;
    let pairs = plan.pairs(&sources)?;
    debug!(sources = sources.len(), dest = %plan.destination.display(), into_dir = plan.into_dir, "move planned");

    let mut report = BatchReport::default();
    for (src, dest) in &pairs {
        check_interrupt()?;
        if !exists_nofollow(src) {
            report.skip(src, "source missing");
            continue;
        }

        let result = (|| -> Result<Outcome, FsxError> {
            ensure_distinct("mv", src, dest)?;
            if exists_nofollow(dest) {
                resolve_conflict(inv, dest, opts.policy)?;
            }
            confirm_each(inv, &format!("Move: {} -> {}?", src.display(), dest.display()))?;
            perform_in(
                inv.mode,
                format!("mv {} -> {}", src.display(), dest.display()),
                || move_path(src, dest),
            )
        })();
        report.absorb(src, result)?;
    }
    Ok(report)
}
