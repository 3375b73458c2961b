//! chmod with an octal mode string.

use super::{BatchReport, check_interrupt};
use crate::confirm::confirm_each;
use crate::errors::FsxError;
use crate::fs_ops::{Outcome, exists_nofollow, perform_in, resolve_paths};
use crate::mode::Invocation;
use crate::platform;

const MAX_MODE: u32 = 0o7777;

#[derive(Debug, Clone, Default)]
pub struct ChmodOptions {
    pub mode: String,
    pub paths: Vec<String>,
}

/// Parse `0755`, `755` or `0o755` into permission bits.
pub fn parse_mode(raw: &str) -> Result<u32, FsxError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0o")
        .or_else(|| trimmed.strip_prefix("0O"))
        .unwrap_or(trimmed);
    let bad = || FsxError::usage(format!("MODE must be octal, e.g. 0755 or 644 (got '{raw}')"));

    if digits.is_empty() || !digits.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        return Err(bad());
    }
    let mode = u32::from_str_radix(digits, 8).map_err(|_| bad())?;
    if mode > MAX_MODE {
        return Err(FsxError::usage(format!("MODE {raw} is out of range (max 7777)")));
    }
    Ok(mode)
}

pub fn chmod(inv: &Invocation<'_>, opts: &ChmodOptions) -> Result<BatchReport, FsxError> {
    let mode = parse_mode(&opts.mode)?;
    let items = resolve_paths(&opts.paths)?;
    if items.is_empty() {
        return Err(FsxError::usage("no paths matched"));
    }

    let mut report = BatchReport::default();
    for p in &items {
        check_interrupt()?;
        if !exists_nofollow(p) {
            report.skip(p, "missing");
            continue;
        }
        let result = (|| -> Result<Outcome, FsxError> {
            confirm_each(inv, &format!("chmod {mode:04o} {}?", p.display()))?;
            perform_in(inv.mode, format!("chmod {mode:04o} {}", p.display()), || {
                platform::set_mode(p, mode)
            })
        })();
        report.absorb(p, result)?;
    }
    Ok(report)
}
