//! chown by name or numeric id. Names are resolved once, before any item.

use super::{BatchReport, check_interrupt};
use crate::confirm::confirm_each;
use crate::errors::FsxError;
use crate::fs_ops::{Outcome, exists_nofollow, perform_in, resolve_paths};
use crate::mode::Invocation;
use crate::platform;

#[derive(Debug, Clone, Default)]
pub struct ChownOptions {
    pub user: Option<String>,
    pub group: Option<String>,
    pub paths: Vec<String>,
}

fn resolve_id(
    kind: &str,
    name: Option<&str>,
    lookup: fn(&str) -> std::io::Result<Option<u32>>,
) -> Result<Option<u32>, FsxError> {
    let Some(name) = name else {
        return Ok(None);
    };
    match lookup(name) {
        Ok(Some(id)) => Ok(Some(id)),
        Ok(None) => Err(FsxError::usage(format!("unknown {kind}: {name}"))),
        Err(e) => Err(FsxError::usage(format!("cannot resolve {kind} '{name}': {e}"))),
    }
}

pub fn chown(inv: &Invocation<'_>, opts: &ChownOptions) -> Result<BatchReport, FsxError> {
    if opts.user.is_none() && opts.group.is_none() {
        return Err(FsxError::usage("chown needs --user and/or --group"));
    }
    let uid = resolve_id("user", opts.user.as_deref(), platform::lookup_user)?;
    let gid = resolve_id("group", opts.group.as_deref(), platform::lookup_group)?;
    let items = resolve_paths(&opts.paths)?;
    if items.is_empty() {
        return Err(FsxError::usage("no paths matched"));
    }

    let owner = format!(
        "{}:{}",
        opts.user.as_deref().unwrap_or("-"),
        opts.group.as_deref().unwrap_or("-")
    );

    let mut report = BatchReport::default();
    for p in &items {
        check_interrupt()?;
        if !exists_nofollow(p) {
            report.skip(p, "missing");
            continue;
        }
        let result = (|| -> Result<Outcome, FsxError> {
            confirm_each(inv, &format!("chown {owner} {}?", p.display()))?;
            perform_in(inv.mode, format!("chown {owner} {}", p.display()), || {
                platform::chown(p, uid, gid)
            })
        })();
        report.absorb(p, result)?;
    }
    Ok(report)
}
