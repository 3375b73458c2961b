//! Create directories, optionally with missing parents.

use std::fs;
use std::io;

use super::{BatchReport, check_interrupt};
use crate::confirm::confirm_each;
use crate::errors::FsxError;
use crate::fs_ops::{Outcome, exists_nofollow, expand_tilde, perform_in};
use crate::mode::Invocation;

#[derive(Debug, Clone, Default)]
pub struct MkdirOptions {
    pub dirs: Vec<String>,
    pub parents: bool,
}

/// Operands are taken literally (no wildcard expansion): they name paths that
/// do not exist yet.
pub fn mkdir(inv: &Invocation<'_>, opts: &MkdirOptions) -> Result<BatchReport, FsxError> {
    if opts.dirs.is_empty() {
        return Err(FsxError::usage("mkdir needs at least one directory"));
    }

    let mut report = BatchReport::default();
    for raw in &opts.dirs {
        check_interrupt()?;
        let path = expand_tilde(raw);
        let desc = if opts.parents {
            format!("mkdir -p {}", path.display())
        } else {
            format!("mkdir {}", path.display())
        };

        let result = (|| -> Result<Outcome, FsxError> {
            if exists_nofollow(&path) {
                return Err(FsxError::platform(
                    desc.clone(),
                    io::Error::from(io::ErrorKind::AlreadyExists),
                ));
            }
            confirm_each(inv, &format!("Create directory: {}?", path.display()))?;
            perform_in(inv.mode, desc.clone(), || {
                if opts.parents {
                    fs::create_dir_all(&path)
                } else {
                    fs::create_dir(&path)
                }
            })
        })();
        report.absorb(&path, result)?;
    }
    Ok(report)
}
