//! Guarded operations: mkdir, copy, move, delete, chmod, chown, symlink, plus
//! the read-only listing.
//!
//! Every mutating operation follows the same skeleton: resolve operands, then per
//! item verify → resolve conflicts → per-item brake → hand a thunk to the executor.
//! Per-item failures (conflict, platform) are reported and the batch continues;
//! usage errors, cancellations and interrupts end it.

mod chmod;
mod chown;
mod copy;
mod delete;
mod list;
mod mkdir;
mod mv;
mod symlink;

pub use chmod::{ChmodOptions, chmod, parse_mode};
pub use chown::{ChownOptions, chown};
pub use copy::copy;
pub use delete::{DeleteOptions, delete};
pub use list::{ListOptions, human_size, list, mode_string};
pub use mkdir::{MkdirOptions, mkdir};
pub use mv::move_paths;
pub use symlink::{SymlinkOptions, symlink};

use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

use crate::errors::FsxError;
use crate::fs_ops::{ConflictPolicy, Outcome, expand_tilde, is_real_dir};
use crate::output as out;
use crate::shutdown;

/// One item that failed without ending the batch.
#[derive(Debug)]
pub struct ItemFailure {
    pub path: PathBuf,
    pub error: FsxError,
}

/// What a batch did.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub performed: usize,
    pub announced: usize,
    pub skipped: usize,
    pub failures: Vec<ItemFailure>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Announced => self.announced += 1,
            Outcome::Performed => self.performed += 1,
        }
    }

    /// Skip an item with a warning; the batch goes on.
    fn skip(&mut self, path: &Path, reason: &str) {
        warn!(path = %path.display(), reason, "skipped");
        out::print_warn(&format!("{reason}: {}", path.display()));
        self.skipped += 1;
    }

    /// Fold one item's result into the report. Batch-ending errors are returned.
    fn absorb(&mut self, path: &Path, result: Result<Outcome, FsxError>) -> Result<(), FsxError> {
        match result {
            Ok(outcome) => {
                self.record(outcome);
                Ok(())
            }
            Err(e) if e.aborts_batch() => Err(e),
            Err(e) => {
                error!(code = e.code(), path = %path.display(), error = %e, "item failed");
                out::print_error(&e.to_string());
                self.failures.push(ItemFailure {
                    path: path.to_path_buf(),
                    error: e,
                });
                Ok(())
            }
        }
    }
}

/// Stop between items once Ctrl-C was pressed.
fn check_interrupt() -> Result<(), FsxError> {
    if shutdown::is_requested() {
        return Err(FsxError::Interrupted);
    }
    Ok(())
}

/// Operands shared by copy and move: sources, one destination, a policy.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    pub sources: Vec<String>,
    pub destination: String,
    pub policy: ConflictPolicy,
}

/// Where each source goes.
#[derive(Debug)]
struct TransferPlan {
    destination: PathBuf,
    into_dir: bool,
}

impl TransferPlan {
    /// Decide whether the destination is a directory to put sources into, and
    /// fail fast on shapes that cannot work.
    fn new(source_count: usize, destination: &str) -> Result<Self, FsxError> {
        let dst = expand_tilde(destination);
        let dst_is_dir = dst.is_dir();
        let into_dir = source_count > 1 || dst_is_dir;

        if into_dir && !dst.exists() {
            return Err(FsxError::usage(format!(
                "multiple sources require an existing destination directory: {}",
                dst.display()
            )));
        }
        if into_dir && !dst_is_dir {
            return Err(FsxError::usage(format!(
                "destination is not a directory: {}",
                dst.display()
            )));
        }
        if !into_dir
            && let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty())
            && !parent.is_dir()
        {
            return Err(FsxError::usage(format!(
                "destination directory does not exist: {}",
                parent.display()
            )));
        }
        Ok(Self {
            destination: dst,
            into_dir,
        })
    }

    fn target_for(&self, src: &Path) -> Result<PathBuf, FsxError> {
        if !self.into_dir {
            return Ok(self.destination.clone());
        }
        let name = src.file_name().ok_or_else(|| {
            FsxError::usage(format!("cannot determine a file name for {}", src.display()))
        })?;
        Ok(self.destination.join(name))
    }

    /// Pair every source with its target. Shape errors for any source are
    /// raised here, before the first item is touched.
    fn pairs(&self, sources: &[PathBuf]) -> Result<Vec<(PathBuf, PathBuf)>, FsxError> {
        let mut out = Vec::with_capacity(sources.len());
        for src in sources {
            let dest = self.target_for(src)?;
            ensure_not_into_itself(src, &dest)?;
            out.push((src.clone(), dest));
        }
        Ok(out)
    }
}

/// True when `a` and `b` name the same filesystem entry.
#[cfg(unix)]
fn same_entry(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (std::fs::symlink_metadata(a), std::fs::symlink_metadata(b)) {
        (Ok(x), Ok(y)) => x.dev() == y.dev() && x.ino() == y.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_entry(a: &Path, b: &Path) -> bool {
    use crate::fs_ops::exists_nofollow;

    fn identity(p: &Path) -> Option<PathBuf> {
        let parent = p.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        Some(dunce::canonicalize(parent).ok()?.join(p.file_name()?))
    }
    exists_nofollow(a) && exists_nofollow(b) && identity(a).is_some() && identity(a) == identity(b)
}

/// Per-item refusal when a source would land on itself. Nothing is touched.
fn ensure_distinct(action: &str, src: &Path, dest: &Path) -> Result<(), FsxError> {
    if !same_entry(src, dest) {
        return Ok(());
    }
    Err(FsxError::platform(
        format!("{action} {} -> {}", src.display(), dest.display()),
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} and {} are the same file", src.display(), dest.display()),
        ),
    ))
}

/// Refuse to copy or move a directory into its own subtree.
fn ensure_not_into_itself(src: &Path, dest: &Path) -> Result<(), FsxError> {
    if !is_real_dir(src) {
        return Ok(());
    }
    let src_real = dunce::canonicalize(src).unwrap_or_else(|_| src.to_path_buf());
    let dest_parent = dest.parent().unwrap_or(Path::new("."));
    let parent_real = dunce::canonicalize(dest_parent).unwrap_or_else(|_| dest_parent.to_path_buf());
    if parent_real.starts_with(&src_real) {
        return Err(FsxError::usage(format!(
            "cannot place directory {} inside itself ({})",
            src.display(),
            dest.display()
        )));
    }
    Ok(())
}
