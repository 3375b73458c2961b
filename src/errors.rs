//! Typed error definitions for fsx.
//! Splits failures into batch-aborting ones (usage, cancellation, interrupt) and
//! per-item ones (conflict, platform) so operations can decide whether to continue.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fs_ops::helpers::describe_io_error;

#[derive(Debug, Error)]
pub enum FsxError {
    /// Invalid flag combination, missing argument, malformed mode string, missing
    /// destination directory. Detected before anything is touched.
    #[error("{0}")]
    Usage(String),

    #[error("destination already exists: {} (use --force or --backup)", .path.display())]
    Conflict { path: PathBuf },

    #[error("cancelled by user: {0}")]
    Cancelled(String),

    #[error("{action} failed: {}", describe_io_error(.source))]
    Platform {
        action: String,
        #[source]
        source: io::Error,
    },

    #[error("operation interrupted by user")]
    Interrupted,
}

impl FsxError {
    pub fn usage(msg: impl Into<String>) -> Self {
        FsxError::Usage(msg.into())
    }

    pub fn platform(action: impl Into<String>, source: io::Error) -> Self {
        FsxError::Platform {
            action: action.into(),
            source,
        }
    }

    /// Stable short code used in structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            FsxError::Usage(_) => "usage",
            FsxError::Conflict { .. } => "conflict",
            FsxError::Cancelled(_) => "cancelled",
            FsxError::Platform { .. } => "platform",
            FsxError::Interrupted => "interrupted",
        }
    }

    /// Whether this error ends the whole batch rather than just the current item.
    pub fn aborts_batch(&self) -> bool {
        matches!(
            self,
            FsxError::Usage(_) | FsxError::Cancelled(_) | FsxError::Interrupted
        )
    }

    /// Process exit status for an error that reaches the top level.
    pub fn exit_code(&self) -> u8 {
        match self {
            FsxError::Usage(_) => 2,
            FsxError::Cancelled(_) => 3,
            FsxError::Interrupted => 130,
            FsxError::Conflict { .. } | FsxError::Platform { .. } => 1,
        }
    }
}
