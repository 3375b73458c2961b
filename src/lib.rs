//! Core library for `fsx`: guarded filesystem operations.
//!
//! Every mutation (mkdir, copy, move, delete, chmod, chown, symlink) runs as an
//! [`fs_ops::Action`] through a single executor that only announces it in
//! dry-run mode. The run mode is dry-run unless execution is explicitly asked
//! for, conflicts on existing destinations follow a fixed policy, and prompts go
//! through an injectable [`confirm::Prompter`].

pub mod cli;
pub mod config;
pub mod confirm;
pub mod errors;
pub mod fs_ops;
pub mod mode;
pub mod ops;
pub mod output;
pub mod platform;
pub mod shutdown;

pub use config::{Config, LogLevel, default_config_path, path_has_symlink_ancestor};
pub use confirm::{Prompter, ScriptedPrompter, TerminalPrompter};
pub use errors::FsxError;
pub use fs_ops::{ConflictPolicy, Outcome, PathSet, resolve_paths};
pub use mode::{Invocation, RunMode, resolve_mode};
pub use ops::BatchReport;
