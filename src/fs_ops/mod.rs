//! Filesystem building blocks: operand resolution, conflict handling, the
//! action executor and the platform primitives that run inside its thunks.

pub mod conflict;
pub mod executor;
pub mod helpers;
mod meta;
pub mod resolve;
pub mod transfer;
pub mod trash;

pub use conflict::{ConflictPolicy, backup_target, resolve_conflict};
pub use executor::{Action, ActionKind, Outcome, perform, perform_in};
pub use helpers::{describe_io_error, io_error_with_help_io};
pub use resolve::{PathSet, expand_tilde, resolve_paths};
pub use transfer::{exists_nofollow, is_real_dir};
pub use trash::Trash;
