//! Action executor: the single choke point for every filesystem mutation.
//!
//! An [`Action`] pairs a human-readable description with a deferred mutation.
//! Its kind is fixed at construction from the run mode, so dry-run and execute
//! share one code path in every operation:
//! - `Announce`: print the description; the mutation is dropped uninvoked.
//! - `Perform`: run the mutation, print success or return a tagged error.

use std::io;
use tracing::{debug, info};

use crate::errors::FsxError;
use crate::mode::RunMode;
use crate::output as out;

/// Deferred filesystem mutation.
pub type Thunk<'a> = Box<dyn FnOnce() -> io::Result<()> + 'a>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Announce,
    Perform,
}

pub struct Action<'a> {
    pub kind: ActionKind,
    pub description: String,
    thunk: Thunk<'a>,
}

impl<'a> Action<'a> {
    pub fn new(
        mode: RunMode,
        description: impl Into<String>,
        thunk: impl FnOnce() -> io::Result<()> + 'a,
    ) -> Self {
        let kind = match mode {
            RunMode::DryRun => ActionKind::Announce,
            RunMode::Execute => ActionKind::Perform,
        };
        Self {
            kind,
            description: description.into(),
            thunk: Box::new(thunk),
        }
    }
}

impl std::fmt::Debug for Action<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("kind", &self.kind)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// What happened to an action that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Announced,
    Performed,
}

/// Announce or run `action`.
pub fn perform(action: Action<'_>) -> Result<Outcome, FsxError> {
    let Action {
        kind,
        description,
        thunk,
    } = action;
    match kind {
        ActionKind::Announce => {
            debug!(action = %description, "dry-run");
            out::print_dry(&description);
            Ok(Outcome::Announced)
        }
        ActionKind::Perform => match thunk() {
            Ok(()) => {
                info!(action = %description, "performed");
                out::print_success(&description);
                Ok(Outcome::Performed)
            }
            Err(e) => Err(FsxError::platform(description, e)),
        },
    }
}

/// Shorthand for building and performing an action in one step.
pub fn perform_in<'a>(
    mode: RunMode,
    description: impl Into<String>,
    thunk: impl FnOnce() -> io::Result<()> + 'a,
) -> Result<Outcome, FsxError> {
    perform(Action::new(mode, description, thunk))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn dry_run_never_invokes_thunk() {
        let called = Cell::new(false);
        let outcome = perform_in(RunMode::DryRun, "rm x", || {
            called.set(true);
            Ok(())
        })
        .unwrap();
        assert_eq!(outcome, Outcome::Announced);
        assert!(!called.get());
    }

    #[test]
    fn execute_invokes_thunk_once() {
        let calls = Cell::new(0);
        let outcome = perform_in(RunMode::Execute, "rm x", || {
            calls.set(calls.get() + 1);
            Ok(())
        })
        .unwrap();
        assert_eq!(outcome, Outcome::Performed);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn failure_is_tagged_with_description() {
        let err = perform_in(RunMode::Execute, "chmod 0755 /nope", || {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        })
        .unwrap_err();
        match err {
            FsxError::Platform { action, source } => {
                assert_eq!(action, "chmod 0755 /nope");
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn kind_follows_mode() {
        assert_eq!(Action::new(RunMode::DryRun, "x", || Ok(())).kind, ActionKind::Announce);
        assert_eq!(Action::new(RunMode::Execute, "x", || Ok(())).kind, ActionKind::Perform);
    }
}
