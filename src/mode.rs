//! Run-mode resolution and the per-invocation context.
//!
//! The mode is resolved once at the start of command handling from the layered
//! switches (config file, global flag, per-command flags) and then travels,
//! read-only, inside an [`Invocation`] to every operation.

use chrono::{DateTime, Local};
use std::fmt;

use crate::confirm::Prompter;

/// Whether intended actions are only announced or actually performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    DryRun,
    Execute,
}

impl RunMode {
    pub fn is_dry_run(self) -> bool {
        self == RunMode::DryRun
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunMode::DryRun => "DRY-RUN",
            RunMode::Execute => "EXECUTE",
        })
    }
}

/// Resolve the effective mode and interactivity for one invocation.
///
/// Precedence: local dry-run > local execute > global default. Interactivity is
/// passed through as given; the confirmation gate ignores it in dry-run.
pub fn resolve_mode(
    global_execute: bool,
    local_execute: bool,
    local_dry_run: bool,
    interactive: bool,
) -> (RunMode, bool) {
    let mut mode = if global_execute {
        RunMode::Execute
    } else {
        RunMode::DryRun
    };
    if local_execute {
        mode = RunMode::Execute;
    }
    if local_dry_run {
        mode = RunMode::DryRun;
    }
    (mode, interactive)
}

/// Source of "now" for backup names; injectable so tests get stable names.
pub type Clock = fn() -> DateTime<Local>;

/// Immutable context shared by every step of one command invocation.
pub struct Invocation<'a> {
    pub mode: RunMode,
    pub interactive: bool,
    pub assume_yes: bool,
    pub prompter: &'a dyn Prompter,
    pub clock: Clock,
}

impl<'a> Invocation<'a> {
    pub fn new(mode: RunMode, interactive: bool, assume_yes: bool, prompter: &'a dyn Prompter) -> Self {
        Self {
            mode,
            interactive,
            assume_yes,
            prompter,
            clock: Local::now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.mode.is_dry_run()
    }
}

impl fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("mode", &self.mode)
            .field("interactive", &self.interactive)
            .field("assume_yes", &self.assume_yes)
            .finish_non_exhaustive()
    }
}
