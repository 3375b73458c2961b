//! Confirmation gate.
//! - `Prompter` is the capability that actually asks a yes/no question.
//! - `confirm` auto-approves with assume-yes, otherwise asks.
//! - `confirm_each` is the extra per-action brake for interactive execute runs.
//!
//! No terminal attached means "no": an unattended run never guesses consent.

use std::cell::RefCell;
use std::collections::VecDeque;

use dialoguer::Confirm;
use tracing::debug;

use crate::errors::FsxError;
use crate::mode::Invocation;

/// Something that can answer a yes/no question.
pub trait Prompter {
    fn ask(&self, message: &str) -> bool;
}

/// Interactive prompt on the controlling terminal; defaults to "no".
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&self, message: &str) -> bool {
        if !atty::is(atty::Stream::Stdin) {
            debug!(prompt = message, "stdin is not a terminal; answering no");
            return false;
        }
        match Confirm::new().with_prompt(message).default(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                debug!(prompt = message, error = %e, "prompt failed; answering no");
                false
            }
        }
    }
}

/// Canned answers, consumed in order. Answers "no" once exhausted and records
/// every question it was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or(false)
    }
}

/// Ask `message` unless assume-yes is set.
pub fn confirm(prompter: &dyn Prompter, message: &str, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }
    prompter.ask(message)
}

/// Per-action brake: only prompts in execute mode with interactivity on.
/// A refusal cancels the remainder of the batch.
pub fn confirm_each(inv: &Invocation<'_>, message: &str) -> Result<(), FsxError> {
    if inv.is_dry_run() || !inv.interactive {
        return Ok(());
    }
    if confirm(inv.prompter, message, inv.assume_yes) {
        Ok(())
    } else {
        Err(FsxError::Cancelled(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::RunMode;

    #[test]
    fn assume_yes_skips_prompt() {
        let p = ScriptedPrompter::new([false]);
        assert!(confirm(&p, "go?", true));
        assert!(p.asked().is_empty());
    }

    #[test]
    fn exhausted_script_answers_no() {
        let p = ScriptedPrompter::new([true]);
        assert!(confirm(&p, "one?", false));
        assert!(!confirm(&p, "two?", false));
        assert_eq!(p.asked(), vec!["one?".to_string(), "two?".to_string()]);
    }

    #[test]
    fn confirm_each_is_noop_in_dry_run() {
        let p = ScriptedPrompter::new([false]);
        let inv = Invocation::new(RunMode::DryRun, true, false, &p);
        confirm_each(&inv, "rm a?").unwrap();
        assert!(p.asked().is_empty());
    }

    #[test]
    fn confirm_each_is_noop_when_not_interactive() {
        let p = ScriptedPrompter::new([false]);
        let inv = Invocation::new(RunMode::Execute, false, false, &p);
        confirm_each(&inv, "rm a?").unwrap();
        assert!(p.asked().is_empty());
    }

    #[test]
    fn confirm_each_refusal_cancels() {
        let p = ScriptedPrompter::new([false]);
        let inv = Invocation::new(RunMode::Execute, true, false, &p);
        let err = confirm_each(&inv, "rm a?").unwrap_err();
        assert!(matches!(err, FsxError::Cancelled(_)));
    }

    #[test]
    fn confirm_each_assume_yes_overrides_interactive() {
        let p = ScriptedPrompter::new([]);
        let inv = Invocation::new(RunMode::Execute, true, true, &p);
        confirm_each(&inv, "rm a?").unwrap();
        assert!(p.asked().is_empty());
    }
}
