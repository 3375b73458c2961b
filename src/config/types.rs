//! Core configuration types.
//! - Config holds runtime settings with safe defaults (dry-run, no log file).
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::fs_ops::trash::default_trash_root;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Warnings and errors (default)
    #[default]
    Normal,
    /// Every performed action
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" | "warn" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}' (quiet, normal, info, debug)"))
    }
}

/// Effective settings for one run: file values with CLI overrides applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Global default run mode; false means dry-run
    pub execute: bool,
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Trash root for `rm --trash`; the per-user data dir when unset
    pub trash_dir: Option<PathBuf>,
}

impl Config {
    pub fn trash_root(&self) -> Option<PathBuf> {
        self.trash_dir.clone().or_else(default_trash_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loglevel_parse_aliases() {
        assert_eq!(LogLevel::parse("QUIET"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::parse(" normal "), Some(LogLevel::Normal));
        assert_eq!(LogLevel::parse("verbose"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("loud"), None);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn defaults_are_safe() {
        let cfg = Config::default();
        assert!(!cfg.execute);
        assert_eq!(cfg.log_level, LogLevel::Normal);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn explicit_trash_dir_wins() {
        let cfg = Config {
            trash_dir: Some(PathBuf::from("/srv/trash")),
            ..Default::default()
        };
        assert_eq!(cfg.trash_root(), Some(PathBuf::from("/srv/trash")));
    }
}
