//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Top-level --execute / --dry-run set the global default run mode.
//! - Per-command -x / -n override it for that invocation; -n wins over -x.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::errors::FsxError;
use crate::fs_ops::ConflictPolicy;
use crate::ops::TransferOptions;

pub const EXAMPLES: &str = "\
# 1) Default: safe dry run (nothing changes)
fsx mv /opt/tools/test.py /opt/watcher/

# 2) Really move, asking on conflicts
fsx mv -x /opt/tools/test.py /opt/watcher/

# 3) Really move, confirming every single action
fsx mv -x -i /opt/tools/test.py /opt/watcher/

# 4) Really move, no questions at all (deliberately!)
fsx mv -x -y /opt/tools/test.py /opt/watcher/

# 5) Conflict: back up the existing target instead of overwriting (dry run)
fsx mv -n --backup /opt/tools/test.py /opt/watcher/

# 6) Really copy and replace an existing target, no questions
fsx cp -x -y --force src.txt dest.txt

# 7) Remove empty directories only
fsx rm -x --dir-only --empty-only ~/projects/*

# 8) Move old logs to the trash instead of deleting them
fsx rm -x --trash /var/tmp/*.log

# 9) Permissions and ownership
fsx chmod -x 0644 notes.txt
fsx chown -x -u www-data -g www-data /srv/site

# 10) Symlink LINKPATH -> TARGET, replacing what is there
fsx ln -x -f /opt/app/current ~/app

# 11) Long, recursive listing including hidden entries
fsx ls -laR ~/projects
";

/// Guarded file and folder operations.
/// Every mutating command is a dry run unless execution is requested.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fsx",
    author,
    version,
    about = "Guarded file and folder operations: dry-run by default, explicit execute"
)]
pub struct Args {
    /// Make execute the default mode for this run (per-command -n still wins).
    #[arg(long, conflicts_with = "dry_run")]
    pub execute: bool,

    /// Make dry-run the default mode for this run (overrides the config file).
    #[arg(long)]
    pub dry_run: bool,

    /// Config file to use instead of FSX_CONFIG or the default location.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Enable debug logging (shorthand for --log-level debug).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the config file location and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Print usage examples and exit.
    #[arg(long)]
    pub examples: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Switches shared by every mutating command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ExecFlags {
    /// Only show what would happen (wins over --execute).
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Really perform the actions.
    #[arg(short = 'x', long)]
    pub execute: bool,

    /// Answer yes to every question.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Confirm every single action (execute mode only).
    #[arg(short = 'i', long)]
    pub interactive: bool,
}

/// Conflict switches for commands that write a destination.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConflictFlags {
    /// Replace an existing destination.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Move an existing destination to <dest>.bak.<timestamp> first.
    #[arg(long)]
    pub backup: bool,
}

impl ConflictFlags {
    pub fn policy(&self) -> Result<ConflictPolicy, FsxError> {
        ConflictPolicy::from_flags(self.force, self.backup)
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct TransferArgs {
    #[command(flatten)]
    pub exec: ExecFlags,

    #[command(flatten)]
    pub conflict: ConflictFlags,

    /// One or more sources followed by the destination.
    #[arg(value_name = "SRC... DEST", required = true, num_args = 2.., value_hint = ValueHint::AnyPath)]
    pub paths: Vec<String>,
}

impl TransferArgs {
    pub fn options(&self) -> Result<TransferOptions, FsxError> {
        let (destination, sources) = self
            .paths
            .split_last()
            .filter(|(_, sources)| !sources.is_empty())
            .ok_or_else(|| FsxError::usage("need at least one source and a destination"))?;
        Ok(TransferOptions {
            sources: sources.to_vec(),
            destination: destination.clone(),
            policy: self.conflict.policy()?,
        })
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List files and folders (read-only).
    Ls {
        /// Show hidden entries.
        #[arg(short = 'a', long)]
        all: bool,
        /// Details: mode, owner, size, mtime.
        #[arg(short = 'l', long = "long")]
        long: bool,
        /// Recurse into subdirectories.
        #[arg(short = 'R', long)]
        recursive: bool,
        #[arg(value_hint = ValueHint::AnyPath)]
        paths: Vec<String>,
    },

    /// Create directories.
    Mkdir {
        #[command(flatten)]
        exec: ExecFlags,
        /// Create missing parents too.
        #[arg(short = 'p', long = "parents")]
        parents: bool,
        #[arg(required = true, value_hint = ValueHint::DirPath)]
        dirs: Vec<String>,
    },

    /// Copy files or directory trees.
    Cp(TransferArgs),

    /// Move or rename.
    Mv(TransferArgs),

    /// Delete, optionally filtered or into the trash.
    Rm {
        #[command(flatten)]
        exec: ExecFlags,
        /// Only files and links; directories are skipped.
        #[arg(long)]
        file_only: bool,
        /// Only directories.
        #[arg(long)]
        dir_only: bool,
        /// Only empty directories.
        #[arg(long)]
        empty_only: bool,
        /// Allow deleting directories with their contents.
        #[arg(short = 'r', long)]
        recursive: bool,
        /// Move to the trash instead of deleting.
        #[arg(long)]
        trash: bool,
        #[arg(required = true, value_hint = ValueHint::AnyPath)]
        paths: Vec<String>,
    },

    /// Set permission bits (octal MODE, e.g. 0755 or 644).
    Chmod {
        #[command(flatten)]
        exec: ExecFlags,
        #[arg(value_name = "MODE")]
        mode: String,
        #[arg(required = true, value_hint = ValueHint::AnyPath)]
        paths: Vec<String>,
    },

    /// Set owner and/or group (name or numeric id).
    Chown {
        #[command(flatten)]
        exec: ExecFlags,
        #[arg(short = 'u', long)]
        user: Option<String>,
        #[arg(short = 'g', long)]
        group: Option<String>,
        #[arg(required = true, value_hint = ValueHint::AnyPath)]
        paths: Vec<String>,
    },

    /// Create a symlink LINKPATH -> TARGET.
    Ln {
        #[command(flatten)]
        exec: ExecFlags,
        #[command(flatten)]
        conflict: ConflictFlags,
        #[arg(value_name = "TARGET")]
        target: String,
        #[arg(value_name = "LINKPATH", value_hint = ValueHint::AnyPath)]
        linkpath: String,
    },

    /// Print usage examples.
    Examples,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ls { .. } => "ls",
            Command::Mkdir { .. } => "mkdir",
            Command::Cp(_) => "cp",
            Command::Mv(_) => "mv",
            Command::Rm { .. } => "rm",
            Command::Chmod { .. } => "chmod",
            Command::Chown { .. } => "chown",
            Command::Ln { .. } => "ln",
            Command::Examples => "examples",
        }
    }

    /// Mode switches, for mutating commands only.
    pub fn exec_flags(&self) -> Option<&ExecFlags> {
        match self {
            Command::Mkdir { exec, .. }
            | Command::Rm { exec, .. }
            | Command::Chmod { exec, .. }
            | Command::Chown { exec, .. }
            | Command::Ln { exec, .. } => Some(exec),
            Command::Cp(t) | Command::Mv(t) => Some(&t.exec),
            Command::Ls { .. } | Command::Examples => None,
        }
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config value).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.execute {
            cfg.execute = true;
        }
        if self.dry_run {
            cfg.execute = false;
        }
    }

    pub fn wants_examples(&self) -> bool {
        self.examples || matches!(self.command, Some(Command::Examples))
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse_from(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn transfer_splits_sources_and_destination() {
        let args = parse_from(&["fsx", "mv", "-x", "a", "b", "c", "d/"]);
        let Some(Command::Mv(t)) = args.command else {
            panic!("expected mv");
        };
        let opts = t.options().unwrap();
        assert_eq!(opts.sources, vec!["a", "b", "c"]);
        assert_eq!(opts.destination, "d/");
        assert!(t.exec.execute);
    }

    #[test]
    fn transfer_needs_two_paths() {
        assert!(Args::try_parse_from(["fsx", "cp", "only"]).is_err());
    }

    #[test]
    fn force_and_backup_is_usage_error() {
        let args = parse_from(&["fsx", "cp", "--force", "--backup", "a", "b"]);
        let Some(Command::Cp(t)) = args.command else {
            panic!("expected cp");
        };
        assert!(matches!(t.options(), Err(FsxError::Usage(_))));
    }

    #[test]
    fn global_execute_and_dry_run_conflict() {
        assert!(Args::try_parse_from(["fsx", "--execute", "--dry-run", "ls"]).is_err());
    }

    #[test]
    fn overrides_apply_over_config() {
        let mut cfg = Config {
            execute: true,
            ..Default::default()
        };
        parse_from(&["fsx", "--dry-run", "-d", "ls"]).apply_overrides(&mut cfg);
        assert!(!cfg.execute);
        assert_eq!(cfg.log_level, LogLevel::Debug);

        parse_from(&["fsx", "--execute", "ls"]).apply_overrides(&mut cfg);
        assert!(cfg.execute);
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        assert!(Args::try_parse_from(["fsx", "--log-level", "loud", "ls"]).is_err());
        let args = parse_from(&["fsx", "--log-level", "info", "ls"]);
        assert_eq!(args.effective_log_level(), Some(LogLevel::Info));
    }

    #[test]
    fn ls_flags_combine() {
        let args = parse_from(&["fsx", "ls", "-laR", "x"]);
        let Some(Command::Ls { all, long, recursive, paths }) = args.command else {
            panic!("expected ls");
        };
        assert!(all && long && recursive);
        assert_eq!(paths, vec!["x"]);
    }

    #[test]
    fn examples_either_way() {
        assert!(parse_from(&["fsx", "--examples"]).wants_examples());
        assert!(parse_from(&["fsx", "examples"]).wants_examples());
    }
}
