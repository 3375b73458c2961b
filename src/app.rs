//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler,
//! resolves the run mode and dispatches to the requested operation.

use clap::CommandFactory;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use fsx::cli::{Args, Command, EXAMPLES, ExecFlags};
use fsx::config::{self, Config, ConfigLocation};
use fsx::confirm::TerminalPrompter;
use fsx::mode::{Invocation, resolve_mode};
use fsx::ops::{
    self, BatchReport, ChmodOptions, ChownOptions, DeleteOptions, ListOptions, MkdirOptions,
    SymlinkOptions,
};
use fsx::output as out;
use fsx::{FsxError, shutdown};

use crate::logging::init_tracing;

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn print_config_location(location: Option<&ConfigLocation>) {
    match location {
        Some(loc) => {
            out::print_info(&format!("fsx config path ({}):\n  {}\n", loc.source, loc.path.display()));
            if loc.path.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults apply (dry-run, normal logging).");
            }
        }
        None => out::print_error("Could not determine a config path; set FSX_CONFIG or pass --config."),
    }
}

/// Run the CLI application.
pub fn run(args: Args) -> ExitCode {
    if args.wants_examples() {
        out::print_user(EXAMPLES.trim_end());
        return ExitCode::SUCCESS;
    }

    let location = config::locate(args.config.as_deref());
    if args.print_config {
        print_config_location(location.as_ref());
        return ExitCode::SUCCESS;
    }

    let Some(command) = args.command.clone() else {
        let _ = Args::command().print_help();
        return ExitCode::from(EXIT_USAGE);
    };

    // Build config (may read XML). CLI args override config values.
    let mut cfg = match config::load(location.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = match init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json) {
        Ok(g) => g,
        Err(e) => {
            out::print_error(&format!("Failed to initialize logging: {e}"));
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        if let Err(e) = ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping after the current item...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        }) {
            debug!(error = %e, "could not install Ctrl-C handler");
        }
    }

    debug!(?args, "starting fsx");

    let result = dispatch(&cfg, &command);
    let code = match result {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(report)) => summarize(command.name(), &report),
        Err(e) => {
            error!(code = e.code(), command = command.name(), error = %e, "command failed");
            out::print_error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    };

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    code
}

fn summarize(name: &str, report: &BatchReport) -> ExitCode {
    info!(
        command = name,
        performed = report.performed,
        announced = report.announced,
        skipped = report.skipped,
        failed = report.failures.len(),
        "command finished"
    );
    if report.is_clean() {
        return ExitCode::SUCCESS;
    }
    out::print_warn(&format!("{name}: {} item(s) failed", report.failures.len()));
    ExitCode::from(EXIT_FAILURE)
}

/// Resolve the mode for one mutating command and print the banner.
fn invocation<'p>(cfg: &Config, exec: &ExecFlags, prompter: &'p TerminalPrompter) -> Invocation<'p> {
    let (mode, interactive) = resolve_mode(cfg.execute, exec.execute, exec.dry_run, exec.interactive);
    out::print_mode(mode);
    info!(%mode, interactive, assume_yes = exec.yes, "mode resolved");
    Invocation::new(mode, interactive, exec.yes, prompter)
}

fn list_to_stdout(opts: &ListOptions) -> Result<(), FsxError> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    ops::list(opts, &mut lock)?;
    lock.flush().map_err(|e| FsxError::platform("ls", e))
}

/// Run one command. `Ok(None)` for read-only commands.
fn dispatch(cfg: &Config, command: &Command) -> Result<Option<BatchReport>, FsxError> {
    let prompter = TerminalPrompter;
    let inv = |exec: &ExecFlags| invocation(cfg, exec, &prompter);

    let report = match command {
        Command::Examples => {
            out::print_user(EXAMPLES.trim_end());
            return Ok(None);
        }
        Command::Ls {
            all,
            long,
            recursive,
            paths,
        } => {
            list_to_stdout(&ListOptions {
                paths: paths.clone(),
                all: *all,
                long: *long,
                recursive: *recursive,
            })?;
            return Ok(None);
        }
        Command::Mkdir { exec, parents, dirs } => ops::mkdir(
            &inv(exec),
            &MkdirOptions {
                dirs: dirs.clone(),
                parents: *parents,
            },
        )?,
        Command::Cp(t) => {
            let opts = t.options()?;
            ops::copy(&inv(&t.exec), &opts)?
        }
        Command::Mv(t) => {
            let opts = t.options()?;
            ops::move_paths(&inv(&t.exec), &opts)?
        }
        Command::Rm {
            exec,
            file_only,
            dir_only,
            empty_only,
            recursive,
            trash,
            paths,
        } => {
            let trash = if *trash {
                Some(cfg.trash_root().ok_or_else(|| {
                    FsxError::usage("no trash directory available; set <trash_dir> in the config")
                })?)
            } else {
                None
            };
            ops::delete(
                &inv(exec),
                &DeleteOptions {
                    paths: paths.clone(),
                    file_only: *file_only,
                    dir_only: *dir_only,
                    empty_only: *empty_only,
                    recursive: *recursive,
                    trash,
                },
            )?
        }
        Command::Chmod { exec, mode, paths } => ops::chmod(
            &inv(exec),
            &ChmodOptions {
                mode: mode.clone(),
                paths: paths.clone(),
            },
        )?,
        Command::Chown {
            exec,
            user,
            group,
            paths,
        } => ops::chown(
            &inv(exec),
            &ChownOptions {
                user: user.clone(),
                group: group.clone(),
                paths: paths.clone(),
            },
        )?,
        Command::Ln {
            exec,
            conflict,
            target,
            linkpath,
        } => {
            let opts = SymlinkOptions {
                target: target.clone(),
                link: linkpath.clone(),
                policy: conflict.policy()?,
            };
            ops::symlink(&inv(exec), &opts)?
        }
    };
    Ok(Some(report))
}
