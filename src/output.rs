use owo_colors::OwoColorize;

use crate::mode::RunMode;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// An action that would run in execute mode.
pub fn print_dry(msg: &str) {
    if is_tty() {
        println!("{} {}", "dry:".blue().bold(), msg);
    } else {
        println!("dry: {}", msg);
    }
}

/// Banner printed once per mutating command.
pub fn print_mode(mode: RunMode) {
    let label = format!("[MODE] {mode}");
    if !is_tty() {
        println!("{label}");
    } else if mode.is_dry_run() {
        println!("{}", label.blue().bold());
    } else {
        println!("{}", label.red().bold());
    }
}

/// Print a plain user-facing line (no prefix). Used for listings and the
/// examples text, which users may script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
