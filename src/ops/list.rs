//! Read-only listing (`ls`). Never goes through the executor.

use chrono::{DateTime, Local};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::errors::FsxError;
use crate::fs_ops::{exists_nofollow, is_real_dir, resolve_paths};
use crate::output as out;
#[cfg(unix)]
use crate::platform;

const S_IFMT: u32 = 0o170000;
const S_IFSOCK: u32 = 0o140000;
const S_IFLNK: u32 = 0o120000;
const S_IFBLK: u32 = 0o060000;
const S_IFDIR: u32 = 0o040000;
const S_IFCHR: u32 = 0o020000;
const S_IFIFO: u32 = 0o010000;

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub paths: Vec<String>,
    pub all: bool,
    pub long: bool,
    pub recursive: bool,
}

/// `1536` -> `2K`; whole numbers in B, K, M, G, T, P.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "K", "M", "G", "T", "P"];
    let mut n = bytes as f64;
    for unit in &UNITS[..UNITS.len() - 1] {
        if n < 1024.0 {
            return format!("{n:.0}{unit}");
        }
        n /= 1024.0;
    }
    format!("{n:.0}{}", UNITS[UNITS.len() - 1])
}

/// `ls`-style rendering of raw `st_mode` bits, e.g. `drwxr-xr-x`.
pub fn mode_string(mode: u32) -> String {
    let kind = match mode & S_IFMT {
        S_IFDIR => 'd',
        S_IFLNK => 'l',
        S_IFCHR => 'c',
        S_IFBLK => 'b',
        S_IFIFO => 'p',
        S_IFSOCK => 's',
        _ => '-',
    };
    let bit = |mask: u32, c: char| if mode & mask != 0 { c } else { '-' };
    let special = |exec: u32, flag: u32, set: char, unset: char| match (mode & exec != 0, mode & flag != 0) {
        (true, true) => set,
        (false, true) => unset,
        (true, false) => 'x',
        (false, false) => '-',
    };

    let mut s = String::with_capacity(10);
    s.push(kind);
    s.push(bit(0o400, 'r'));
    s.push(bit(0o200, 'w'));
    s.push(special(0o100, 0o4000, 's', 'S'));
    s.push(bit(0o040, 'r'));
    s.push(bit(0o020, 'w'));
    s.push(special(0o010, 0o2000, 's', 'S'));
    s.push(bit(0o004, 'r'));
    s.push(bit(0o002, 'w'));
    s.push(special(0o001, 0o1000, 't', 'T'));
    s
}

#[cfg(unix)]
fn raw_mode(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    meta.mode()
}

#[cfg(not(unix))]
fn raw_mode(meta: &fs::Metadata) -> u32 {
    let ft = meta.file_type();
    let kind = if ft.is_symlink() {
        S_IFLNK
    } else if ft.is_dir() {
        S_IFDIR
    } else {
        0o100000
    };
    let perms = if meta.permissions().readonly() { 0o555 } else { 0o777 };
    kind | perms
}

#[cfg(unix)]
fn owner_of(meta: &fs::Metadata) -> (String, String) {
    use std::os::unix::fs::MetadataExt;
    (platform::user_name(meta.uid()), platform::group_name(meta.gid()))
}

#[cfg(not(unix))]
fn owner_of(_meta: &fs::Metadata) -> (String, String) {
    ("-".to_string(), "-".to_string())
}

fn display_name(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.display().to_string())
}

fn long_line(p: &Path) -> String {
    let name = display_name(p);
    let meta = match fs::symlink_metadata(p) {
        Ok(m) => m,
        Err(_) => return format!("?????????? {name} (unreadable)"),
    };
    let (user, group) = owner_of(&meta);
    let mtime = meta
        .modified()
        .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| "????-??-?? ??:??".to_string());
    let shown = if meta.file_type().is_symlink() {
        match fs::read_link(p) {
            Ok(t) => format!("{name} -> {}", t.display()),
            Err(_) => name,
        }
    } else {
        name
    };
    format!(
        "{} {}:{:8} {:>6} {}  {}",
        mode_string(raw_mode(&meta)),
        user,
        group,
        human_size(meta.len()),
        mtime,
        shown
    )
}

struct Lister<'a, 'w> {
    opts: &'a ListOptions,
    w: &'w mut dyn Write,
}

impl Lister<'_, '_> {
    fn entry(&mut self, p: &Path) -> io::Result<()> {
        let line = if self.opts.long { long_line(p) } else { display_name(p) };
        writeln!(self.w, "{line}")
    }

    fn show(&mut self, p: &Path) -> io::Result<()> {
        if !exists_nofollow(p) {
            out::print_warn(&format!("not found: {}", p.display()));
            return Ok(());
        }
        if !is_real_dir(p) {
            return self.entry(p);
        }

        writeln!(self.w, "{}:", p.display())?;
        let mut entries: Vec<PathBuf> = fs::read_dir(p)?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|e| self.opts.all || !display_name(e).starts_with('.'))
            .collect();
        entries.sort_by_key(|e| display_name(e).to_lowercase());

        for e in &entries {
            self.entry(e)?;
        }
        if self.opts.recursive {
            for e in entries.iter().filter(|e| is_real_dir(e)) {
                self.show(e)?;
            }
        }
        Ok(())
    }
}

/// Write the listing for `opts` to `w`. No operands lists the current directory.
pub fn list(opts: &ListOptions, w: &mut dyn Write) -> Result<(), FsxError> {
    let targets = if opts.paths.is_empty() {
        vec![std::env::current_dir().map_err(|e| FsxError::platform("ls .", e))?]
    } else {
        resolve_paths(&opts.paths)?
    };

    let mut lister = Lister { opts, w };
    for t in &targets {
        lister
            .show(t)
            .map_err(|e| FsxError::platform(format!("ls {}", t.display()), e))?;
    }
    Ok(())
}
