//! Operand resolution.
//! - `~` is expanded to the home directory first.
//! - Literal operands resolve to exactly one path whether or not it exists.
//! - Wildcard operands are matched against the entries of their parent
//!   directory; the parent part is taken literally.
//! - Results are de-duplicated by normalized path, first appearance wins.
//!
//! Notes:
//! - Read-only: this only lists directories, it never stats for existence.
//!   Missing paths are the consuming operation's business.

use glob::{MatchOptions, Pattern};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::FsxError;

const WILDCARD_CHARS: &[char] = &['*', '?', '[', ']'];

/// Ordered, duplicate-free sequence of resolved paths.
pub type PathSet = Vec<PathBuf>;

/// Expand a leading `~` or `~/` to the current user's home directory.
/// `~user` forms are left untouched.
pub fn expand_tilde(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

pub fn has_wildcard(raw: &str) -> bool {
    raw.contains(WILDCARD_CHARS)
}

/// Identity used for de-duplication: drops `.` components and trailing separators.
fn normalized(p: &Path) -> PathBuf {
    let simplified = dunce::simplified(p);
    let mut out = PathBuf::new();
    for comp in simplified.components() {
        match comp {
            Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Expand one wildcard operand against its parent directory.
fn expand_pattern(expanded: &Path) -> Result<Vec<PathBuf>, FsxError> {
    let name = expanded
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = expanded.parent().unwrap_or(Path::new(""));

    if has_wildcard(&parent.to_string_lossy()) {
        debug!(parent = %parent.display(), "wildcards in parent directories are matched literally");
    }

    let parent_literal = Pattern::escape(&parent.to_string_lossy());
    let full = if parent_literal.is_empty() {
        name.clone()
    } else {
        Path::new(&parent_literal).join(&name).to_string_lossy().into_owned()
    };

    let opts = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let paths = glob::glob_with(&full, opts)
        .map_err(|e| FsxError::usage(format!("invalid pattern '{}': {}", expanded.display(), e)))?;

    let mut out = Vec::new();
    for entry in paths {
        match entry {
            Ok(p) => out.push(p),
            Err(e) => debug!(error = %e, "skipping unreadable entry during expansion"),
        }
    }
    Ok(out)
}

/// Resolve raw operands into a PathSet.
pub fn resolve_paths<S: AsRef<str>>(raw: &[S]) -> Result<PathSet, FsxError> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for r in raw {
        let r = r.as_ref();
        let expanded = expand_tilde(r);
        let candidates = if has_wildcard(r) {
            expand_pattern(&expanded)?
        } else {
            vec![expanded]
        };
        trace!(operand = r, matches = candidates.len(), "resolved operand");

        for c in candidates {
            if seen.insert(normalized(&c)) {
                out.push(c);
            }
        }
    }
    Ok(out)
}
