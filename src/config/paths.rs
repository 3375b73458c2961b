//! Config file location and symlink checks.
//!
//! Precedence: `--config` flag, then `FSX_CONFIG`, then the per-user default
//! (`<config dir>/fsx/config.xml`). Nothing here creates files.

use dirs::config_dir;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

/// Where the config path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Flag,
    Env,
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigSource::Flag => "--config",
            ConfigSource::Env => CONFIG_ENV,
            ConfigSource::Default => "default location",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub source: ConfigSource,
}

/// OS-appropriate default config path.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(mut base) = config_dir() {
        base.push("fsx");
        base.push("config.xml");
        Some(base)
    } else {
        dirs::home_dir().map(|h| h.join(".config").join("fsx").join("config.xml"))
    }
}

/// Pick the config path from an explicit flag, an env value, or the default.
/// Empty values are ignored.
pub fn resolve_location(flag: Option<&Path>, env: Option<OsString>) -> Option<ConfigLocation> {
    if let Some(p) = flag.filter(|p| !p.as_os_str().is_empty()) {
        return Some(ConfigLocation {
            path: p.to_path_buf(),
            source: ConfigSource::Flag,
        });
    }
    if let Some(v) = env.filter(|v| !v.is_empty()) {
        return Some(ConfigLocation {
            path: PathBuf::from(v),
            source: ConfigSource::Env,
        });
    }
    default_config_path().map(|path| ConfigLocation {
        path,
        source: ConfigSource::Default,
    })
}

/// `resolve_location` with the live `FSX_CONFIG` value.
pub fn locate(flag: Option<&Path>) -> Option<ConfigLocation> {
    resolve_location(flag, std::env::var_os(CONFIG_ENV))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.as_os_str().is_empty() {
            break;
        }
        if let Ok(meta) = fs::symlink_metadata(anc)
            && meta.file_type().is_symlink()
        {
            return Ok(true);
        }
        p = anc.parent();
    }
    Ok(false)
}
