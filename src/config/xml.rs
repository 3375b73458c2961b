//! XML configuration support.
//! - Parses config.xml with quick_xml + serde.
//! - Unknown fields, bad booleans and bad log levels are hard errors.
//! - A missing file means defaults; no template is ever written.

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::ConfigLocation;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    execute: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
    trash_dir: Option<String>,
}

// Optional bool that tolerates surrounding whitespace.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("true") | Some("1") => Ok(Some(true)),
        Some("false") | Some("0") => Ok(Some(false)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected true or false, got '{other}'"
        ))),
    }
}

fn non_empty_path(raw: Option<&str>) -> Option<PathBuf> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Parse XML text into a Config.
pub fn parse_config_xml(contents: &str) -> Result<Config> {
    let parsed: XmlConfig = from_xml_str(contents)?;

    let log_level = match parsed.log_level.as_deref().map(str::trim) {
        None | Some("") => LogLevel::default(),
        Some(s) => s.parse::<LogLevel>().map_err(|e| anyhow!(e))?,
    };

    Ok(Config {
        execute: parsed.execute.unwrap_or(false),
        log_level,
        log_file: non_empty_path(parsed.log_file.as_deref()),
        trash_dir: non_empty_path(parsed.trash_dir.as_deref()),
    })
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    parse_config_xml(&contents).with_context(|| format!("parse config xml '{}'", path.display()))
}

/// Load the config at `location`, or defaults when there is no file.
pub fn load(location: Option<&ConfigLocation>) -> Result<Config> {
    match location {
        Some(loc) if loc.path.exists() => {
            debug!(path = %loc.path.display(), source = %loc.source, "loading config");
            load_config_from_xml_path(&loc.path)
        }
        Some(loc) => {
            debug!(path = %loc.path.display(), source = %loc.source, "no config file; using defaults");
            Ok(Config::default())
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use tempfile::tempdir;

    #[test]
    fn full_file_parses() {
        let cfg = parse_config_xml(
            "<config>\n  <execute>true</execute>\n  <log_level>debug</log_level>\n  <log_file>/var/log/fsx.log</log_file>\n  <trash_dir>/srv/trash</trash_dir>\n</config>",
        )
        .unwrap();
        assert!(cfg.execute);
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.log_file, Some(PathBuf::from("/var/log/fsx.log")));
        assert_eq!(cfg.trash_dir, Some(PathBuf::from("/srv/trash")));
    }

    #[test]
    fn whitespace_is_trimmed() {
        let cfg = parse_config_xml("<config><execute> false </execute><log_level> info </log_level></config>")
            .unwrap();
        assert!(!cfg.execute);
        assert_eq!(cfg.log_level, LogLevel::Info);
    }

    #[test]
    fn empty_config_is_defaults() {
        assert_eq!(parse_config_xml("<config></config>").unwrap(), Config::default());
    }

    #[test]
    fn empty_log_file_means_none() {
        let cfg = parse_config_xml("<config><log_file>  </log_file></config>").unwrap();
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(parse_config_xml("<config><download_base>/x</download_base></config>").is_err());
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(parse_config_xml("<config><execute>maybe</execute></config>").is_err());
        assert!(parse_config_xml("<config><log_level>loud</log_level></config>").is_err());
        assert!(parse_config_xml("<config><execute>").is_err());
    }

    #[test]
    fn missing_file_is_defaults_and_not_created() {
        let td = tempdir().unwrap();
        let loc = ConfigLocation {
            path: td.path().join("fsx").join("config.xml"),
            source: ConfigSource::Default,
        };
        assert_eq!(load(Some(&loc)).unwrap(), Config::default());
        assert!(!loc.path.exists());
        assert!(!td.path().join("fsx").exists());
    }
}
