//! Config module.
//! Provides configuration types, the file location chain and XML loading.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{ConfigLocation, ConfigSource, default_config_path, locate, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{load, load_config_from_xml_path, parse_config_xml};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FSX_CONFIG";
