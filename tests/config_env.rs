use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use fsx::LogLevel;
use fsx::config::{self, ConfigSource};

#[test]
#[serial]
fn env_var_selects_config_and_flag_wins() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("env.xml");
    fs::write(
        &cfg,
        "<config>\n  <execute>true</execute>\n  <log_level>info</log_level>\n</config>\n",
    )
    .unwrap();

    // Serialized: the environment is process-wide.
    unsafe {
        std::env::set_var(config::CONFIG_ENV, &cfg);
    }

    let loc = config::locate(None).expect("location from env");
    assert_eq!(loc.path, cfg);
    assert_eq!(loc.source, ConfigSource::Env);
    let loaded = config::load(Some(&loc)).unwrap();
    assert!(loaded.execute);
    assert_eq!(loaded.log_level, LogLevel::Info);

    let flag = PathBuf::from("/nonexistent/fsx-flag.xml");
    let loc = config::locate(Some(&flag)).unwrap();
    assert_eq!(loc.source, ConfigSource::Flag);
    assert_eq!(loc.path, flag);
    let defaults = config::load(Some(&loc)).unwrap();
    assert!(!defaults.execute);

    unsafe {
        std::env::remove_var(config::CONFIG_ENV);
    }
}

#[test]
#[serial]
fn empty_env_var_falls_back_to_default_location() {
    unsafe {
        std::env::set_var(config::CONFIG_ENV, "");
    }
    let loc = config::locate(None);
    if let Some(loc) = loc {
        assert_eq!(loc.source, ConfigSource::Default);
        assert!(loc.path.ends_with("fsx/config.xml"));
    }
    unsafe {
        std::env::remove_var(config::CONFIG_ENV);
    }
}

#[test]
#[serial]
fn missing_env_file_is_not_created() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("sub").join("config.xml");
    unsafe {
        std::env::set_var(config::CONFIG_ENV, &cfg);
    }

    let loc = config::locate(None).unwrap();
    let loaded = config::load(Some(&loc)).unwrap();
    assert_eq!(loaded, fsx::Config::default());
    assert!(!cfg.exists());
    assert!(!td.path().join("sub").exists());

    unsafe {
        std::env::remove_var(config::CONFIG_ENV);
    }
}
