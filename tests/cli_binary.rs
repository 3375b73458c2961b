use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

use assert_cmd::cargo;

/// Run the binary with `FSX_CONFIG` pinned to `cfg` so the user's real config
/// never leaks in.
fn fsx(cfg: &Path, args: &[&str]) -> Output {
    let me = cargo::cargo_bin!("fsx");
    Command::new(me)
        .env("FSX_CONFIG", cfg)
        .env_remove("RUST_LOG")
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("spawn binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn path_arg(p: &Path) -> String {
    p.to_string_lossy().into_owned()
}

#[test]
fn dry_run_is_the_default() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("absent.xml");
    let target = td.path().join("new");

    let out = fsx(&cfg, &["mkdir", &path_arg(&target)]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let text = stdout(&out);
    assert!(text.contains("[MODE] DRY-RUN"), "stdout: {text}");
    assert!(text.contains("mkdir"), "stdout: {text}");
    assert!(!target.exists());
    assert!(!cfg.exists(), "config must not be created");
}

#[test]
fn execute_flag_performs() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("absent.xml");
    let target = td.path().join("made");

    let out = fsx(&cfg, &["mkdir", "-x", &path_arg(&target)]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("[MODE] EXECUTE"));
    assert!(target.is_dir());
}

#[test]
fn config_execute_default_and_dry_run_override() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(&cfg, "<config>\n  <execute>true</execute>\n  <log_level>quiet</log_level>\n</config>\n").unwrap();

    let first = td.path().join("first");
    let out = fsx(&cfg, &["mkdir", &path_arg(&first)]);
    assert!(out.status.success());
    assert!(first.is_dir());

    let second = td.path().join("second");
    let out = fsx(&cfg, &["--dry-run", "mkdir", &path_arg(&second)]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("[MODE] DRY-RUN"));
    assert!(!second.exists());

    let third = td.path().join("third");
    let out = fsx(&cfg, &["mkdir", "-n", &path_arg(&third)]);
    assert!(out.status.success());
    assert!(!third.exists());
}

#[test]
fn malformed_config_exits_one() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(&cfg, "<config><execute>maybe</execute></config>").unwrap();

    let out = fsx(&cfg, &["mkdir", &path_arg(&td.path().join("x"))]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!td.path().join("x").exists());
}

#[test]
fn no_command_prints_help_and_exits_two() {
    let td = tempdir().unwrap();
    let out = fsx(&td.path().join("absent.xml"), &[]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stdout(&out).contains("Usage"));
}

#[test]
fn conflicting_policy_flags_exit_two() {
    let td = tempdir().unwrap();
    let a = td.path().join("a");
    let b = td.path().join("b");
    fs::write(&a, b"a").unwrap();
    let out = fsx(
        &td.path().join("absent.xml"),
        &["cp", "-x", "--force", "--backup", &path_arg(&a), &path_arg(&b)],
    );
    assert_eq!(out.status.code(), Some(2));
    assert!(!b.exists());
}

#[test]
fn existing_directory_fails_item_exits_one() {
    let td = tempdir().unwrap();
    let out = fsx(&td.path().join("absent.xml"), &["mkdir", "-x", &path_arg(td.path())]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn delete_without_terminal_is_cancelled() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("absent.xml");
    let victim = td.path().join("victim.txt");
    fs::write(&victim, b"v").unwrap();

    let out = fsx(&cfg, &["rm", "-x", &path_arg(&victim)]);
    assert_eq!(out.status.code(), Some(3));
    assert!(victim.exists());

    let out = fsx(&cfg, &["rm", "-x", "-y", &path_arg(&victim)]);
    assert!(out.status.success());
    assert!(!victim.exists());
}

#[test]
fn recursive_guard_exits_two() {
    let td = tempdir().unwrap();
    let dir = td.path().join("full");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("f"), b"f").unwrap();

    let out = fsx(&td.path().join("absent.xml"), &["rm", "-x", "-y", &path_arg(&dir)]);
    assert_eq!(out.status.code(), Some(2));
    assert!(dir.join("f").exists());
}

#[test]
fn examples_both_spellings() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("absent.xml");
    let flag = fsx(&cfg, &["--examples"]);
    let sub = fsx(&cfg, &["examples"]);
    assert!(flag.status.success() && sub.status.success());
    assert!(stdout(&flag).contains("fsx"));
    assert_eq!(stdout(&flag), stdout(&sub));
}

#[test]
fn print_config_reports_env_path() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("custom.xml");
    let out = fsx(&cfg, &["--print-config"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("custom.xml"), "stdout: {text}");
    assert!(text.contains("FSX_CONFIG"), "stdout: {text}");
    assert!(!cfg.exists());
}

#[test]
fn ls_lists_sorted_names() {
    let td = tempdir().unwrap();
    for name in ["b.txt", "a.txt", ".hidden"] {
        fs::write(td.path().join(name), b"").unwrap();
    }
    let out = fsx(&td.path().join("absent.xml"), &["ls", &path_arg(td.path())]);
    assert!(out.status.success());
    let text = stdout(&out);
    let a = text.find("a.txt").expect("a.txt listed");
    let b = text.find("b.txt").expect("b.txt listed");
    assert!(a < b);
    assert!(!text.contains(".hidden"));
    assert!(!text.contains("[MODE]"), "ls is read-only and has no banner");
}
