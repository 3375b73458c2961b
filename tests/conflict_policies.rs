use chrono::{DateTime, Local, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};

use fsx::confirm::ScriptedPrompter;
use fsx::fs_ops::ConflictPolicy;
use fsx::mode::{Invocation, RunMode};
use fsx::ops::{self, TransferOptions};
use fsx::FsxError;
use tempfile::tempdir;

fn fixed_clock() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 10, 6, 14, 3, 9).unwrap()
}

fn transfer(src: &Path, dest: &Path, policy: ConflictPolicy) -> TransferOptions {
    TransferOptions {
        sources: vec![src.to_string_lossy().into_owned()],
        destination: dest.to_string_lossy().into_owned(),
        policy,
    }
}

fn setup() -> (tempfile::TempDir, PathBuf, PathBuf) {
    let td = tempdir().unwrap();
    let src = td.path().join("new.conf");
    let dest = td.path().join("app.conf");
    fs::write(&src, b"new").unwrap();
    fs::write(&dest, b"old").unwrap();
    (td, src, dest)
}

#[test]
fn abort_reports_conflict_and_keeps_destination() {
    let (_td, src, dest) = setup();
    let p = ScriptedPrompter::new([true]);
    let inv = Invocation::new(RunMode::Execute, false, false, &p);

    let report = ops::copy(&inv, &transfer(&src, &dest, ConflictPolicy::Abort)).unwrap();
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].error, FsxError::Conflict { .. }));
    assert_eq!(fs::read(&dest).unwrap(), b"old");
    assert!(p.asked().is_empty(), "abort must not prompt");
}

#[test]
fn confirmed_backup_keeps_old_content_beside_new() {
    let (td, src, dest) = setup();
    let p = ScriptedPrompter::new([true]);
    let inv = Invocation::new(RunMode::Execute, false, false, &p).with_clock(fixed_clock);

    let report = ops::copy(&inv, &transfer(&src, &dest, ConflictPolicy::Backup)).unwrap();
    assert!(report.is_clean());
    assert_eq!(fs::read(&dest).unwrap(), b"new");
    let backup = td.path().join("app.conf.bak.20251006-140309");
    assert_eq!(fs::read(backup).unwrap(), b"old");
    assert_eq!(p.asked().len(), 1);
    assert!(p.asked()[0].contains("Backup existing target"));
}

#[test]
fn refused_backup_cancels_batch() {
    let (_td, src, dest) = setup();
    let p = ScriptedPrompter::new([false]);
    let inv = Invocation::new(RunMode::Execute, false, false, &p);

    let err = ops::move_paths(&inv, &transfer(&src, &dest, ConflictPolicy::Backup)).unwrap_err();
    assert!(matches!(err, FsxError::Cancelled(_)));
    assert_eq!(fs::read(&dest).unwrap(), b"old");
    assert!(src.exists());
}

#[test]
fn force_with_assume_yes_overwrites_without_backup() {
    let (td, src, dest) = setup();
    let p = ScriptedPrompter::new([]);
    let inv = Invocation::new(RunMode::Execute, false, true, &p);

    let report = ops::copy(&inv, &transfer(&src, &dest, ConflictPolicy::Force)).unwrap();
    assert!(report.is_clean());
    assert_eq!(fs::read(&dest).unwrap(), b"new");
    let leftovers: Vec<_> = fs::read_dir(td.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.contains(".bak."))
        .collect();
    assert!(leftovers.is_empty(), "unexpected backups: {leftovers:?}");
}

#[test]
fn force_move_replaces_directory_destination() {
    let td = tempdir().unwrap();
    let src = td.path().join("fresh");
    let dest = td.path().join("site");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("index.html"), b"v2").unwrap();
    fs::create_dir_all(dest.join("old")).unwrap();

    // `site` is an existing directory, so the source lands inside it unless we
    // point at the exact path; conflict on site/fresh first.
    fs::create_dir_all(dest.join("fresh")).unwrap();
    fs::write(dest.join("fresh").join("stale.html"), b"v1").unwrap();

    let p = ScriptedPrompter::new([]);
    let inv = Invocation::new(RunMode::Execute, false, true, &p);
    let report = ops::move_paths(&inv, &transfer(&src, &dest, ConflictPolicy::Force)).unwrap();

    assert!(report.is_clean());
    assert!(!src.exists());
    assert_eq!(fs::read(dest.join("fresh").join("index.html")).unwrap(), b"v2");
    assert!(!dest.join("fresh").join("stale.html").exists());
    assert!(dest.join("old").is_dir());
}

#[test]
fn abort_in_one_item_does_not_stop_the_others() {
    let td = tempdir().unwrap();
    let dest = td.path().join("dest");
    fs::create_dir(&dest).unwrap();
    fs::write(dest.join("a"), b"occupied").unwrap();
    for name in ["a", "b"] {
        fs::write(td.path().join(name), name.as_bytes()).unwrap();
    }

    let p = ScriptedPrompter::new([]);
    let inv = Invocation::new(RunMode::Execute, false, false, &p);
    let opts = TransferOptions {
        sources: vec![
            td.path().join("a").to_string_lossy().into_owned(),
            td.path().join("b").to_string_lossy().into_owned(),
        ],
        destination: dest.to_string_lossy().into_owned(),
        policy: ConflictPolicy::Abort,
    };
    let report = ops::copy(&inv, &opts).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.performed, 1);
    assert_eq!(fs::read(dest.join("a")).unwrap(), b"occupied");
    assert_eq!(fs::read(dest.join("b")).unwrap(), b"b");
}

type TransferOp = fn(&Invocation<'_>, &TransferOptions) -> Result<fsx::BatchReport, FsxError>;

const TRANSFERS: [(&str, TransferOp); 2] = [("cp", ops::copy), ("mv", ops::move_paths)];

#[test]
fn source_landing_on_itself_is_left_alone() {
    for (name, op) in TRANSFERS {
        for policy in [ConflictPolicy::Force, ConflictPolicy::Backup] {
            let td = tempdir().unwrap();
            let src = td.path().join("a.txt");
            fs::write(&src, b"keep").unwrap();

            let p = ScriptedPrompter::new([]);
            let inv = Invocation::new(RunMode::Execute, false, true, &p);
            // Destination is the directory already holding the source.
            let report = op(&inv, &transfer(&src, td.path(), policy)).unwrap();

            assert_eq!(report.failures.len(), 1, "{name} {policy:?}");
            let msg = report.failures[0].error.to_string();
            assert!(msg.contains("same file"), "{name} {policy:?}: {msg}");
            assert_eq!(fs::read(&src).unwrap(), b"keep", "{name} {policy:?}");
            let names: Vec<_> = fs::read_dir(td.path())
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            assert_eq!(names, vec!["a.txt".to_string()], "{name} {policy:?}");
        }
    }
}

#[test]
fn exact_path_onto_itself_and_directory_onto_itself() {
    for (name, op) in TRANSFERS {
        let td = tempdir().unwrap();
        let file = td.path().join("f");
        let dir = td.path().join("d");
        fs::write(&file, b"f").unwrap();
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("inner"), b"i").unwrap();

        let p = ScriptedPrompter::new([]);
        let inv = Invocation::new(RunMode::Execute, false, true, &p);

        let report = op(&inv, &transfer(&file, &file, ConflictPolicy::Force)).unwrap();
        assert_eq!(report.failures.len(), 1, "{name}");
        assert_eq!(fs::read(&file).unwrap(), b"f", "{name}");

        let report = op(&inv, &transfer(&dir, td.path(), ConflictPolicy::Force)).unwrap();
        assert_eq!(report.failures.len(), 1, "{name}");
        assert_eq!(fs::read(dir.join("inner")).unwrap(), b"i", "{name}");
    }
}
