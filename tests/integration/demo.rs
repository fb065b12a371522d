//! `tintlog demo`: full logger setup with console and file sinks.

use std::fs;

use predicates::prelude::*;

use crate::tintlog;

#[test]
fn demo_writes_console_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("server.log");
    let archive_dir = dir.path().join("logs");

    let output = tintlog()
        .args(["demo", "--color=never", "--level=debug", "--log-file"])
        .arg(&log)
        .arg("--archive-dir")
        .arg(&archive_dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(archive_dir.is_dir());

    let console = String::from_utf8(output.stdout).unwrap();
    assert!(!console.contains('\x1b'));
    assert!(console.contains(" INF \"Listener running.\" net.addr=[::]:19132 net.proto_id=766\n"));
    assert!(console.contains(" DBG \"Loading world.\" overworld dimension=overworld\n"));
    assert!(console.contains(" WRN \"Player joined with high latency.\" Steve ping_ms=312\n"));
    assert!(console.contains(" ERR \"Chunk save failed.\" nether \"disk full\"\n"));

    let file = fs::read_to_string(&log).unwrap();
    assert_eq!(file.lines().count(), 5);
    assert!(file.lines().all(|l| l.starts_with("time=")));
    assert!(file.contains("level=WARN msg=\"Player joined with high latency.\" player=Steve ping_ms=312\n"));
    assert!(file.contains("level=ERROR msg=\"Chunk save failed.\" world=nether err=\"disk full\"\n"));
}

#[test]
fn demo_respects_min_level() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("server.log");

    tintlog()
        .args(["demo", "--color=never", "--level=warn", "--log-file"])
        .arg(&log)
        .arg("--archive-dir")
        .arg(dir.path().join("logs"))
        .assert()
        .success()
        .stdout(predicate::str::contains("INF").not())
        .stderr(predicate::str::contains("demo complete"));

    let file = fs::read_to_string(&log).unwrap();
    assert_eq!(file.lines().count(), 2);
    assert!(!file.contains("level=DEBUG"));
}

#[test]
fn demo_appends_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("server.log");
    for _ in 0..2 {
        tintlog()
            .args(["demo", "--color=never", "--level=error", "--log-file"])
            .arg(&log)
            .arg("--archive-dir")
            .arg(dir.path().join("logs"))
            .assert()
            .success();
    }
    assert_eq!(fs::read_to_string(&log).unwrap().lines().count(), 2);
}
