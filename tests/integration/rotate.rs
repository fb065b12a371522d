//! `tintlog rotate`.

use std::fs::{self, File};
use std::io::Read;
use std::path::PathBuf;

use flate2::read::GzDecoder;
use predicates::prelude::*;

use crate::tintlog;

#[test]
fn rotate_archives_and_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("server.log");
    let archive_dir = dir.path().join("archive");
    let contents = "time=t level=INFO msg=one\ntime=t level=WARN msg=two\n";
    fs::write(&log, contents).unwrap();

    let output = tintlog()
        .arg("--log-file")
        .arg(&log)
        .arg("--archive-dir")
        .arg(&archive_dir)
        .arg("rotate")
        .output()
        .unwrap();
    assert!(output.status.success());

    let printed = String::from_utf8(output.stdout).unwrap();
    let archive = PathBuf::from(printed.trim_end());
    assert!(archive.starts_with(&archive_dir));
    let name = archive.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("server_"), "{name}");
    assert!(name.ends_with(".log.gz"), "{name}");

    assert_eq!(fs::metadata(&log).unwrap().len(), 0);
    let mut decoded = String::new();
    GzDecoder::new(File::open(&archive).unwrap())
        .read_to_string(&mut decoded)
        .unwrap();
    assert_eq!(decoded, contents);
}

#[test]
fn rotate_without_log_file_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let archive_dir = dir.path().join("archive");
    tintlog()
        .arg("rotate")
        .arg("--log-file")
        .arg(dir.path().join("missing.log"))
        .arg("--archive-dir")
        .arg(&archive_dir)
        .assert()
        .success()
        .stdout("");
    assert!(archive_dir.is_dir());
}

#[test]
fn rotate_into_blocked_dir_fails_with_io_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("server.log");
    fs::write(&log, "msg=keep\n").unwrap();
    let blocker = dir.path().join("archive");
    fs::write(&blocker, "not a directory").unwrap();

    tintlog()
        .arg("rotate")
        .arg("--log-file")
        .arg(&log)
        .arg("--archive-dir")
        .arg(&blocker)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("create archive dir"));
    assert_eq!(fs::read_to_string(&log).unwrap(), "msg=keep\n");
}
