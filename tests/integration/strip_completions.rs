//! `tintlog strip` and `tintlog completions`.

use predicates::prelude::*;

use crate::tintlog;

#[test]
fn strip_removes_sgr_sequences() {
    tintlog()
        .arg("strip")
        .write_stdin("\x1b[1;31mred\x1b[0m plain\n\x1b[38;2;1;2;3mtrue\x1b[0m")
        .assert()
        .success()
        .stdout("red plain\ntrue");
}

#[test]
fn colorize_then_strip_is_plain_render() {
    let colored = tintlog()
        .arg("--color=always")
        .write_stdin("time=12:00 level=warn msg=hot temp=90\n")
        .output()
        .unwrap();
    assert!(colored.stdout.contains(&0x1b));
    tintlog()
        .arg("strip")
        .write_stdin(colored.stdout)
        .assert()
        .success()
        .stdout("12:00 WRN hot temp=90\n");
}

#[test]
fn bash_completions() {
    tintlog()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tintlog"))
        .stdout(predicate::str::contains("rotate"));
}

#[test]
fn unknown_shell_is_rejected() {
    tintlog().args(["completions", "cmd"]).assert().failure();
}
