//! stdin → stdout colorizing.

use std::fs;

use predicates::prelude::*;

use crate::tintlog;

#[test]
fn empty_stdin_exits_zero() {
    tintlog().write_stdin("").assert().success().stdout("");
}

#[test]
fn plain_output_with_default_profile() {
    let input = "time=12:00 level=info msg=hello port=8080\n\
                 level=error msg=boom err=\"disk full\"\n";
    tintlog()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("12:00 INF hello port=8080\nERR boom \"disk full\"\n");
}

#[test]
fn explicit_colorize_subcommand_matches_default() {
    let input = "level=warn msg=careful world=nether\n";
    let implicit = tintlog()
        .arg("--color=never")
        .write_stdin(input)
        .output()
        .unwrap();
    tintlog()
        .args(["colorize", "--color=never"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(String::from_utf8(implicit.stdout).unwrap());
}

#[test]
fn unterminated_last_line_is_completed() {
    tintlog()
        .arg("--color=never")
        .write_stdin("level=info msg=first\nlevel=warn msg=last")
        .assert()
        .success()
        .stdout("INF first\nWRN last\n");
}

#[test]
fn tokens_without_key_are_dropped() {
    tintlog()
        .arg("--color=never")
        .write_stdin("Starting application...\nboot level=info =x msg=up\n\n")
        .assert()
        .success()
        .stdout("\nINF up\n\n");
}

#[test]
fn color_always_emits_ansi() {
    tintlog()
        .arg("--color=always")
        .write_stdin("level=info msg=hello\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b["));
}

#[test]
fn no_color_env_disables_auto_color() {
    tintlog()
        .env("NO_COLOR", "1")
        .env("FORCE_COLOR", "1")
        .write_stdin("level=info msg=hello\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn force_color_env_enables_auto_color() {
    tintlog()
        .env("FORCE_COLOR", "1")
        .write_stdin("level=info msg=hello\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b["));
}

#[test]
fn auto_color_off_when_piped() {
    tintlog()
        .write_stdin("level=info msg=hello\n")
        .assert()
        .success()
        .stdout("INF hello\n");
}

#[test]
fn show_key_and_no_compact() {
    let input = "level=error msg=boom err=eof player=steve\n";
    tintlog()
        .args(["colorize", "--color=never", "--show-key", "err"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("ERR boom err=eof steve\n");
    tintlog()
        .args(["colorize", "--color=never", "--no-compact"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("ERR boom err=eof player=steve\n");
}

#[test]
fn tee_appends_raw_input_to_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("server.log");
    fs::write(&log, "level=debug msg=earlier\n").unwrap();

    tintlog()
        .args(["colorize", "--tee", "--color=always", "--log-file"])
        .arg(&log)
        .write_stdin("level=info msg=a\nlevel=info msg=b")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b["));

    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        "level=debug msg=earlier\nlevel=info msg=a\nlevel=info msg=b\n"
    );
}

#[test]
fn invalid_level_flag_is_usage_error() {
    tintlog()
        .args(["--level", "loud"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid level"));
}
