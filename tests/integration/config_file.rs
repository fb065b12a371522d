//! TOML config file loading and precedence.

use std::fs;

use predicates::prelude::*;

use crate::tintlog;

const INPUT: &str = "level=info msg=spawn dimension=overworld addr=1.2.3.4 player=steve\n";

#[test]
fn config_file_fields_profile_and_transforms() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
color = "never"

[profile]
hide_keys = { player = false }
level_labels = { INFO = "I" }

[transforms.dimension]
overworld = "OVERWORLD"
"#,
    )
    .unwrap();

    tintlog()
        .arg("--config")
        .arg(&path)
        .write_stdin(INPUT)
        .assert()
        .success()
        .stdout("I spawn dimension=OVERWORLD addr=1.2.3.4 player=steve\n");
}

#[test]
fn config_found_through_xdg_config_home() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("tintlog")).unwrap();
    fs::write(
        dir.path().join("tintlog").join("config.toml"),
        "color = \"always\"\n[fields]\naddr = \"red\"\n",
    )
    .unwrap();

    tintlog()
        .env("XDG_CONFIG_HOME", dir.path())
        .write_stdin(INPUT)
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[31m1.2.3.4"));
}

#[test]
fn cli_flag_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "color = \"always\"\n").unwrap();

    tintlog()
        .arg("--config")
        .arg(&path)
        .arg("--color=never")
        .write_stdin(INPUT)
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn invalid_style_exits_with_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[fields]\naddr = \"sparkly\"\n").unwrap();

    tintlog()
        .arg("--config")
        .arg(&path)
        .write_stdin(INPUT)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid style 'sparkly'"));
}

#[test]
fn malformed_toml_exits_with_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "color = \n").unwrap();

    tintlog()
        .arg("--config")
        .arg(&path)
        .write_stdin(INPUT)
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("tintlog: config file error"));
}

#[test]
fn missing_explicit_config_is_error() {
    tintlog()
        .args(["--config", "/nonexistent/tintlog.toml"])
        .write_stdin(INPUT)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}
