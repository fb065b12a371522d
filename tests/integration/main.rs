//! CLI integration tests for the `tintlog` binary.

mod colorize;
mod config_file;
mod demo;
mod rotate;
mod strip_completions;

use assert_cmd::Command;

/// The binary with no user config file in reach.
#[allow(deprecated)]
pub fn tintlog() -> Command {
    let mut cmd = Command::cargo_bin("tintlog").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/tintlog-test-no-config");
    cmd.env_remove("NO_COLOR");
    cmd.env_remove("FORCE_COLOR");
    cmd
}
