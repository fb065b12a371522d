//! Command-line argument definitions for `tintlog`.
//!
//! Uses [`clap`] derive macros. Global options may appear before or after the
//! subcommand; with no subcommand, `colorize` runs with default arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::Deserialize;

use crate::level::Level;
use crate::theme::ThemeName;

/// Colorize logfmt-style log lines and manage their log file.
#[derive(Debug, Parser)]
#[command(name = "tintlog", version, about, long_about = None)]
pub struct Cli {
    /// Control color output.
    ///
    /// `auto` enables colors only when stdout is a TTY and `NO_COLOR` is unset.
    #[arg(short = 'c', long, value_enum, global = true)]
    pub color: Option<ColorMode>,

    /// Path to configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Color theme.
    #[arg(short = 't', long, value_enum, global = true)]
    pub theme: Option<ThemeName>,

    /// Append-only log file used by `rotate`, `demo` and `colorize --tee`.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory receiving compressed archives.
    #[arg(long, global = true)]
    pub archive_dir: Option<PathBuf>,

    /// Minimum severity written by `demo`.
    #[arg(short = 'l', long, value_parser = parse_level_arg, global = true)]
    pub level: Option<Level>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Colorize lines from stdin (the default).
    Colorize(ColorizeArgs),
    /// Compress the log file into the archive directory and truncate it.
    Rotate,
    /// Remove ANSI color sequences from stdin.
    Strip,
    /// Emit sample records through a fully configured logger.
    Demo,
    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ColorizeArgs {
    /// Also append the raw input to the log file.
    #[arg(long)]
    pub tee: bool,

    /// Show every key, ignoring the profile's hidden keys.
    #[arg(long)]
    pub no_compact: bool,

    /// Always show these keys (comma-separated, repeatable).
    #[arg(short = 'k', long = "show-key", value_delimiter = ',')]
    pub show_keys: Vec<String>,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Enable colors only when stdout is a TTY.
    #[default]
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}

fn parse_level_arg(s: &str) -> Result<Level, String> {
    Level::from_str_loose(s).ok_or_else(|| {
        format!("invalid level '{s}': expected one of trace, debug, info, warn, error, fatal")
    })
}
