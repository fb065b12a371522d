use std::fs::File;
use std::io::{self, BufRead, BufWriter, IsTerminal, Read, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use tintlog::cli::{Cli, ColorMode, ColorizeArgs, Command};
use tintlog::config::Config;
use tintlog::error::TintError;
use tintlog::fanout::FanoutWriter;
use tintlog::handler::attr;
use tintlog::pipeline::SharedPipeline;
use tintlog::rotate::rotate_and_compress;
use tintlog::style::strip_ansi;
use tintlog::theme::Palette;
use tintlog::writer::ColorizingWriter;

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior so upstream writers get a clean
    // SIGPIPE signal instead of a BrokenPipeError when tintlog exits early.
    reset_sigpipe();

    let cli = Cli::parse();

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tintlog: {e}");
            return ExitCode::from(1);
        }
    };

    let use_color = resolve_color_mode(config.color_mode);

    let result = match &cli.command {
        None => colorize(&config, &ColorizeArgs::default(), use_color),
        Some(Command::Colorize(args)) => colorize(&config, args, use_color),
        Some(Command::Rotate) => rotate(&config),
        Some(Command::Strip) => strip(),
        Some(Command::Demo) => demo(&config, use_color),
        Some(Command::Completions { shell }) => {
            clap_complete::generate(*shell, &mut Cli::command(), "tintlog", &mut io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(TintError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e @ (TintError::Config(_) | TintError::Toml(_) | TintError::Style(_))) => {
            eprintln!("tintlog: {e}");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("tintlog: {e}");
            ExitCode::from(2)
        }
    }
}

/// Stream stdin through the colorizer in raw chunks.
///
/// Chunk boundaries fall anywhere; the writer reassembles lines. A final line
/// without a newline is completed so it is not left in the buffer.
fn colorize(config: &Config, args: &ColorizeArgs, use_color: bool) -> Result<(), TintError> {
    let pipeline = SharedPipeline::new(config.pipeline(use_color));
    let mut out = FanoutWriter::default();
    out.push(ColorizingWriter::new(
        BufWriter::new(io::stdout()),
        pipeline,
    ));
    if args.tee {
        let file = File::options()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .map_err(|e| {
                TintError::Config(format!("cannot open {}: {e}", config.log_file.display()))
            })?;
        out.push(BufWriter::new(file));
    }

    let mut stdin = io::stdin().lock();
    let mut chunk = [0u8; 8192];
    let mut last = b'\n';
    loop {
        let n = match stdin.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        out.write_all(&chunk[..n])?;
        last = chunk[n - 1];
    }
    if last != b'\n' {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn rotate(config: &Config) -> Result<(), TintError> {
    if let Some(archive) = rotate_and_compress(&config.log_file, &config.archive_dir)? {
        println!("{}", archive.display());
    }
    Ok(())
}

fn strip() -> Result<(), TintError> {
    let mut stdin = io::stdin().lock();
    let mut out = BufWriter::new(io::stdout().lock());
    let mut line = Vec::new();
    while stdin.read_until(b'\n', &mut line)? > 0 {
        out.write_all(strip_ansi(&String::from_utf8_lossy(&line)).as_bytes())?;
        line.clear();
    }
    out.flush()?;
    Ok(())
}

fn demo(config: &Config, use_color: bool) -> Result<(), TintError> {
    let logger = config.logger_config(use_color).build()?;
    logger.install_global(config.min_level)?;

    logger.info(
        "Server starting.",
        &[attr("version", env!("CARGO_PKG_VERSION"))],
    )?;
    logger.with_group("net").info(
        "Listener running.",
        &[attr("addr", "[::]:19132"), attr("proto_id", 766)],
    )?;
    logger.debug(
        "Loading world.",
        &[attr("world", "overworld"), attr("dimension", "overworld")],
    )?;
    log::warn!(player = "Steve", ping_ms = 312; "Player joined with high latency.");
    logger.error(
        "Chunk save failed.",
        &[attr("world", "nether"), attr("err", "disk full")],
    )?;

    let palette = Palette::new(config.resolved_theme(use_color));
    eprintln!(
        "{} {}",
        palette.success("demo complete"),
        palette.kv("log_file", config.log_file.display())
    );
    Ok(())
}

fn resolve_color_mode(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some_and(|v| !v.is_empty()) {
                return true;
            }
            if std::env::var("TERM").is_ok_and(|v| v == "dumb") {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// By default, Rust ignores SIGPIPE to surface `BrokenPipe` I/O errors.
/// For a filter like `tintlog`, this causes the upstream writer to receive a
/// `BrokenPipeError` when `tintlog` exits. Restoring `SIG_DFL` lets the OS
/// handle the signal normally.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
