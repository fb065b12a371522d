//! Error types for `tintlog`.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Parsing and styling
//! never produce errors; only configuration, sink I/O and rotation do.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in `tintlog`.
///
/// The binary maps [`Config`](Self::Config), [`Toml`](Self::Toml) and
/// [`Style`](Self::Style) to exit 1, everything else to exit 2.
#[derive(Debug, Error)]
pub enum TintError {
    /// Configuration error (unreadable config file, bad value).
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while writing to a sink or reading input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML deserialization error.
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A style spec string could not be parsed.
    #[error("invalid style '{0}'")]
    Style(String),

    /// Log rotation failed.
    #[error(transparent)]
    Rotate(#[from] RotateError),

    /// A global `log` logger was already installed.
    #[error("cannot install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// The step of [`rotate_and_compress`](crate::rotate::rotate_and_compress)
/// that failed.
///
/// Every variant except [`Truncate`](Self::Truncate) means the source file
/// was left untouched.
#[derive(Debug, Error)]
pub enum RotateError {
    #[error("create archive dir {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("stat {}: {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },

    #[error("open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("create archive {}: {source}", path.display())]
    CreateArchive { path: PathBuf, source: io::Error },

    #[error("compress into {}: {source}", path.display())]
    Copy { path: PathBuf, source: io::Error },

    #[error("finish archive {}: {source}", path.display())]
    Finish { path: PathBuf, source: io::Error },

    #[error("close archive {}: {source}", path.display())]
    Close { path: PathBuf, source: io::Error },

    /// The archive is complete but the source could not be emptied.
    #[error("truncate {} after archiving: {source}", path.display())]
    Truncate { path: PathBuf, source: io::Error },
}

impl RotateError {
    /// The underlying I/O error, whichever step failed.
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::CreateDir { source, .. }
            | Self::Stat { source, .. }
            | Self::Open { source, .. }
            | Self::CreateArchive { source, .. }
            | Self::Copy { source, .. }
            | Self::Finish { source, .. }
            | Self::Close { source, .. }
            | Self::Truncate { source, .. } => source,
        }
    }
}
