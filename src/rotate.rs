//! Archive-then-truncate rotation of the log file.
//!
//! The source is only truncated after the compressed archive has been fully
//! written, finished and synced. A crash mid-copy leaves a partial archive
//! next to an intact source.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::error::RotateError;

/// File name prefix of every archive.
pub const ARCHIVE_PREFIX: &str = "server_";
/// File name suffix of every archive.
pub const ARCHIVE_SUFFIX: &str = ".log.gz";

/// Archive file name for a rotation at `at`, e.g.
/// `server_2026-01-15_10-30-00.log.gz`.
pub fn archive_file_name(at: &jiff::Zoned) -> String {
    format!(
        "{ARCHIVE_PREFIX}{}{ARCHIVE_SUFFIX}",
        at.strftime("%Y-%m-%d_%H-%M-%S")
    )
}

/// Compress `src` into a timestamped archive under `archive_dir`, then empty
/// `src` in place.
///
/// Returns the archive path, or `None` when `src` is missing or empty and
/// there was nothing to do. An archive that already exists for the same
/// second is never overwritten; that case fails with
/// [`RotateError::CreateArchive`] and leaves `src` alone.
///
/// Writers appending to `src` concurrently are not coordinated with; callers
/// should quiesce them around this call.
pub fn rotate_and_compress(
    src: impl AsRef<Path>,
    archive_dir: impl AsRef<Path>,
) -> Result<Option<PathBuf>, RotateError> {
    rotate_at(src.as_ref(), archive_dir.as_ref(), &jiff::Zoned::now())
}

fn rotate_at(
    src: &Path,
    archive_dir: &Path,
    at: &jiff::Zoned,
) -> Result<Option<PathBuf>, RotateError> {
    fs::create_dir_all(archive_dir).map_err(|source| RotateError::CreateDir {
        path: archive_dir.to_path_buf(),
        source,
    })?;

    let len = match fs::metadata(src) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(RotateError::Stat {
                path: src.to_path_buf(),
                source,
            });
        }
    };
    if len == 0 {
        return Ok(None);
    }

    let dst = archive_dir.join(archive_file_name(at));

    let mut input = File::open(src).map_err(|source| RotateError::Open {
        path: src.to_path_buf(),
        source,
    })?;
    let output = File::options()
        .write(true)
        .create_new(true)
        .open(&dst)
        .map_err(|source| RotateError::CreateArchive {
            path: dst.clone(),
            source,
        })?;

    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder).map_err(|source| RotateError::Copy {
        path: dst.clone(),
        source,
    })?;
    let output = encoder.finish().map_err(|source| RotateError::Finish {
        path: dst.clone(),
        source,
    })?;
    output.sync_all().map_err(|source| RotateError::Close {
        path: dst.clone(),
        source,
    })?;
    drop(output);
    drop(input);

    File::options()
        .write(true)
        .open(src)
        .and_then(|f| f.set_len(0))
        .map_err(|source| RotateError::Truncate {
            path: src.to_path_buf(),
            source,
        })?;

    log::debug!("rotated {} into {}", src.display(), dst.display());
    Ok(Some(dst))
}
