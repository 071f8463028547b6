//! Persisted batch output: `census.json` and the `unresolved.jsonl` report.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use infobg_core::entities::CensusRecord;

use crate::batch::UnresolvedRow;
use crate::error::BatchError;

pub const CENSUS_FILE: &str = "census.json";
pub const UNRESOLVED_FILE: &str = "unresolved.jsonl";

/// Write census records as one pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`BatchError::Io`] or [`BatchError::Json`].
pub fn write_census(path: &Path, records: &[CensusRecord]) -> Result<(), BatchError> {
    ensure_parent(path)?;
    let io_err = |source| BatchError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_json::to_writer_pretty(&mut writer, records).map_err(|source| BatchError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)
}

/// Read a `census.json` written by [`write_census`].
///
/// # Errors
///
/// Returns [`BatchError::Io`] or [`BatchError::Json`].
pub fn read_census(path: &Path) -> Result<Vec<CensusRecord>, BatchError> {
    let file = File::open(path).map_err(|source| BatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| BatchError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the unresolved-row report, one JSON object per line.
///
/// # Errors
///
/// Returns [`BatchError::Io`].
pub fn write_unresolved(path: &Path, rows: &[UnresolvedRow]) -> Result<(), BatchError> {
    ensure_parent(path)?;
    serde_jsonlines::write_json_lines(path, rows).map_err(|source| BatchError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Remove a report left by an earlier run.
///
/// # Errors
///
/// Returns [`BatchError::Io`] when the file exists but cannot be removed.
pub fn remove_unresolved(path: &Path) -> Result<(), BatchError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed stale unresolved report");
            Ok(())
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(BatchError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read an unresolved-row report.
///
/// # Errors
///
/// Returns [`BatchError::Io`] for unreadable files or malformed lines.
pub fn read_unresolved(path: &Path) -> Result<Vec<UnresolvedRow>, BatchError> {
    serde_jsonlines::json_lines::<UnresolvedRow, _>(path)
        .and_then(|lines| lines.collect())
        .map_err(|source| BatchError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn ensure_parent(path: &Path) -> Result<(), BatchError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| BatchError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
