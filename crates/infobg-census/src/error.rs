use std::path::PathBuf;

use thiserror::Error;

/// Errors reading a single source file.
#[derive(Debug, Error)]
pub enum CensusError {
    #[error("unknown encoding label '{0}'")]
    UnknownEncoding(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that stop a batch run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Census(#[from] CensusError),

    #[error("census directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },

    /// The authoritative (newest) file had rows that did not resolve.
    #[error("{count} unresolved rows in authoritative file {}", .file.display())]
    StrictUnresolved {
        file: PathBuf,
        count: usize,
        report: Option<PathBuf>,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}
