use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} ends before its {what} header row", .path.display())]
    MissingHeader { path: PathBuf, what: &'static str },

    #[error("no census year in the header of {}", .path.display())]
    MissingYear { path: PathBuf },
}
