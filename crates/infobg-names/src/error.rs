//! Alias table error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AliasError {
    /// The alias file could not be read.
    #[error("Failed to read alias table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The alias document is not valid TOML or has the wrong shape.
    #[error("Invalid alias table: {0}")]
    Parse(#[from] toml::de::Error),

    /// An entry folds to an empty label.
    #[error("Alias entry {index} has an empty {field}")]
    EmptyLabel { index: usize, field: &'static str },
}
