use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or persisting catalogs.
///
/// Every variant aborts the run: nothing downstream can resolve without a
/// catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("registry directory not found: {}", .0.display())]
    MissingRegistry(PathBuf),

    #[error("no {what} found under {}", .path.display())]
    Empty { what: &'static str, path: PathBuf },

    #[error("failed to access {}: {source}", .path.display())]
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

/// Outcome of a name lookup that did not produce exactly one entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no {kind} named '{name}'")]
    NotFound { kind: &'static str, name: String },

    #[error("{kind} name '{name}' is ambiguous ({})", .candidates.join(", "))]
    Ambiguous {
        kind: &'static str,
        name: String,
        candidates: Vec<String>,
    },
}

impl LookupError {
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }
}
