//! Alias table location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NamesConfig {
    /// Alias table TOML file. Unset means the built-in table.
    #[serde(default)]
    pub alias_file: Option<PathBuf>,
}
