//! Legacy population table settings.

use serde::{Deserialize, Serialize};

fn default_file_pattern() -> String {
    String::from("tadr*")
}

fn default_encoding() -> String {
    String::from("windows-1251")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CensusConfig {
    /// Glob matched against file names inside `paths.grao_dir`.
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,

    /// WHATWG label of the 8-bit encoding the tables are written in.
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            file_pattern: default_file_pattern(),
            encoding: default_encoding(),
        }
    }
}
