//! General application configuration.

use serde::{Deserialize, Serialize};

const fn default_use_cache() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Reuse previously written JSON outputs instead of re-reading sources.
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            use_cache: default_use_cache(),
        }
    }
}
