//! # infobg-config
//!
//! Layered configuration loading for infobg using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`INFOBG_*` prefix, `__` as separator)
//! 2. Project-level `.infobg/config.toml`
//! 3. User-level `~/.config/infobg/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `INFOBG_PATHS__NSI_DIR` -> `paths.nsi_dir`,
//! `INFOBG_CENSUS__ENCODING` -> `census.encoding`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use infobg_config::InfobgConfig;
//!
//! let config = InfobgConfig::load_with_dotenv().expect("config");
//! println!("registry: {}", config.paths.nsi_dir.display());
//! ```

mod census;
mod error;
mod general;
mod names;
mod paths;

pub use census::CensusConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use names::NamesConfig;
pub use paths::PathsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InfobgConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub census: CensusConfig,
    #[serde(default)]
    pub names: NamesConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl InfobgConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is the normal case.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".infobg/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("INFOBG_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("infobg").join("config.toml"))
    }
}
