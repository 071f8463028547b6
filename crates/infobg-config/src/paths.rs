//! Input and output locations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_nsi_dir() -> PathBuf {
    PathBuf::from("data/nsi.bg")
}

fn default_grao_dir() -> PathBuf {
    PathBuf::from("data/grao.bg")
}

fn default_infostat_dir() -> PathBuf {
    PathBuf::from("data/infostat.nsi.bg")
}

fn default_mon_dir() -> PathBuf {
    PathBuf::from("data/mon.bg")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Territorial registry root; one sub-directory per registry edition.
    #[serde(default = "default_nsi_dir")]
    pub nsi_dir: PathBuf,

    /// Legacy population tables (one file per registration date).
    #[serde(default = "default_grao_dir")]
    pub grao_dir: PathBuf,

    /// Municipality-level census CSV exports.
    #[serde(default = "default_infostat_dir")]
    pub infostat_dir: PathBuf,

    /// School registry and its code tables.
    #[serde(default = "default_mon_dir")]
    pub mon_dir: PathBuf,

    /// Where JSON outputs and catalog caches are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            nsi_dir: default_nsi_dir(),
            grao_dir: default_grao_dir(),
            infostat_dir: default_infostat_dir(),
            mon_dir: default_mon_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl PathsConfig {
    /// Path of a named output file inside `output_dir`.
    #[must_use]
    pub fn output(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_joins_file_name() {
        let paths = PathsConfig::default();
        assert_eq!(paths.output("census.json"), PathBuf::from("json/census.json"));
    }
}
