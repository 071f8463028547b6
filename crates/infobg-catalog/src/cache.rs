//! JSON cache of built catalogs.
//!
//! Each level is one pretty-printed array in the output directory, with the
//! field names downstream tools already consume (`nickname` for abbreviations).

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use infobg_core::entities::{District, Municipality, Settlement};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::catalogs::Catalogs;
use crate::error::CatalogError;

pub const DISTRICTS_FILE: &str = "districts.json";
pub const MUNICIPALITIES_FILE: &str = "municipalities.json";
pub const SETTLEMENTS_FILE: &str = "locations.json";

impl Catalogs {
    /// Write all three levels to `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] or [`CatalogError::Json`].
    pub fn write_cache(&self, dir: &Path) -> Result<(), CatalogError> {
        std::fs::create_dir_all(dir).map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        write_json(&dir.join(DISTRICTS_FILE), &self.districts.iter().collect::<Vec<_>>())?;
        write_json(
            &dir.join(MUNICIPALITIES_FILE),
            &self.municipalities.iter().collect::<Vec<_>>(),
        )?;
        write_json(
            &dir.join(SETTLEMENTS_FILE),
            &self.settlements.iter().collect::<Vec<_>>(),
        )?;
        tracing::info!(
            dir = %dir.display(),
            districts = self.districts.len(),
            municipalities = self.municipalities.len(),
            settlements = self.settlements.len(),
            "wrote catalog cache"
        );
        Ok(())
    }

    /// Read a cache written by [`Self::write_cache`].
    ///
    /// Returns `Ok(None)` unless all three files exist.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] or [`CatalogError::Json`] for a cache
    /// that exists but cannot be read.
    pub fn read_cache(dir: &Path) -> Result<Option<Self>, CatalogError> {
        let files = [DISTRICTS_FILE, MUNICIPALITIES_FILE, SETTLEMENTS_FILE];
        if !files.iter().all(|name| dir.join(name).is_file()) {
            return Ok(None);
        }
        Ok(Some(Self::from_parts(
            read_json::<Vec<District>>(&dir.join(DISTRICTS_FILE))?,
            read_json::<Vec<Municipality>>(&dir.join(MUNICIPALITIES_FILE))?,
            read_json::<Vec<Settlement>>(&dir.join(SETTLEMENTS_FILE))?,
        )))
    }
}

pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CatalogError> {
    let io_err = |source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}
