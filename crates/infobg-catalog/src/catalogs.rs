use std::path::Path;

use infobg_core::entities::{District, Municipality, Settlement};

use crate::catalog::{DistrictCatalog, MunicipalityCatalog, SettlementCatalog};
use crate::error::CatalogError;
use crate::registry;

/// The three reference catalogs of one run.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub districts: DistrictCatalog,
    pub municipalities: MunicipalityCatalog,
    pub settlements: SettlementCatalog,
}

impl Catalogs {
    /// Build catalogs from already-parsed entities, in precedence order.
    pub fn from_parts(
        districts: impl IntoIterator<Item = District>,
        municipalities: impl IntoIterator<Item = Municipality>,
        settlements: impl IntoIterator<Item = Settlement>,
    ) -> Self {
        let catalogs = Self {
            districts: DistrictCatalog::new(districts),
            municipalities: MunicipalityCatalog::new(municipalities),
            settlements: SettlementCatalog::new(settlements),
        };
        catalogs.check_structure();
        catalogs
    }

    /// Read every registry edition under `root`, newest first.
    ///
    /// An edition missing one of the three files contributes the others.
    ///
    /// # Errors
    ///
    /// [`CatalogError::MissingRegistry`] when `root` is absent,
    /// [`CatalogError::Empty`] when any level ends up with no entries, and
    /// I/O or JSON errors from individual files.
    pub fn from_registry(root: &Path) -> Result<Self, CatalogError> {
        let mut districts = Vec::new();
        let mut municipalities = Vec::new();
        let mut settlements = Vec::new();

        for edition in registry::editions(root)? {
            tracing::info!(edition = %edition.display(), "reading registry edition");
            if edition.join(registry::DISTRICTS_FILE).is_file() {
                districts.extend(registry::read_districts(&edition)?);
            }
            if edition.join(registry::MUNICIPALITIES_FILE).is_file() {
                municipalities.extend(registry::read_municipalities(&edition)?);
            }
            if edition.join(registry::SETTLEMENTS_FILE).is_file() {
                settlements.extend(registry::read_settlements(&edition)?);
            }
        }

        let catalogs = Self::from_parts(districts, municipalities, settlements);
        catalogs.ensure_populated(root)?;
        Ok(catalogs)
    }

    /// Load from the JSON cache in `cache_dir` when allowed and present,
    /// otherwise from the registry under `registry_root`.
    ///
    /// An unreadable or empty cache is reported and ignored.
    ///
    /// # Errors
    ///
    /// As [`Self::from_registry`].
    pub fn load(registry_root: &Path, cache_dir: &Path, use_cache: bool) -> Result<Self, CatalogError> {
        if use_cache {
            match Self::read_cache(cache_dir) {
                Ok(Some(catalogs)) => match catalogs.ensure_populated(cache_dir) {
                    Ok(()) => {
                        tracing::debug!(dir = %cache_dir.display(), "catalogs loaded from cache");
                        return Ok(catalogs);
                    }
                    Err(error) => tracing::warn!(%error, "ignoring empty catalog cache"),
                },
                Ok(None) => {}
                Err(error) => tracing::warn!(%error, "ignoring unreadable catalog cache"),
            }
        }
        Self::from_registry(registry_root)
    }

    fn ensure_populated(&self, source: &Path) -> Result<(), CatalogError> {
        let empty = if self.districts.is_empty() {
            Some("districts")
        } else if self.municipalities.is_empty() {
            Some("municipalities")
        } else if self.settlements.is_empty() {
            Some("settlements")
        } else {
            None
        };
        match empty {
            Some(what) => Err(CatalogError::Empty {
                what,
                path: source.to_path_buf(),
            }),
            None => Ok(()),
        }
    }

    /// Warn about hierarchy links the registry leaves dangling.
    fn check_structure(&self) {
        for municipality in self.municipalities.iter() {
            if self.districts.get(&municipality.district()).is_none() {
                tracing::warn!(
                    municipality = %municipality.abbrev,
                    "municipality prefix names no known district"
                );
            }
        }
        for settlement in self.settlements.iter() {
            if self.municipalities.get(&settlement.municipality).is_none() {
                tracing::warn!(
                    code = %settlement.code,
                    municipality = %settlement.municipality,
                    "settlement owned by unknown municipality"
                );
            }
        }
    }
}
