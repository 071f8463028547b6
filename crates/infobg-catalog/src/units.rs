//! Flat territorial-unit listing of one registry edition.

use std::collections::HashSet;
use std::path::Path;

use infobg_core::entities::{TerritorialLevel, TerritorialUnit};

use crate::error::CatalogError;
use crate::registry;

/// Merge settlements, municipalities, and districts of `edition` into one
/// list, in that order.
///
/// Units whose parent is missing from the same edition are skipped with a
/// warning.
///
/// # Errors
///
/// Propagates read errors for any of the three registry files.
pub fn territorial_units(edition: &Path) -> Result<Vec<TerritorialUnit>, CatalogError> {
    let districts = registry::read_districts(edition)?;
    let municipalities = registry::read_municipalities(edition)?;
    let settlements = registry::read_settlements(edition)?;

    let known_districts: HashSet<_> = districts.iter().map(|d| d.abbrev.clone()).collect();
    let known_municipalities: HashSet<_> =
        municipalities.iter().map(|m| m.abbrev.clone()).collect();

    let mut units = Vec::with_capacity(districts.len() + municipalities.len() + settlements.len());

    for settlement in settlements {
        if !known_municipalities.contains(&settlement.municipality) {
            tracing::warn!(code = %settlement.code, municipality = %settlement.municipality, "no such municipality in edition");
            continue;
        }
        let district = settlement.district();
        if !known_districts.contains(&district) {
            tracing::warn!(code = %settlement.code, district = %district, "no such district in edition");
            continue;
        }
        units.push(TerritorialUnit {
            level: TerritorialLevel::Settlement,
            code: settlement.code.to_string(),
            name: settlement.name,
            kind: Some(settlement.kind.code()),
            altitude: Some(settlement.altitude.code()),
            district: district.to_string(),
            municipality: Some(settlement.municipality.to_string()),
        });
    }

    for municipality in municipalities {
        let district = municipality.district();
        if !known_districts.contains(&district) {
            tracing::warn!(municipality = %municipality.abbrev, "no such district in edition");
            continue;
        }
        units.push(TerritorialUnit {
            level: TerritorialLevel::Municipality,
            code: municipality.abbrev.to_string(),
            name: municipality.name,
            kind: None,
            altitude: None,
            district: district.to_string(),
            municipality: Some(municipality.abbrev.to_string()),
        });
    }

    for district in districts {
        units.push(TerritorialUnit {
            level: TerritorialLevel::District,
            code: district.abbrev.to_string(),
            name: district.name,
            kind: None,
            altitude: None,
            district: district.abbrev.to_string(),
            municipality: None,
        });
    }

    tracing::info!(edition = %edition.display(), units = units.len(), "merged territorial units");
    Ok(units)
}
