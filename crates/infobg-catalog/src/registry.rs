//! Readers for the NSI territorial registry export.
//!
//! ```text
//! <root>/<edition>/ek_obl.json    districts      oblast, name
//! <root>/<edition>/ek_obst.json   municipalities obshtina, name
//! <root>/<edition>/ek_atte.json   settlements    ekatte, name, kind, altitude, obshtina, oblast
//! ```
//!
//! Each file is either a bare JSON array or `{"data": [...]}`. The NSI export
//! ends with a summary element that carries no usable code; it is skipped
//! like any other entry whose code does not parse.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use infobg_core::codes::{DistrictAbbrev, MunicipalityAbbrev, SettlementCode};
use infobg_core::entities::{District, Municipality, Settlement};
use infobg_core::enums::{AltitudeBand, SettlementKind};
use infobg_core::errors::CoreError;
use serde::Deserialize;
use serde_json::Value;

use crate::error::CatalogError;

pub const DISTRICTS_FILE: &str = "ek_obl.json";
pub const MUNICIPALITIES_FILE: &str = "ek_obst.json";
pub const SETTLEMENTS_FILE: &str = "ek_atte.json";

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    Wrapped { data: Vec<Value> },
    Bare(Vec<Value>),
}

impl Envelope {
    fn into_nodes(self) -> Vec<Value> {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Registry edition directories under `root`, most recent first.
///
/// Editions are named by year (or date), so descending name order is
/// descending age.
///
/// # Errors
///
/// Returns [`CatalogError::MissingRegistry`] when `root` is not a directory.
pub fn editions(root: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    if !root.is_dir() {
        return Err(CatalogError::MissingRegistry(root.to_path_buf()));
    }
    let entries = std::fs::read_dir(root).map_err(|source| CatalogError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CatalogError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    Ok(dirs)
}

/// Read the JSON nodes of one registry file, unwrapping the envelope.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] or [`CatalogError::Json`].
pub fn read_nodes(path: &Path) -> Result<Vec<Value>, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let envelope: Envelope = serde_json::from_str(&text).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(envelope.into_nodes())
}

/// Districts of one edition.
///
/// # Errors
///
/// Fails only when the file cannot be read or is not JSON.
pub fn read_districts(edition: &Path) -> Result<Vec<District>, CatalogError> {
    read_entries(&edition.join(DISTRICTS_FILE), |node| {
        Ok(District {
            name: required(node, "name")?,
            abbrev: DistrictAbbrev::new(&required(node, "oblast")?)?,
        })
    })
}

/// Municipalities of one edition.
///
/// # Errors
///
/// Fails only when the file cannot be read or is not JSON.
pub fn read_municipalities(edition: &Path) -> Result<Vec<Municipality>, CatalogError> {
    read_entries(&edition.join(MUNICIPALITIES_FILE), |node| {
        Ok(Municipality {
            name: required(node, "name")?,
            abbrev: MunicipalityAbbrev::new(&required(node, "obshtina")?)?,
        })
    })
}

/// Settlements of one edition.
///
/// A wrong check digit, or an `oblast` that disagrees with the municipality
/// prefix, is reported and the entry kept: the registry is trusted over the
/// arithmetic.
///
/// # Errors
///
/// Fails only when the file cannot be read or is not JSON.
pub fn read_settlements(edition: &Path) -> Result<Vec<Settlement>, CatalogError> {
    let path = edition.join(SETTLEMENTS_FILE);
    read_entries(&path, |node| {
        let settlement = settlement_from(node)?;

        if !settlement.code.has_valid_checksum() {
            tracing::warn!(
                path = %path.display(),
                code = %settlement.code,
                name = %settlement.name,
                "settlement code fails the check digit"
            );
        }
        if let Some(oblast) = text(node, "oblast") {
            if !oblast.eq_ignore_ascii_case(settlement.district().as_str()) {
                tracing::warn!(
                    path = %path.display(),
                    code = %settlement.code,
                    municipality = %settlement.municipality,
                    oblast = %oblast,
                    "settlement district disagrees with its municipality prefix"
                );
            }
        }
        Ok(settlement)
    })
}

fn settlement_from(node: &Value) -> Result<Settlement, CoreError> {
    let kind = small(node, "kind")?;
    let altitude = small(node, "altitude")?;
    Ok(Settlement {
        code: settlement_code(&required(node, "ekatte")?)?,
        name: required(node, "name")?,
        municipality: MunicipalityAbbrev::new(&required(node, "obshtina")?)?,
        kind: SettlementKind::try_from(kind)?,
        altitude: AltitudeBand::try_from(altitude)?,
    })
}

/// Parse a settlement code, zero-padding registries that store it as a number.
///
/// # Errors
///
/// Returns [`CoreError::InvalidCode`] for anything but up to five digits.
pub fn settlement_code(raw: &str) -> Result<SettlementCode, CoreError> {
    let raw = raw.trim();
    if raw.len() < 5 {
        if let Ok(number) = raw.parse::<u32>() {
            return SettlementCode::from_number(number);
        }
    }
    SettlementCode::new(raw)
}

fn read_entries<T, F>(path: &Path, parse: F) -> Result<Vec<T>, CatalogError>
where
    T: infobg_core::reconcile::Reconcile,
    F: Fn(&Value) -> Result<T, CoreError>,
{
    let nodes = read_nodes(path)?;
    let last = nodes.len().saturating_sub(1);
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(nodes.len());

    for (index, node) in nodes.iter().enumerate() {
        match parse(node) {
            Ok(entry) => {
                if !seen.insert(entry.identity()) {
                    tracing::warn!(path = %path.display(), index, "repeated entry in registry file");
                }
                out.push(entry);
            }
            // The trailing summary row of every NSI export lands here.
            Err(error) if index == last => {
                tracing::debug!(path = %path.display(), index, %error, "skipping trailing entry");
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), index, %error, "skipping registry entry");
            }
        }
    }

    tracing::debug!(path = %path.display(), entries = out.len(), "read registry file");
    Ok(out)
}

fn text(node: &Value, key: &str) -> Option<String> {
    match node.get(key)? {
        Value::String(value) => {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

fn required(node: &Value, key: &'static str) -> Result<String, CoreError> {
    text(node, key).ok_or_else(|| CoreError::Validation(format!("missing field '{key}'")))
}

fn small(node: &Value, key: &'static str) -> Result<u8, CoreError> {
    let raw = required(node, key)?;
    raw.parse()
        .map_err(|_| CoreError::Validation(format!("field '{key}' is not a small integer: {raw}")))
}
