//! The public school register published by mon.bg.
//!
//! `public-register.json` lists every institution with its settlement and
//! three classification codes. Each code refers to a separate code table.
//! An institution is exported only when its settlement is in the catalog and
//! all three codes exist.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use infobg_catalog::Catalogs;
use infobg_core::codes::SettlementCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

pub const REGISTER_FILE: &str = "public-register.json";
pub const FINANCING_FILE: &str = "financialSchoolType.json";
pub const DETAILS_FILE: &str = "detailedSchoolType.json";
pub const STATUS_FILE: &str = "transformType.json";

/// Numeric fields are published either as numbers or as digit strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Number {
    Int(u64),
    Text(String),
}

impl Number {
    fn value(&self) -> Option<u64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Register {
    public_institutions: Vec<RegisterEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterEntry {
    id: Number,
    instid: Number,
    name: String,
    town: Number,
    financial_school_type: Number,
    detailed_school_type: Number,
    transform_type: Number,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CodeEntry {
    code: Number,
    label: String,
    #[serde(default)]
    is_valid: bool,
}

/// Code → label lookup for one classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    labels: BTreeMap<u64, String>,
}

impl CodeTable {
    /// Read a `{"data": [{code, label, isValid}]}` table. The first entry of
    /// a code wins; with `valid_only`, entries not marked valid are ignored.
    ///
    /// # Errors
    ///
    /// Unreadable file or unexpected JSON shape.
    pub fn load(path: &Path, valid_only: bool) -> Result<Self, DatasetError> {
        let entries: Envelope<Vec<CodeEntry>> = read_json(path)?;
        let mut labels = BTreeMap::new();
        for entry in entries.data {
            if valid_only && !entry.is_valid {
                continue;
            }
            let Some(code) = entry.code.value() else {
                tracing::warn!(file = %path.display(), label = %entry.label, "code table entry without a numeric code");
                continue;
            };
            labels.entry(code).or_insert(entry.label);
        }
        Ok(Self { labels })
    }

    #[must_use]
    pub fn label(&self, code: u64) -> Option<&str> {
        self.labels.get(&code).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl FromIterator<(u64, String)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (u64, String)>>(iter: I) -> Self {
        let mut labels = BTreeMap::new();
        for (code, label) in iter {
            labels.entry(code).or_insert(label);
        }
        Self { labels }
    }
}

/// An exported institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Institution {
    pub id: u64,
    pub name: String,
    pub location: SettlementCode,
    pub finance: u64,
    pub details: u64,
    pub status: u64,
}

/// Exported institutions plus what had to be left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstitutionReport {
    /// In register order, first occurrence of each id.
    pub institutions: Vec<Institution>,
    pub skipped: usize,
    /// Ids listed more than once.
    pub duplicates: Vec<u64>,
}

/// Validate the register in `dir` against the code tables next to it and the
/// settlement catalog.
///
/// # Errors
///
/// Any of the four files is unreadable or not in the expected shape.
pub fn load_institutions(dir: &Path, catalogs: &Catalogs) -> Result<InstitutionReport, DatasetError> {
    let financing = CodeTable::load(&dir.join(FINANCING_FILE), true)?;
    let details = CodeTable::load(&dir.join(DETAILS_FILE), true)?;
    let status = CodeTable::load(&dir.join(STATUS_FILE), false)?;
    let register: Envelope<Register> = read_json(&dir.join(REGISTER_FILE))?;

    let tables = Tables {
        financing: &financing,
        details: &details,
        status: &status,
    };
    let report = validate(register.data.public_institutions, catalogs, &tables);
    tracing::info!(
        exported = report.institutions.len(),
        skipped = report.skipped,
        duplicates = report.duplicates.len(),
        "validated school register"
    );
    Ok(report)
}

struct Tables<'a> {
    financing: &'a CodeTable,
    details: &'a CodeTable,
    status: &'a CodeTable,
}

fn validate(entries: Vec<RegisterEntry>, catalogs: &Catalogs, tables: &Tables<'_>) -> InstitutionReport {
    let mut report = InstitutionReport::default();
    let mut positions: HashMap<u64, usize> = HashMap::new();

    for entry in entries {
        let Some(institution) = admit(&entry, catalogs, tables) else {
            report.skipped += 1;
            continue;
        };
        match positions.entry(institution.id) {
            Entry::Occupied(first) => {
                let kept = &report.institutions[*first.get()];
                if kept.name != institution.name || kept.location != institution.location {
                    tracing::warn!(
                        id = institution.id,
                        kept = %kept.name,
                        dropped = %institution.name,
                        "institution id listed twice with different details"
                    );
                }
                report.duplicates.push(institution.id);
            }
            Entry::Vacant(slot) => {
                slot.insert(report.institutions.len());
                report.institutions.push(institution);
            }
        }
    }

    if !report.duplicates.is_empty() {
        tracing::warn!(count = report.duplicates.len(), "register lists some institutions more than once");
    }
    report
}

fn admit(entry: &RegisterEntry, catalogs: &Catalogs, tables: &Tables<'_>) -> Option<Institution> {
    let name = entry.name.as_str();

    let location = entry
        .town
        .value()
        .and_then(|town| u32::try_from(town).ok())
        .and_then(|town| SettlementCode::from_number(town).ok())
        .filter(|code| catalogs.settlements.contains(code));
    let Some(location) = location else {
        tracing::warn!(name, town = ?entry.town, "institution in unknown settlement");
        return None;
    };

    let (Some(id), Some(instid)) = (entry.id.value(), entry.instid.value()) else {
        tracing::warn!(name, "institution without a numeric id");
        return None;
    };
    if id != instid {
        tracing::warn!(name, id, instid, "institution ids disagree");
        return None;
    }

    let finance = classified(name, "financing", &entry.financial_school_type, tables.financing)?;
    let details = classified(name, "details", &entry.detailed_school_type, tables.details)?;
    let status = classified(name, "status", &entry.transform_type, tables.status)?;

    Some(Institution {
        id,
        name: entry.name.clone(),
        location,
        finance,
        details,
        status,
    })
}

fn classified(name: &str, what: &'static str, code: &Number, table: &CodeTable) -> Option<u64> {
    let found = code.value().filter(|&code| table.label(code).is_some());
    if found.is_none() {
        tracing::warn!(name, what, code = ?code, "institution with unknown code");
    }
    found
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })
}
