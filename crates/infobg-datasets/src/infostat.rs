//! Municipality-level census tables exported from infostat.nsi.bg.
//!
//! Every export is a `;`-separated file with three header rows; the second
//! one carries the census year. Mother tongue, ethnicity, and religion key
//! their rows on `"<ABBREV> <Name>"`, education on the bare municipality
//! name and carries two census years side by side.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use infobg_catalog::Catalogs;
use infobg_core::codes::MunicipalityAbbrev;
use infobg_names::fold;
use serde::Serialize;

use crate::error::DatasetError;

const HEADER_ROWS: usize = 3;
const YEAR_ROW: usize = 1;

/// Cell offsets of the two education year blocks.
const EDUCATION_BLOCKS: [usize; 2] = [1, 7];

/// The four published breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InfostatKind {
    MotherTongue,
    Ethnicity,
    Religion,
    Education,
}

impl InfostatKind {
    pub const ALL: [Self; 4] = [
        Self::MotherTongue,
        Self::Ethnicity,
        Self::Religion,
        Self::Education,
    ];

    /// Export file name as published.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::MotherTongue => "МАЙЧИН ЕЗИК.csv",
            Self::Ethnicity => "ЕТНИЧЕСКА ПРИНАДЛЕЖНОСТ.csv",
            Self::Religion => "ВЕРОИЗПОВЕДАНИЕ.csv",
            Self::Education => "ОБРАЗОВАНИЕ 7+.csv",
        }
    }

    /// Category columns following the total, in file order.
    #[must_use]
    pub const fn categories(self) -> &'static [&'static str] {
        match self {
            Self::MotherTongue | Self::Ethnicity => &[
                "bulgarian",
                "turkish",
                "roma",
                "other",
                "undecided",
                "no_answer",
                "not_shown",
            ],
            Self::Religion => &[
                "orthodox",
                "muslim",
                "judaism",
                "other",
                "none",
                "undecided",
                "no_answer",
                "not_shown",
            ],
            Self::Education => &["university", "secondary", "primary", "elementary", "none"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub count: u64,
}

/// One municipality's breakdown for one census year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfostatRecord {
    pub kind: InfostatKind,
    pub municipality: MunicipalityAbbrev,
    pub year: i32,
    pub total: u64,
    pub categories: Vec<Category>,
}

/// Load `kind` from `dir`, keeping only rows that reconcile with `catalogs`.
///
/// # Errors
///
/// Unreadable or malformed files, a file shorter than its header, or a
/// header without any year.
pub fn load_infostat(
    dir: &Path,
    kind: InfostatKind,
    catalogs: &Catalogs,
) -> Result<Vec<InfostatRecord>, DatasetError> {
    let path = dir.join(kind.file_name());
    let (years, rows) = read_table(&path)?;

    let records = match kind {
        InfostatKind::Education => education(&path, &years, &rows, catalogs)?,
        _ => {
            let year = years.iter().flatten().copied().next().ok_or_else(|| {
                DatasetError::MissingYear {
                    path: path.clone(),
                }
            })?;
            rows.iter()
                .filter_map(|row| abbreviated(kind, year, row, catalogs))
                .collect()
        }
    };

    tracing::info!(
        file = %path.display(),
        rows = rows.len(),
        records = records.len(),
        "loaded infostat table"
    );
    Ok(records)
}

type Table = (Vec<Option<i32>>, Vec<StringRecord>);

fn read_table(path: &Path) -> Result<Table, DatasetError> {
    let csv_err = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let mut records = reader.records();
    let mut years = None;
    for index in 0..HEADER_ROWS {
        let header = records
            .next()
            .transpose()
            .map_err(csv_err)?
            .ok_or_else(|| DatasetError::MissingHeader {
                path: path.to_path_buf(),
                what: if index == YEAR_ROW { "year" } else { "title" },
            })?;
        if index == YEAR_ROW {
            years = Some(header.iter().map(|cell| cell.trim().parse().ok()).collect());
        }
    }

    let rows = records.collect::<Result<Vec<_>, _>>().map_err(csv_err)?;
    Ok((years.unwrap_or_default(), rows))
}

fn count(cell: Option<&str>) -> Option<u64> {
    cell.and_then(|cell| cell.trim().parse().ok())
}

fn categories(kind: InfostatKind, row: &StringRecord, first: usize) -> Vec<Category> {
    kind.categories()
        .iter()
        .enumerate()
        .map(|(offset, &name)| Category {
            name,
            count: count(row.get(first + offset)).unwrap_or(0),
        })
        .collect()
}

/// Rows keyed on `"<ABBREV> <Name>"`.
fn abbreviated(
    kind: InfostatKind,
    year: i32,
    row: &StringRecord,
    catalogs: &Catalogs,
) -> Option<InfostatRecord> {
    let label = row.get(0)?.trim();
    let (abbrev, name) = label.split_once(' ').unwrap_or((label, ""));

    // Country and district totals carry shorter codes.
    let Ok(abbrev) = MunicipalityAbbrev::new(abbrev) else {
        tracing::debug!(label, "not a municipality row");
        return None;
    };
    let Some(municipality) = catalogs.municipalities.get(&abbrev) else {
        tracing::warn!(%abbrev, name, "municipality not in catalog");
        return None;
    };
    if fold(&municipality.name) != fold(name) {
        tracing::warn!(%abbrev, name, catalog = %municipality.name, "municipality name disagrees with catalog");
        return None;
    }
    let Some(total) = count(row.get(1)) else {
        tracing::warn!(%abbrev, "row without a total");
        return None;
    };

    Some(InfostatRecord {
        kind,
        municipality: abbrev,
        year,
        total,
        categories: categories(kind, row, 2),
    })
}

fn education(
    path: &Path,
    years: &[Option<i32>],
    rows: &[StringRecord],
    catalogs: &Catalogs,
) -> Result<Vec<InfostatRecord>, DatasetError> {
    if EDUCATION_BLOCKS
        .iter()
        .all(|&offset| years.get(offset).copied().flatten().is_none())
    {
        return Err(DatasetError::MissingYear {
            path: path.to_path_buf(),
        });
    }

    let mut records = Vec::new();
    for row in rows {
        let Some(name) = row.get(0).map(str::trim).filter(|name| !name.is_empty()) else {
            continue;
        };
        let municipality = match catalogs.municipalities.find(name, None) {
            Ok(found) => found.abbrev.clone(),
            Err(error) => {
                tracing::warn!(name, %error, "skipping education row");
                continue;
            }
        };

        for offset in EDUCATION_BLOCKS {
            let Some(year) = years.get(offset).copied().flatten() else {
                continue;
            };
            // A block without a total was not published for that year.
            let Some(total) = count(row.get(offset)) else {
                continue;
            };
            records.push(InfostatRecord {
                kind: InfostatKind::Education,
                municipality: municipality.clone(),
                year,
                total,
                categories: categories(InfostatKind::Education, row, offset + 1),
            });
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("12"), Some(12))]
    #[case(Some(" 7 "), Some(7))]
    #[case(Some("-"), None)]
    #[case(Some(".."), None)]
    #[case(None, None)]
    fn counts_parse_or_fall_out(#[case] cell: Option<&str>, #[case] expected: Option<u64>) {
        assert_eq!(count(cell), expected);
    }

    #[test]
    fn category_columns_default_to_zero() {
        let row = StringRecord::from(vec!["VID09 Димово", "10", "4", "x", "3"]);
        let counts: Vec<_> = categories(InfostatKind::MotherTongue, &row, 2)
            .into_iter()
            .map(|c| c.count)
            .collect();
        assert_eq!(counts, vec![4, 0, 3, 0, 0, 0, 0]);
    }

    #[test]
    fn every_kind_has_a_distinct_file() {
        let names: std::collections::HashSet<_> =
            InfostatKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(names.len(), InfostatKind::ALL.len());
    }
}
