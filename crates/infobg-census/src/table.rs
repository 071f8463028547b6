//! Line-oriented parser for GRAO population tables.
//!
//! The tables are fixed-width text with `|` or `!` column delimiters. Header
//! lines carry the publication date and the district/municipality labels;
//! every settlement row that follows inherits them:
//!
//! ```text
//! ДАТА 15.03.2021
//! ОБЛАСТ ВИДИН                ОБЩИНА ДИМОВО
//! |С.ГОРНО ВЪРШИЛО | 120 | 118 | 117 | 1 | 95 | 90 | 89 |
//! ...
//! ВСИЧКО ЗА ОБЩИНАТА ...
//! ```
//!
//! 1998 editions split the labels over `ОБЛАСТ:` and `ОБЩИНА:` lines padded
//! with parts of the table title. One generation of files also carries the
//! soft-sign defect repaired by [`fix_soft_sign`].

use chrono::NaiveDate;
use infobg_names::label::{fold, strip_header_suffix};
use infobg_names::legacy::fix_soft_sign;
use infobg_names::LabelTriple;
use serde::{Deserialize, Serialize};

use crate::resolver::Suppressible;

const DISTRICT_MARKER: &str = "област";
const MUNICIPALITY_MARKER: &str = "община";
const DATE_MARKER: &str = "дата";
const MUNICIPALITY_TOTAL: &str = "всичко за общината";

/// Prefixes (after trimming and lower-casing) that mark a settlement row,
/// with the delimiter that row uses.
const ROW_STARTS: [(&str, char); 6] = [
    ("|гр", '|'),
    ("|с", '|'),
    ("| гр", '|'),
    ("| с", '|'),
    ("! гр", '!'),
    ("! с", '!'),
];

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// The seven count columns of a settlement row, numbered 1..=7 as in the
/// source (column 0 is the settlement label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts(pub [u64; 7]);

impl Counts {
    /// Columns that must be non-zero; a zero there means "not reported".
    pub const REQUIRED: [usize; 6] = [1, 2, 3, 5, 6, 7];

    fn parse(cells: &[&str]) -> Option<Self> {
        let mut values = [0; 7];
        for (slot, cell) in values.iter_mut().zip(cells) {
            let digits: String = cell.chars().filter(|c| !c.is_whitespace()).collect();
            *slot = digits.parse().ok()?;
        }
        Some(Self(values))
    }

    /// Value of 1-based column `column`.
    ///
    /// # Panics
    ///
    /// Panics if `column` is not in `1..=7`.
    #[must_use]
    pub const fn column(&self, column: usize) -> u64 {
        self.0[column - 1]
    }

    /// Population by permanent address.
    #[must_use]
    pub const fn permanent(&self) -> u64 {
        self.column(1)
    }

    /// Population by current address.
    #[must_use]
    pub const fn current(&self) -> u64 {
        self.column(5)
    }
}

impl Suppressible for Counts {
    fn is_suppressed(&self) -> bool {
        Self::REQUIRED.iter().any(|&column| self.column(column) == 0)
    }
}

// ---------------------------------------------------------------------------
// Parsed output
// ---------------------------------------------------------------------------

/// One settlement observation with the context it was read under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// 1-based line number in the decoded file.
    pub line: usize,
    pub date: NaiveDate,
    pub labels: LabelTriple,
    pub counts: Counts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Row before any date header, or after a municipality total.
    MissingDate,
    /// Row before any district/municipality header.
    MissingContext,
    /// Fewer than seven count columns.
    ShortRow,
    NonNumeric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub rows: Vec<TableRow>,
    pub skipped: Vec<SkippedLine>,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Context {
    date: Option<NaiveDate>,
    district: Option<String>,
    municipality: Option<String>,
}

/// Parse a decoded table.
///
/// Lines that are neither headers nor rows are ignored; rows that cannot be
/// used are listed in [`ParsedTable::skipped`].
#[must_use]
pub fn parse_table(text: &str) -> ParsedTable {
    let mut context = Context::default();
    let mut table = ParsedTable::default();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let repaired = fix_soft_sign(raw);
        let line = repaired.trim().to_lowercase();

        let Some(cells) = row_cells(&line) else {
            context.observe_header(&line);
            continue;
        };

        match context.row(line_no, &cells) {
            Ok(row) => table.rows.push(row),
            Err(reason) => {
                tracing::debug!(line = line_no, ?reason, "skipping table row");
                table.skipped.push(SkippedLine {
                    line: line_no,
                    reason,
                });
            }
        }
    }
    table
}

impl Context {
    fn observe_header(&mut self, line: &str) {
        if let Some(date) = header_date(line) {
            self.date = Some(date);
        }
        if line.contains(MUNICIPALITY_TOTAL) {
            self.date = None;
        }

        let (district, municipality) = area_labels(line);
        if district.is_some() {
            self.district = district;
        }
        if municipality.is_some() {
            self.municipality = municipality;
        }
    }

    fn row(&self, line: usize, cells: &[&str]) -> Result<TableRow, SkipReason> {
        let date = self.date.ok_or(SkipReason::MissingDate)?;
        let (Some(district), Some(municipality)) = (&self.district, &self.municipality) else {
            return Err(SkipReason::MissingContext);
        };
        if cells.len() < 8 {
            return Err(SkipReason::ShortRow);
        }
        let counts = Counts::parse(&cells[1..8]).ok_or(SkipReason::NonNumeric)?;

        Ok(TableRow {
            line,
            date,
            labels: LabelTriple::new(district, municipality, cells[0]),
            counts,
        })
    }
}

/// Cells of a settlement row, outer delimiters removed.
fn row_cells(line: &str) -> Option<Vec<&str>> {
    let delimiter = ROW_STARTS
        .iter()
        .find(|(prefix, _)| line.starts_with(prefix))
        .map(|&(_, delimiter)| delimiter)?;
    let inner = line.strip_prefix(delimiter)?;
    let inner = inner.strip_suffix(['|', '!']).unwrap_or(inner);
    Some(inner.split(delimiter).map(str::trim).collect())
}

/// `dd.mm.yyyy` following a `дата` token.
fn header_date(line: &str) -> Option<NaiveDate> {
    let mut tokens = line.split_whitespace();
    while let Some(token) = tokens.next() {
        let rest = match token.strip_prefix(DATE_MARKER) {
            Some("" | ":") => tokens.next()?,
            Some(rest) if rest.starts_with(':') => &rest[1..],
            _ => continue,
        };
        let rest = rest.trim_matches(|c: char| !c.is_ascii_digit());
        return NaiveDate::parse_from_str(rest, "%d.%m.%Y").ok();
    }
    None
}

/// District and/or municipality label announced by a header line.
fn area_labels(line: &str) -> (Option<String>, Option<String>) {
    if let (Some(d), Some(m)) = (line.find(DISTRICT_MARKER), line.find(MUNICIPALITY_MARKER)) {
        if d < m {
            return (
                header_label(&line[d + DISTRICT_MARKER.len()..m]),
                header_label(&line[m + MUNICIPALITY_MARKER.len()..]),
            );
        }
    }
    if let Some(rest) = after(line, "област:") {
        return (header_label(rest), None);
    }
    if let Some(rest) = after(line, "община:") {
        return (None, header_label(rest));
    }
    (None, None)
}

fn after<'l>(line: &'l str, marker: &str) -> Option<&'l str> {
    line.find(marker).map(|at| &line[at + marker.len()..])
}

fn header_label(raw: &str) -> Option<String> {
    let folded = fold(raw);
    let label = fold(strip_header_suffix(&folded));
    (!label.is_empty()).then_some(label)
}
