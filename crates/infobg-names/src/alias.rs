//! Ordered spelling-correction table.
//!
//! The table is an append-only correction log: every entry maps one legacy
//! spelling to the registry spelling, literally. It is loaded once, owned by
//! the caller, and passed by reference wherever labels are resolved, so tests
//! can substitute their own table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AliasError;
use crate::label::fold;
use crate::normalizer::NormalizedLabels;

const BUILTIN: &str = include_str!("../data/aliases.toml");

/// One legacy spelling and its canonical replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub legacy: String,
    pub canonical: String,
}

/// A rename that only applies inside one (district, municipality) pair.
///
/// `settlement` narrows the override to one settlement label; when absent
/// the override applies to every row under the pair. Each `to_*` field that
/// is set replaces the corresponding label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyOverride {
    pub district: String,
    pub municipality: String,
    #[serde(default)]
    pub settlement: Option<String>,
    #[serde(default)]
    pub to_district: Option<String>,
    #[serde(default)]
    pub to_municipality: Option<String>,
    #[serde(default)]
    pub to_settlement: Option<String>,
}

impl HierarchyOverride {
    fn matches(&self, labels: &NormalizedLabels) -> bool {
        self.district == labels.district
            && self.municipality == labels.municipality
            && self
                .settlement
                .as_ref()
                .is_none_or(|settlement| *settlement == labels.settlement)
    }

    fn folded(self) -> Self {
        Self {
            district: fold(&self.district),
            municipality: fold(&self.municipality),
            settlement: self.settlement.as_deref().map(fold),
            to_district: self.to_district.as_deref().map(fold),
            to_municipality: self.to_municipality.as_deref().map(fold),
            to_settlement: self.to_settlement.as_deref().map(fold),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct AliasDocument {
    #[serde(default)]
    alias: Vec<AliasEntry>,
    #[serde(default, rename = "override")]
    overrides: Vec<HierarchyOverride>,
}

/// Immutable alias table plus hierarchy overrides.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
    overrides: Vec<HierarchyOverride>,
}

impl AliasTable {
    /// Build a table; both sides of every entry are folded.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::EmptyLabel`] when an entry folds to nothing.
    pub fn new(
        entries: Vec<AliasEntry>,
        overrides: Vec<HierarchyOverride>,
    ) -> Result<Self, AliasError> {
        let mut folded = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let legacy = fold(&entry.legacy);
            let canonical = fold(&entry.canonical);
            if legacy.is_empty() {
                return Err(AliasError::EmptyLabel {
                    index,
                    field: "legacy",
                });
            }
            if canonical.is_empty() {
                return Err(AliasError::EmptyLabel {
                    index,
                    field: "canonical",
                });
            }
            folded.push(AliasEntry { legacy, canonical });
        }

        Ok(Self {
            entries: folded,
            overrides: overrides.into_iter().map(HierarchyOverride::folded).collect(),
        })
    }

    /// The table shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded document is malformed, which the crate's
    /// tests rule out.
    pub fn builtin() -> Result<Self, AliasError> {
        Self::from_toml_str(BUILTIN)
    }

    /// Parse a TOML alias document (`[[alias]]` and `[[override]]` arrays).
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::Parse`] for invalid TOML and
    /// [`AliasError::EmptyLabel`] for blank entries.
    pub fn from_toml_str(text: &str) -> Result<Self, AliasError> {
        let doc: AliasDocument = toml::from_str(text)?;
        Self::new(doc.alias, doc.overrides)
    }

    /// Load a TOML alias document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::Io`] when the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, AliasError> {
        let text = std::fs::read_to_string(path).map_err(|source| AliasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            aliases = table.entries.len(),
            overrides = table.overrides.len(),
            "loaded alias table"
        );
        Ok(table)
    }

    /// Canonical spelling for a folded label, or the label itself.
    ///
    /// Entries are scanned in order and the first exact match wins.
    #[must_use]
    pub fn canonical<'a>(&'a self, folded: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|entry| entry.legacy == folded)
            .map_or(folded, |entry| entry.canonical.as_str())
    }

    /// Apply the first matching hierarchy override to already-aliased labels.
    #[must_use]
    pub fn apply_overrides(&self, mut labels: NormalizedLabels) -> NormalizedLabels {
        let Some(rule) = self.overrides.iter().find(|rule| rule.matches(&labels)) else {
            return labels;
        };

        tracing::debug!(
            district = %labels.district,
            municipality = %labels.municipality,
            settlement = %labels.settlement,
            "hierarchy override applied"
        );
        if let Some(to) = &rule.to_district {
            labels.district.clone_from(to);
        }
        if let Some(to) = &rule.to_municipality {
            labels.municipality.clone_from(to);
        }
        if let Some(to) = &rule.to_settlement {
            labels.settlement.clone_from(to);
        }
        labels
    }

    #[must_use]
    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    #[must_use]
    pub fn overrides(&self) -> &[HierarchyOverride] {
        &self.overrides
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_table_parses() {
        let table = AliasTable::builtin().expect("embedded aliases should parse");
        assert!(table.entries().len() > 30);
        assert_eq!(table.canonical("в.търново"), "велико търново");
        assert_eq!(table.canonical("софия"), "софия");
    }

    #[test]
    fn first_match_wins() {
        let table = AliasTable::new(
            vec![
                AliasEntry {
                    legacy: "a".into(),
                    canonical: "first".into(),
                },
                AliasEntry {
                    legacy: "a".into(),
                    canonical: "second".into(),
                },
            ],
            Vec::new(),
        )
        .unwrap();
        assert_eq!(table.canonical("a"), "first");
    }

    #[test]
    fn entries_are_folded_on_construction() {
        let table = AliasTable::new(
            vec![AliasEntry {
                legacy: "  Бобовдол ".into(),
                canonical: "Бобов  Дол".into(),
            }],
            Vec::new(),
        )
        .unwrap();
        assert_eq!(table.canonical("бобовдол"), "бобов дол");
    }

    #[test]
    fn blank_entry_is_rejected() {
        let err = AliasTable::new(
            vec![AliasEntry {
                legacy: " | ".into(),
                canonical: "x".into(),
            }],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, AliasError::EmptyLabel { index: 0, field: "legacy" }));
    }

    #[test]
    fn overrides_need_both_hierarchy_labels() {
        let table = AliasTable::from_toml_str(
            r#"
[[override]]
district = "Перник"
municipality = "Брезник"
settlement = "Ноевци"
to_district = "София"
to_municipality = "Божурище"
"#,
        )
        .unwrap();

        let moved = table.apply_overrides(NormalizedLabels {
            district: "перник".into(),
            municipality: "брезник".into(),
            settlement: "ноевци".into(),
            kind: None,
        });
        assert_eq!(moved.district, "софия");
        assert_eq!(moved.municipality, "божурище");
        assert_eq!(moved.settlement, "ноевци");

        let other_municipality = NormalizedLabels {
            district: "перник".into(),
            municipality: "радомир".into(),
            settlement: "ноевци".into(),
            kind: None,
        };
        assert_eq!(
            table.apply_overrides(other_municipality.clone()),
            other_municipality
        );
    }

    #[test]
    fn invalid_toml_is_reported() {
        assert!(matches!(
            AliasTable::from_toml_str("[[alias]]\nlegacy = 1"),
            Err(AliasError::Parse(_))
        ));
    }
}
