//! Per-level catalogs with first-seen admission and folded-name indexes.

use std::collections::HashMap;
use std::fmt;

use infobg_core::codes::{DistrictAbbrev, MunicipalityAbbrev, SettlementCode};
use infobg_core::entities::{District, Municipality, Settlement};
use infobg_core::enums::SettlementKind;
use infobg_core::reconcile::{Admission, FieldDiff, FirstSeen, Reconcile, Reconciliation};
use infobg_names::fold;

use crate::error::LookupError;

/// Admit `item`, warning when it repeats a key with different content.
fn admit_logged<T>(seen: &mut FirstSeen<T>, item: T, kind: &'static str) -> bool
where
    T: Reconcile,
    T::Key: fmt::Debug,
{
    let key = item.identity();
    match seen.admit(item) {
        Admission::New => true,
        Admission::Duplicate(Reconciliation::Match) => false,
        Admission::Duplicate(outcome) => {
            tracing::warn!(kind, key = ?key, ?outcome, "conflicting duplicate, keeping first-seen");
            false
        }
    }
}

/// Exactly one candidate, or a named failure.
fn unique<'a, T>(
    kind: &'static str,
    name: String,
    found: Vec<&'a T>,
    describe: impl Fn(&T) -> String,
) -> Result<&'a T, LookupError> {
    match found.as_slice() {
        [] => Err(LookupError::NotFound { kind, name }),
        [only] => Ok(*only),
        many => Err(LookupError::Ambiguous {
            kind,
            name,
            candidates: many.iter().map(|item| describe(*item)).collect(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Districts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct DistrictCatalog {
    entries: FirstSeen<District>,
    by_name: HashMap<String, Vec<DistrictAbbrev>>,
}

impl DistrictCatalog {
    pub fn new(items: impl IntoIterator<Item = District>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            catalog.insert(item);
        }
        catalog
    }

    /// Add a district unless its abbreviation is already known.
    ///
    /// Returns whether the entry was new.
    pub fn insert(&mut self, district: District) -> bool {
        let folded = fold(&district.name);
        let abbrev = district.abbrev.clone();
        if !admit_logged(&mut self.entries, district, "district") {
            return false;
        }

        let slot = self.by_name.entry(folded).or_default();
        if let Some(existing) = slot.first() {
            tracing::warn!(
                existing = %existing,
                incoming = %abbrev,
                "district name shared by two abbreviations"
            );
        }
        slot.push(abbrev);
        true
    }

    /// District whose name folds to the same key as `name`.
    ///
    /// # Errors
    ///
    /// [`LookupError::NotFound`] for unknown names and
    /// [`LookupError::Ambiguous`] when two abbreviations carry the name.
    pub fn find(&self, name: &str) -> Result<&District, LookupError> {
        let folded = fold(name);
        let found: Vec<&District> = self
            .by_name
            .get(&folded)
            .into_iter()
            .flatten()
            .filter_map(|abbrev| self.entries.get(abbrev))
            .collect();
        unique("district", folded, found, |d: &District| d.abbrev.to_string())
    }

    #[must_use]
    pub fn get(&self, abbrev: &DistrictAbbrev) -> Option<&District> {
        self.entries.get(abbrev)
    }

    pub fn iter(&self) -> impl Iterator<Item = &District> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Municipalities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MunicipalityCatalog {
    entries: FirstSeen<Municipality>,
    by_name: HashMap<String, Vec<MunicipalityAbbrev>>,
}

impl MunicipalityCatalog {
    pub fn new(items: impl IntoIterator<Item = Municipality>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            catalog.insert(item);
        }
        catalog
    }

    pub fn insert(&mut self, municipality: Municipality) -> bool {
        let folded = fold(&municipality.name);
        let abbrev = municipality.abbrev.clone();
        if !admit_logged(&mut self.entries, municipality, "municipality") {
            return false;
        }
        self.by_name.entry(folded).or_default().push(abbrev);
        true
    }

    /// Municipality by name, optionally restricted to one district.
    ///
    /// Several districts have a municipality of the same name as the
    /// district seat, so unscoped lookups can be ambiguous.
    ///
    /// # Errors
    ///
    /// [`LookupError::NotFound`] when nothing matches inside the scope and
    /// [`LookupError::Ambiguous`] when more than one does.
    pub fn find(
        &self,
        name: &str,
        district: Option<&DistrictAbbrev>,
    ) -> Result<&Municipality, LookupError> {
        let folded = fold(name);
        let found: Vec<&Municipality> = self
            .by_name
            .get(&folded)
            .into_iter()
            .flatten()
            .filter_map(|abbrev| self.entries.get(abbrev))
            .filter(|m| district.is_none_or(|d| m.abbrev.belongs_to(d)))
            .collect();
        unique("municipality", folded, found, |m: &Municipality| {
            m.abbrev.to_string()
        })
    }

    #[must_use]
    pub fn get(&self, abbrev: &MunicipalityAbbrev) -> Option<&Municipality> {
        self.entries.get(abbrev)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Municipality> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Settlements
// ---------------------------------------------------------------------------

type SettlementKey = (SettlementCode, MunicipalityAbbrev);

#[derive(Debug, Clone, Default)]
pub struct SettlementCatalog {
    entries: FirstSeen<Settlement>,
    by_name: HashMap<String, Vec<SettlementKey>>,
    by_code: HashMap<SettlementCode, MunicipalityAbbrev>,
}

impl SettlementCatalog {
    pub fn new(items: impl IntoIterator<Item = Settlement>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            catalog.insert(item);
        }
        catalog
    }

    /// Add a settlement unless its code is already known.
    ///
    /// A code that reappears under another municipality (a settlement that
    /// moved between editions) is reported as a municipality conflict and
    /// the first-seen owner is kept.
    pub fn insert(&mut self, settlement: Settlement) -> bool {
        if let Some(owner) = self.by_code.get(&settlement.code) {
            if *owner != settlement.municipality {
                let outcome = Reconciliation::from_diffs(vec![FieldDiff::new(
                    "municipality",
                    owner,
                    &settlement.municipality,
                )]);
                tracing::warn!(
                    code = %settlement.code,
                    ?outcome,
                    "settlement code seen under two municipalities, keeping first-seen"
                );
                return false;
            }
        }

        let folded = fold(&settlement.name);
        let key = settlement.identity();
        if !admit_logged(&mut self.entries, settlement, "settlement") {
            return false;
        }
        self.by_code.insert(key.0.clone(), key.1.clone());
        self.by_name.entry(folded).or_default().push(key);
        true
    }

    /// Settlement code lookup with hierarchical disambiguation.
    ///
    /// * municipality given: the unique match owned by it wins; with no
    ///   match there, the lookup widens to the municipality's district.
    /// * district scope: must match exactly one settlement. Several matches
    ///   in different municipalities of the district are a failure.
    /// * no scope: only a name that is unique in the whole catalog resolves.
    ///
    /// # Errors
    ///
    /// [`LookupError::NotFound`] when nothing matches inside the given scope
    /// (matches outside it do not count) and [`LookupError::Ambiguous`] when
    /// the narrowest applicable scope still holds several candidates.
    pub fn find(
        &self,
        name: &str,
        district: Option<&DistrictAbbrev>,
        municipality: Option<&MunicipalityAbbrev>,
    ) -> Result<&Settlement, LookupError> {
        self.find_with_kind(name, district, municipality, None)
    }

    /// [`Self::find`], first narrowing candidates to one settlement kind.
    ///
    /// A kind that no candidate has is ignored, so a wrong `гр.`/`с.` marker
    /// in a source table cannot hide an otherwise unique match.
    ///
    /// # Errors
    ///
    /// As [`Self::find`].
    pub fn find_with_kind(
        &self,
        name: &str,
        district: Option<&DistrictAbbrev>,
        municipality: Option<&MunicipalityAbbrev>,
        kind: Option<SettlementKind>,
    ) -> Result<&Settlement, LookupError> {
        let folded = fold(name);
        let mut candidates: Vec<&Settlement> = self
            .by_name
            .get(&folded)
            .into_iter()
            .flatten()
            .filter_map(|key| self.entries.get(key))
            .collect();
        if let Some(kind) = kind {
            if candidates.iter().any(|s| s.kind == kind) {
                candidates.retain(|s| s.kind == kind);
            }
        }
        let describe = |s: &Settlement| format!("{} ({})", s.code, s.municipality);

        if let Some(municipality) = municipality {
            let owned: Vec<&Settlement> = candidates
                .iter()
                .copied()
                .filter(|s| s.municipality == *municipality)
                .collect();
            if !owned.is_empty() {
                return unique("settlement", folded, owned, describe);
            }
        }

        let district = district
            .cloned()
            .or_else(|| municipality.map(MunicipalityAbbrev::district));
        match district {
            Some(district) => {
                let scoped: Vec<&Settlement> = candidates
                    .into_iter()
                    .filter(|s| s.municipality.belongs_to(&district))
                    .collect();
                unique("settlement", folded, scoped, describe)
            }
            None => unique("settlement", folded, candidates, describe),
        }
    }

    /// First-seen settlement carrying `code`.
    #[must_use]
    pub fn get(&self, code: &SettlementCode) -> Option<&Settlement> {
        let municipality = self.by_code.get(code)?;
        self.entries.get(&(code.clone(), municipality.clone()))
    }

    #[must_use]
    pub fn contains(&self, code: &SettlementCode) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Settlement> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
