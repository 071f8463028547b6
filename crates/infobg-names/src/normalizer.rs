use infobg_core::enums::SettlementKind;
use serde::{Deserialize, Serialize};

use crate::alias::AliasTable;
use crate::label::{fold, strip_kind_prefix};

/// Raw labels extracted from one source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTriple {
    pub district: String,
    pub municipality: String,
    pub settlement: String,
}

impl LabelTriple {
    #[must_use]
    pub fn new(district: &str, municipality: &str, settlement: &str) -> Self {
        Self {
            district: district.to_string(),
            municipality: municipality.to_string(),
            settlement: settlement.to_string(),
        }
    }
}

/// Folded, aliased, and overridden labels ready for catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedLabels {
    pub district: String,
    pub municipality: String,
    pub settlement: String,
    /// Kind marker that prefixed the settlement label, if any.
    pub kind: Option<SettlementKind>,
}

/// Folding plus alias lookup, bound to one alias table.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    aliases: &'a AliasTable,
}

impl<'a> Normalizer<'a> {
    #[must_use]
    pub const fn new(aliases: &'a AliasTable) -> Self {
        Self { aliases }
    }

    #[must_use]
    pub const fn aliases(&self) -> &'a AliasTable {
        self.aliases
    }

    /// Fold and alias a district or municipality label.
    #[must_use]
    pub fn area(&self, raw: &str) -> String {
        let folded = fold(raw);
        self.aliases.canonical(&folded).to_string()
    }

    /// Fold a settlement label, strip its kind marker, and alias the name.
    #[must_use]
    pub fn settlement(&self, raw: &str) -> (Option<SettlementKind>, String) {
        let folded = fold(raw);
        let (kind, name) = strip_kind_prefix(&folded);
        (kind, self.aliases.canonical(name).to_string())
    }

    /// Normalize all three labels, then apply hierarchy overrides.
    #[must_use]
    pub fn triple(&self, raw: &LabelTriple) -> NormalizedLabels {
        let (kind, settlement) = self.settlement(&raw.settlement);
        let labels = NormalizedLabels {
            district: self.area(&raw.district),
            municipality: self.area(&raw.municipality),
            settlement,
            kind,
        };
        self.aliases.apply_overrides(labels)
    }
}
