use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::codes::{DistrictAbbrev, MunicipalityAbbrev, SettlementCode};
use crate::reconcile::{FieldDiff, Reconcile, Reconciliation};

/// Population of one settlement at one registration date, resolved to
/// canonical codes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CensusRecord {
    #[schemars(with = "String")]
    pub code: SettlementCode,
    #[schemars(with = "String")]
    pub district: DistrictAbbrev,
    #[schemars(with = "String")]
    pub municipality: MunicipalityAbbrev,
    pub date: NaiveDate,
    /// Residents by permanent address.
    pub permanent: u64,
    /// Residents by current address.
    pub current: u64,
}

impl Reconcile for CensusRecord {
    type Key = (SettlementCode, NaiveDate);

    fn identity(&self) -> Self::Key {
        (self.code.clone(), self.date)
    }

    fn reconcile(&self, incoming: &Self) -> Reconciliation {
        let mut diffs = Vec::new();
        if self.municipality != incoming.municipality {
            diffs.push(FieldDiff::new(
                "municipality",
                &self.municipality,
                &incoming.municipality,
            ));
        }
        if self.permanent != incoming.permanent {
            diffs.push(FieldDiff::new("permanent", self.permanent, incoming.permanent));
        }
        if self.current != incoming.current {
            diffs.push(FieldDiff::new("current", self.current, incoming.current));
        }
        Reconciliation::from_diffs(diffs)
    }
}
