use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::codes::{DistrictAbbrev, MunicipalityAbbrev, SettlementCode};
use crate::enums::{AltitudeBand, SettlementKind};
use crate::reconcile::{FieldDiff, Reconcile, Reconciliation};

/// Smallest territorial unit: a town, village, or monastery.
///
/// The same name may recur under different municipalities; only the
/// `(code, municipality)` pair is unique.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Settlement {
    #[schemars(with = "String")]
    pub code: SettlementCode,
    pub name: String,
    #[schemars(with = "String")]
    pub municipality: MunicipalityAbbrev,
    #[schemars(with = "u8")]
    pub kind: SettlementKind,
    #[schemars(with = "u8")]
    pub altitude: AltitudeBand,
}

impl Settlement {
    #[must_use]
    pub fn district(&self) -> DistrictAbbrev {
        self.municipality.district()
    }
}

impl Reconcile for Settlement {
    type Key = (SettlementCode, MunicipalityAbbrev);

    fn identity(&self) -> Self::Key {
        (self.code.clone(), self.municipality.clone())
    }

    fn reconcile(&self, incoming: &Self) -> Reconciliation {
        if self.name != incoming.name {
            return Reconciliation::NameConflict {
                existing: self.name.clone(),
                incoming: incoming.name.clone(),
            };
        }

        let mut diffs = Vec::new();
        if self.kind != incoming.kind {
            diffs.push(FieldDiff::new("kind", self.kind, incoming.kind));
        }
        if self.altitude != incoming.altitude {
            diffs.push(FieldDiff::new(
                "altitude",
                self.altitude.code(),
                incoming.altitude.code(),
            ));
        }
        Reconciliation::from_diffs(diffs)
    }
}
