use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::codes::{DistrictAbbrev, MunicipalityAbbrev};
use crate::reconcile::{Reconcile, Reconciliation};

/// Administrative grouping of settlements inside one district.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Municipality {
    pub name: String,
    #[serde(rename = "nickname")]
    #[schemars(with = "String")]
    pub abbrev: MunicipalityAbbrev,
}

impl Municipality {
    /// Owning district, taken from the abbreviation prefix.
    #[must_use]
    pub fn district(&self) -> DistrictAbbrev {
        self.abbrev.district()
    }
}

impl Reconcile for Municipality {
    type Key = MunicipalityAbbrev;

    fn identity(&self) -> MunicipalityAbbrev {
        self.abbrev.clone()
    }

    fn reconcile(&self, incoming: &Self) -> Reconciliation {
        if self.name == incoming.name {
            Reconciliation::Match
        } else {
            Reconciliation::NameConflict {
                existing: self.name.clone(),
                incoming: incoming.name.clone(),
            }
        }
    }
}
