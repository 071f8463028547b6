use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::codes::DistrictAbbrev;
use crate::reconcile::{Reconcile, Reconciliation};

/// Top-level administrative region.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct District {
    pub name: String,
    #[serde(rename = "nickname")]
    #[schemars(with = "String")]
    pub abbrev: DistrictAbbrev,
}

impl Reconcile for District {
    type Key = DistrictAbbrev;

    fn identity(&self) -> DistrictAbbrev {
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
