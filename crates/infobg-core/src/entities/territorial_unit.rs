use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Level of a row in the flattened territorial-unit listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TerritorialLevel {
    District,
    Municipality,
    Settlement,
}

/// One row of the merged listing of districts, municipalities, and
/// settlements from a single registry edition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TerritorialUnit {
    pub level: TerritorialLevel,
    /// EKATTE code for settlements, abbreviation otherwise.
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<u8>,
    pub district: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
}
