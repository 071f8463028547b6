//! Reference and output entities.
//!
//! Reference entities mirror the JSON cache written by the catalog loader
//! (field names are part of that format). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod census;
mod district;
mod municipality;
mod settlement;
mod territorial_unit;

pub use census::CensusRecord;
pub use district::District;
pub use municipality::Municipality;
pub use settlement::Settlement;
pub use territorial_unit::{TerritorialLevel, TerritorialUnit};
