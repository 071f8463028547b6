//! # infobg-names
//!
//! Turns free-text territorial labels from legacy source files into the
//! folded form used for catalog lookup:
//!
//! - [`legacy`]: line-level repair of a known 8-bit decoding defect
//! - [`label`]: case/whitespace folding, settlement-kind prefixes, header suffixes
//! - [`alias`]: the ordered spelling-correction table and hierarchy overrides
//! - [`Normalizer`]: folding + aliasing for a (district, municipality,
//!   settlement) triple
//!
//! Matching downstream is exact on the folded form; nothing here is
//! similarity-based.

pub mod alias;
pub mod label;
pub mod legacy;

mod error;
mod normalizer;

pub use alias::{AliasEntry, AliasTable, HierarchyOverride};
pub use error::AliasError;
pub use label::fold;
pub use normalizer::{LabelTriple, NormalizedLabels, Normalizer};
