//! # infobg-catalog
//!
//! Authoritative code lookup for the three territorial levels.
//!
//! Catalogs are built once per run from the NSI registry (one sub-directory
//! per registry edition) or from the JSON cache written by a previous run,
//! and are read-only afterwards. Lookups take labels that went through
//! [`infobg_names::fold`] and never return a silent "nothing": they yield the
//! entity or a [`LookupError`] that says whether the name was missing or
//! ambiguous.

pub mod cache;
pub mod catalog;
pub mod registry;
pub mod units;

mod catalogs;
mod error;

pub use catalog::{DistrictCatalog, MunicipalityCatalog, SettlementCatalog};
pub use catalogs::Catalogs;
pub use error::{CatalogError, LookupError};
