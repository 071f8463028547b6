//! # infobg-datasets
//!
//! Secondary datasets keyed on the territorial catalogs:
//!
//! - [`infostat`]: municipality-level census tables exported as CSV
//!   (mother tongue, ethnicity, religion, education 7+).
//! - [`institutions`]: the public school register and its code tables.
//!
//! Both loaders only admit rows whose territorial reference exists in the
//! catalogs; everything else is skipped with a warning.

pub mod infostat;
pub mod institutions;

mod error;

pub use error::DatasetError;
pub use infostat::{Category, InfostatKind, InfostatRecord, load_infostat};
pub use institutions::{CodeTable, Institution, InstitutionReport, load_institutions};
