//! # infobg-census
//!
//! Population tables published by the civil registration service (GRAO):
//!
//! 1. [`decode`] turns the legacy 8-bit files into text.
//! 2. [`table`] walks the fixed-width layout and yields one [`table::TableRow`]
//!    per settlement observation, with the district/municipality labels and
//!    date that were in effect for it.
//! 3. [`resolver`] maps the label triple to catalog codes.
//! 4. [`batch`] drives all of the above across one file per publication date,
//!    newest first, and collects the census records.

pub mod batch;
pub mod decode;
pub mod output;
pub mod resolver;
pub mod table;

mod error;

pub use batch::{BatchOptions, BatchOutput, FileSummary, KeyConflict, UnresolvedRow, YearBatchLoader};
pub use decode::SourceEncoding;
pub use error::{BatchError, CensusError};
pub use resolver::{ResolveError, Resolved, Resolver, StructuralMismatch, Suppressible};
pub use table::{Counts, ParsedTable, SkipReason, TableRow, parse_table};
