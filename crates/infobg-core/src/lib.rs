//! # infobg-core
//!
//! Core types shared across all infobg crates:
//! - Territorial codes (district and municipality abbreviations, EKATTE
//!   settlement codes with their modulo-11 check digit)
//! - Reference entities (districts, municipalities, settlements) and the
//!   resolved census record
//! - Settlement kind and altitude band enums
//! - The structured reconciliation result used wherever two observations of
//!   the same identity key are compared
//! - Cross-cutting error types

pub mod codes;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod reconcile;
