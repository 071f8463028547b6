//! Resolution of (district, municipality, settlement) label triples to codes.
//!
//! The hierarchy is walked top-down. Each level narrows the next one:
//! the district scopes the municipality lookup, and the municipality (then
//! its district) scopes the settlement lookup. Registry inconsistencies that
//! do not prevent resolution are returned as [`StructuralMismatch`] and
//! logged; the record is still produced.

use infobg_catalog::{Catalogs, LookupError};
use infobg_core::codes::{DistrictAbbrev, MunicipalityAbbrev, SettlementCode};
use infobg_names::{AliasTable, LabelTriple, NormalizedLabels, Normalizer};
use serde::Serialize;
use thiserror::Error;

/// Payloads that can be withheld by the source.
///
/// A suppressed payload is dropped silently, never reported as unresolved.
pub trait Suppressible {
    fn is_suppressed(&self) -> bool;
}

impl Suppressible for () {
    fn is_suppressed(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unknown district '{label}': {source}")]
    UnknownDistrict { label: String, source: LookupError },

    #[error("unknown municipality '{label}': {source}")]
    UnknownMunicipality { label: String, source: LookupError },

    #[error("unknown settlement '{label}': {source}")]
    UnknownSettlement { label: String, source: LookupError },
}

impl ResolveError {
    /// The normalized label that failed.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::UnknownDistrict { label, .. }
            | Self::UnknownMunicipality { label, .. }
            | Self::UnknownSettlement { label, .. } => label,
        }
    }
}

/// Hierarchy inconsistency tolerated during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralMismatch {
    /// The municipality was only found outside the resolved district.
    MunicipalityOutsideDistrict {
        municipality: MunicipalityAbbrev,
        district: DistrictAbbrev,
    },
    /// The settlement is owned by a different municipality than the label
    /// named; the registry owner is used.
    SettlementOutsideMunicipality {
        settlement: SettlementCode,
        labelled: MunicipalityAbbrev,
        owner: MunicipalityAbbrev,
    },
}

/// Canonical codes for one row, bound to the row's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<P> {
    pub code: SettlementCode,
    pub municipality: MunicipalityAbbrev,
    pub district: DistrictAbbrev,
    pub labels: NormalizedLabels,
    pub mismatches: Vec<StructuralMismatch>,
    pub payload: P,
}

/// Resolved municipality, carried from the area step to the settlement step.
struct Area {
    municipality: MunicipalityAbbrev,
    mismatches: Vec<StructuralMismatch>,
}

/// Resolver bound to one run's catalogs and alias table.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalogs: &'a Catalogs,
    normalizer: Normalizer<'a>,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub const fn new(catalogs: &'a Catalogs, aliases: &'a AliasTable) -> Self {
        Self {
            catalogs,
            normalizer: Normalizer::new(aliases),
        }
    }

    #[must_use]
    pub const fn catalogs(&self) -> &'a Catalogs {
        self.catalogs
    }

    #[must_use]
    pub const fn normalizer(&self) -> Normalizer<'a> {
        self.normalizer
    }

    /// Resolve `raw` and bind `payload` to the result.
    ///
    /// Returns `Ok(None)` when the payload is suppressed. Suppression is
    /// checked once district and municipality are known and before the
    /// settlement lookup, so a withheld row is never reported as unresolved
    /// settlement, but an unknown area label still is.
    ///
    /// # Errors
    ///
    /// The [`ResolveError`] variant names the first level that failed.
    pub fn resolve<P: Suppressible>(
        &self,
        raw: &LabelTriple,
        payload: P,
    ) -> Result<Option<Resolved<P>>, ResolveError> {
        let labels = self.normalizer.triple(raw);
        let area = self.area(&labels)?;
        if payload.is_suppressed() {
            tracing::debug!(settlement = %labels.settlement, "payload suppressed by source");
            return Ok(None);
        }
        self.settlement(labels, area, payload).map(Some)
    }

    /// Resolve labels alone, without a payload.
    ///
    /// # Errors
    ///
    /// As [`Self::resolve`].
    pub fn resolve_labels(&self, raw: &LabelTriple) -> Result<Resolved<()>, ResolveError> {
        let labels = self.normalizer.triple(raw);
        let area = self.area(&labels)?;
        self.settlement(labels, area, ())
    }

    fn area(&self, labels: &NormalizedLabels) -> Result<Area, ResolveError> {
        let district = self
            .catalogs
            .districts
            .find(&labels.district)
            .map_err(|source| ResolveError::UnknownDistrict {
                label: labels.district.clone(),
                source,
            })?
            .abbrev
            .clone();

        let mut mismatches = Vec::new();
        let municipality = self.municipality(labels, &district, &mut mismatches)?;
        Ok(Area {
            municipality,
            mismatches,
        })
    }

    fn settlement<P>(
        &self,
        labels: NormalizedLabels,
        area: Area,
        payload: P,
    ) -> Result<Resolved<P>, ResolveError> {
        let Area {
            municipality,
            mut mismatches,
        } = area;

        let settlement = self
            .catalogs
            .settlements
            .find_with_kind(
                &labels.settlement,
                Some(&municipality.district()),
                Some(&municipality),
                labels.kind,
            )
            .map_err(|source| ResolveError::UnknownSettlement {
                label: labels.settlement.clone(),
                source,
            })?;

        if settlement.municipality != municipality {
            tracing::warn!(
                settlement = %settlement.code,
                labelled = %municipality,
                owner = %settlement.municipality,
                "settlement belongs to another municipality"
            );
            mismatches.push(StructuralMismatch::SettlementOutsideMunicipality {
                settlement: settlement.code.clone(),
                labelled: municipality,
                owner: settlement.municipality.clone(),
            });
        }

        Ok(Resolved {
            code: settlement.code.clone(),
            municipality: settlement.municipality.clone(),
            district: settlement.district(),
            labels,
            mismatches,
            payload,
        })
    }

    fn municipality(
        &self,
        labels: &NormalizedLabels,
        district: &DistrictAbbrev,
        mismatches: &mut Vec<StructuralMismatch>,
    ) -> Result<MunicipalityAbbrev, ResolveError> {
        let municipalities = &self.catalogs.municipalities;
        let scoped = municipalities.find(&labels.municipality, Some(district));
        let error = match scoped {
            Ok(found) => return Ok(found.abbrev.clone()),
            Err(error @ LookupError::Ambiguous { .. }) => error,
            Err(not_found) => match municipalities.find(&labels.municipality, None) {
                Ok(elsewhere) => {
                    tracing::warn!(
                        municipality = %elsewhere.abbrev,
                        district = %district,
                        "municipality prefix disagrees with resolved district"
                    );
                    mismatches.push(StructuralMismatch::MunicipalityOutsideDistrict {
                        municipality: elsewhere.abbrev.clone(),
                        district: district.clone(),
                    });
                    return Ok(elsewhere.abbrev.clone());
                }
                Err(_) => not_found,
            },
        };
        Err(ResolveError::UnknownMunicipality {
            label: labels.municipality.clone(),
            source: error,
        })
    }
}
