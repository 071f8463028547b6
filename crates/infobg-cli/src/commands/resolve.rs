use infobg_census::{Resolver, StructuralMismatch};
use infobg_core::codes::{DistrictAbbrev, MunicipalityAbbrev, SettlementCode};
use infobg_names::{LabelTriple, NormalizedLabels};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResolveArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ResolveResponse {
    code: SettlementCode,
    name: String,
    municipality: MunicipalityAbbrev,
    district: DistrictAbbrev,
    labels: NormalizedLabels,
    mismatches: Vec<StructuralMismatch>,
}

/// Handle `infobg resolve`.
pub fn handle(args: &ResolveArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalogs = ctx.catalogs()?;
    let resolver = Resolver::new(&catalogs, &ctx.aliases);
    let triple = LabelTriple::new(&args.district, &args.municipality, &args.settlement);
    let resolved = resolver.resolve_labels(&triple)?;

    let name = catalogs
        .settlements
        .get(&resolved.code)
        .map(|settlement| settlement.name.clone())
        .unwrap_or_default();

    output(
        &ResolveResponse {
            code: resolved.code,
            name,
            municipality: resolved.municipality,
            district: resolved.district,
            labels: resolved.labels,
            mismatches: resolved.mismatches,
        },
        flags.format,
    )
}
