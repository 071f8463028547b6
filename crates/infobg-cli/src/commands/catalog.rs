use std::path::PathBuf;

use anyhow::Context;
use infobg_catalog::{Catalogs, registry, units};
use infobg_core::codes::{DistrictAbbrev, MunicipalityAbbrev};
use infobg_names::Normalizer;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CatalogCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct BuildSummary {
    districts: usize,
    municipalities: usize,
    settlements: usize,
    cache_dir: PathBuf,
}

/// Handle `infobg catalog`.
pub fn handle(action: &CatalogCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        CatalogCommands::Build => build(ctx, flags),
        CatalogCommands::District { name } => {
            let catalogs = ctx.catalogs()?;
            let normalizer = Normalizer::new(&ctx.aliases);
            let district = catalogs.districts.find(&normalizer.area(name))?;
            output(district, flags.format)
        }
        CatalogCommands::Municipality { name, district } => {
            let catalogs = ctx.catalogs()?;
            let district = district
                .as_deref()
                .map(str::parse::<DistrictAbbrev>)
                .transpose()?;
            let normalizer = Normalizer::new(&ctx.aliases);
            let municipality = catalogs
                .municipalities
                .find(&normalizer.area(name), district.as_ref())?;
            output(municipality, flags.format)
        }
        CatalogCommands::Settlement {
            name,
            district,
            municipality,
        } => {
            let catalogs = ctx.catalogs()?;
            let district = district
                .as_deref()
                .map(str::parse::<DistrictAbbrev>)
                .transpose()?;
            let municipality = municipality
                .as_deref()
                .map(str::parse::<MunicipalityAbbrev>)
                .transpose()?;
            let (kind, label) = Normalizer::new(&ctx.aliases).settlement(name);
            let settlement = catalogs.settlements.find_with_kind(
                &label,
                district.as_ref(),
                municipality.as_ref(),
                kind,
            )?;
            output(settlement, flags.format)
        }
        CatalogCommands::Units => {
            let root = &ctx.config.paths.nsi_dir;
            let editions = registry::editions(root)?;
            let newest = editions
                .first()
                .with_context(|| format!("no registry editions under {}", root.display()))?;
            let units = units::territorial_units(newest)?;
            output(&units, flags.format)
        }
    }
}

fn build(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let paths = &ctx.config.paths;
    let catalogs = Catalogs::from_registry(&paths.nsi_dir)
        .with_context(|| format!("failed to build catalogs from {}", paths.nsi_dir.display()))?;
    catalogs.write_cache(&paths.output_dir)?;

    output(
        &BuildSummary {
            districts: catalogs.districts.len(),
            municipalities: catalogs.municipalities.len(),
            settlements: catalogs.settlements.len(),
            cache_dir: paths.output_dir.clone(),
        },
        flags.format,
    )
}
