use std::path::PathBuf;

use anyhow::Context;
use infobg_datasets::load_institutions;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

const INSTITUTIONS_FILE: &str = "institutions.json";

#[derive(Serialize)]
struct InstitutionSummary {
    exported: usize,
    skipped: usize,
    duplicates: Vec<u64>,
    output: PathBuf,
}

/// Handle `infobg institutions`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalogs = ctx.catalogs()?;
    let paths = &ctx.config.paths;
    let report = load_institutions(&paths.mon_dir, &catalogs)?;

    let path = paths.output(INSTITUTIONS_FILE);
    std::fs::create_dir_all(&paths.output_dir)
        .with_context(|| format!("failed to create {}", paths.output_dir.display()))?;
    let json = serde_json::to_vec_pretty(&report.institutions)?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;

    output(
        &InstitutionSummary {
            exported: report.institutions.len(),
            skipped: report.skipped,
            duplicates: report.duplicates,
            output: path,
        },
        flags.format,
    )
}
