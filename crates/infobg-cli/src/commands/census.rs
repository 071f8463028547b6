use std::path::PathBuf;

use anyhow::Context;
use infobg_census::output::{CENSUS_FILE, UNRESOLVED_FILE, write_census};
use infobg_census::{
    BatchOptions, BatchOutput, FileSummary, KeyConflict, Resolver, SourceEncoding, YearBatchLoader,
};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CensusArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::FileProgress;

#[derive(Serialize)]
struct CensusSummary {
    /// Distinct (settlement, date) records written.
    records: usize,
    observations: usize,
    cached: bool,
    output: PathBuf,
    files: Vec<FileSummary>,
    conflicts: Vec<KeyConflict>,
}

/// Handle `infobg census`.
pub fn handle(args: &CensusArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalogs = ctx.catalogs()?;
    let config = &ctx.config;
    let encoding = SourceEncoding::for_label(&config.census.encoding)?;
    let options = BatchOptions {
        dir: args.dir.clone().unwrap_or_else(|| config.paths.grao_dir.clone()),
        pattern: config.census.file_pattern.clone(),
        encoding,
        report: Some(config.paths.output(UNRESOLVED_FILE)),
    };
    let loader = YearBatchLoader::new(Resolver::new(&catalogs, &ctx.aliases), options);
    let cache = config.paths.output(CENSUS_FILE);

    let batch = if ctx.use_cache && cache.is_file() {
        loader.load_or_run(&cache, true, |_| {})?
    } else {
        run_with_progress(&loader)?
    };

    let records = batch.deduplicated();
    if !batch.cached && !batch.files.is_empty() {
        write_census(&cache, &records)
            .with_context(|| format!("failed to write {}", cache.display()))?;
    }

    output(
        &CensusSummary {
            records: records.len(),
            observations: batch.records.len(),
            cached: batch.cached,
            output: cache,
            files: batch.files,
            conflicts: batch.conflicts,
        },
        flags.format,
    )
}

fn run_with_progress(loader: &YearBatchLoader<'_>) -> anyhow::Result<BatchOutput> {
    let files = loader.discover()?;
    let progress = FileProgress::new(files.len());
    let result = loader.run_files(&files, |summary| progress.loaded(summary));
    progress.finish(result.is_ok());
    result.map_err(Into::into)
}
