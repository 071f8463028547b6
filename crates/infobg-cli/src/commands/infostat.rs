use anyhow::Context;
use infobg_datasets::{InfostatKind, load_infostat};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InfostatArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `infobg infostat`.
pub fn handle(args: &InfostatArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalogs = ctx.catalogs()?;
    let kind = InfostatKind::from(args.kind);
    let dir = &ctx.config.paths.infostat_dir;
    let records = load_infostat(dir, kind, &catalogs)
        .with_context(|| format!("failed to load {}", kind.file_name()))?;
    output(&records, flags.format)
}
