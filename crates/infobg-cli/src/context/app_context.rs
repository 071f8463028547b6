use anyhow::Context;
use infobg_catalog::Catalogs;
use infobg_config::InfobgConfig;
use infobg_names::AliasTable;

use crate::cli::GlobalFlags;

/// Shared resources initialized once at startup.
///
/// The alias table is loaded eagerly because every resolving command needs
/// it. Catalogs are loaded per command: `catalog build` wants the registry,
/// everything else takes the cache when allowed.
pub struct AppContext {
    pub config: InfobgConfig,
    pub aliases: AliasTable,
    pub use_cache: bool,
}

impl AppContext {
    pub fn init(config: InfobgConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let aliases = match &config.names.alias_file {
            Some(path) => AliasTable::load(path)
                .with_context(|| format!("failed to load alias table {}", path.display()))?,
            None => AliasTable::builtin().context("built-in alias table is malformed")?,
        };
        tracing::debug!(
            aliases = aliases.entries().len(),
            overrides = aliases.overrides().len(),
            "alias table ready"
        );

        let use_cache = config.general.use_cache && !flags.refresh;
        Ok(Self {
            config,
            aliases,
            use_cache,
        })
    }

    /// Catalogs from the cache in `output_dir`, or from the registry.
    pub fn catalogs(&self) -> anyhow::Result<Catalogs> {
        let paths = &self.config.paths;
        Catalogs::load(&paths.nsi_dir, &paths.output_dir, self.use_cache)
            .context("failed to load territorial catalogs")
    }
}
