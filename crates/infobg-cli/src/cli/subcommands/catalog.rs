use clap::Subcommand;

/// Catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CatalogCommands {
    /// Build catalogs from the registry and write the JSON cache.
    Build,
    /// Look up a district by name.
    District { name: String },
    /// Look up a municipality by name.
    Municipality {
        name: String,
        /// District abbreviation to search in.
        #[arg(long)]
        district: Option<String>,
    },
    /// Look up a settlement by name.
    Settlement {
        name: String,
        /// District abbreviation to search in.
        #[arg(long)]
        district: Option<String>,
        /// Municipality abbreviation to search in.
        #[arg(long)]
        municipality: Option<String>,
    },
    /// List every unit of the newest registry edition.
    Units,
}
