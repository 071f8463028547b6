use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use infobg_datasets::InfostatKind;

use crate::cli::subcommands::CatalogCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Territorial catalogs built from the NSI registry.
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },
    /// Show how a label is folded and aliased.
    Names(NamesArgs),
    /// Resolve one (district, municipality, settlement) triple.
    Resolve(ResolveArgs),
    /// Load every population table and write the census output.
    Census(CensusArgs),
    /// Load a municipality-level census table.
    Infostat(InfostatArgs),
    /// Validate and export the school register.
    Institutions,
}

/// Arguments for `infobg names`.
#[derive(Clone, Debug, Args)]
pub struct NamesArgs {
    pub label: String,
    /// Treat the label as a settlement (strip the kind prefix).
    #[arg(long)]
    pub settlement: bool,
}

/// Arguments for `infobg resolve`.
#[derive(Clone, Debug, Args)]
pub struct ResolveArgs {
    #[arg(long)]
    pub district: String,
    #[arg(long)]
    pub municipality: String,
    #[arg(long)]
    pub settlement: String,
}

/// Arguments for `infobg census`.
#[derive(Clone, Debug, Args)]
pub struct CensusArgs {
    /// Directory of population tables (defaults to `paths.grao_dir`).
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

/// Arguments for `infobg infostat`.
#[derive(Clone, Debug, Args)]
pub struct InfostatArgs {
    pub kind: InfostatKindArg,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum InfostatKindArg {
    MotherTongue,
    Ethnicity,
    Religion,
    Education,
}

impl From<InfostatKindArg> for InfostatKind {
    fn from(value: InfostatKindArg) -> Self {
        match value {
            InfostatKindArg::MotherTongue => Self::MotherTongue,
            InfostatKindArg::Ethnicity => Self::Ethnicity,
            InfostatKindArg::Religion => Self::Religion,
            InfostatKindArg::Education => Self::Education,
        }
    }
}
