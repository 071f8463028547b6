use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `infobg` binary.
#[derive(Debug, Parser)]
#[command(
    name = "infobg",
    version,
    about = "Bulgarian territorial catalogs, population tables, and municipal datasets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Ignore cached JSON output and rebuild from the sources
    #[arg(long, global = true)]
    pub refresh: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            refresh: self.refresh,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::CatalogCommands;
    use super::{Cli, Commands, OutputFormat};
    use crate::cli::root_commands::InfostatKindArg;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["infobg", "--format", "table", "--verbose", "census"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Census(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["infobg", "catalog", "build", "--format", "raw", "--refresh"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.global_flags().refresh);
        assert!(matches!(
            cli.command,
            Commands::Catalog {
                action: CatalogCommands::Build
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["infobg", "--format", "xml", "census"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn settlement_lookup_takes_optional_scope() {
        let cli = Cli::try_parse_from([
            "infobg",
            "catalog",
            "settlement",
            "Бреста",
            "--municipality",
            "VID09",
        ])
        .expect("cli should parse");

        match cli.command {
            Commands::Catalog {
                action:
                    CatalogCommands::Settlement {
                        name,
                        district,
                        municipality,
                    },
            } => {
                assert_eq!(name, "Бреста");
                assert_eq!(district, None);
                assert_eq!(municipality.as_deref(), Some("VID09"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn resolve_requires_all_three_labels() {
        assert!(Cli::try_parse_from(["infobg", "resolve", "--district", "ВИДИН"]).is_err());

        let cli = Cli::try_parse_from([
            "infobg",
            "resolve",
            "--district",
            "ВИДИН",
            "--municipality",
            "ДИМОВО",
            "--settlement",
            "С.АРЧАР",
        ])
        .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Resolve(_)));
    }

    #[test]
    fn infostat_kinds_use_kebab_case() {
        let cli = Cli::try_parse_from(["infobg", "infostat", "mother-tongue"]).expect("cli should parse");
        match cli.command {
            Commands::Infostat(args) => assert_eq!(args.kind, InfostatKindArg::MotherTongue),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["infobg", "infostat", "income"]).is_err());
    }
}
