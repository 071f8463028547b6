//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed file and env var manipulation.

use std::path::PathBuf;

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use infobg_config::InfobgConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_paths_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[paths]
nsi_dir = "/srv/ekatte"
grao_dir = "/srv/grao"
output_dir = "/tmp/out"
"#,
        )?;

        let config: InfobgConfig = Figment::from(Serialized::defaults(InfobgConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.paths.nsi_dir, PathBuf::from("/srv/ekatte"));
        assert_eq!(config.paths.grao_dir, PathBuf::from("/srv/grao"));
        assert_eq!(config.paths.output_dir, PathBuf::from("/tmp/out"));
        // untouched keys keep their defaults
        assert_eq!(config.paths.mon_dir, PathBuf::from("data/mon.bg"));
        Ok(())
    });
}

#[test]
fn loads_census_and_names_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[census]
file_pattern = "tadr_*.txt"
encoding = "ibm866"

[names]
alias_file = "aliases.toml"

[general]
use_cache = false
"#,
        )?;

        let config: InfobgConfig = Figment::from(Serialized::defaults(InfobgConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.census.file_pattern, "tadr_*.txt");
        assert_eq!(config.census.encoding, "ibm866");
        assert_eq!(config.names.alias_file, Some(PathBuf::from("aliases.toml")));
        assert!(!config.general.use_cache);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_figment() {
    Jail::expect_with(|jail| {
        jail.create_dir(".infobg")?;
        jail.create_file(
            ".infobg/config.toml",
            r#"
[paths]
grao_dir = "archive/grao"
"#,
        )?;

        let config: InfobgConfig = InfobgConfig::figment().extract()?;
        assert_eq!(config.paths.grao_dir, PathBuf::from("archive/grao"));
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[census]
encoding = "ibm866"
"#,
        )?;
        jail.set_env("INFOBG_CENSUS__ENCODING", "koi8-r");

        let config: InfobgConfig = Figment::from(Serialized::defaults(InfobgConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("INFOBG_").split("__"))
            .extract()?;

        assert_eq!(config.census.encoding, "koi8-r");
        Ok(())
    });
}

#[test]
fn wrong_type_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
use_cache = "sometimes"
"#,
        )?;

        let result: Result<InfobgConfig, _> =
            Figment::from(Serialized::defaults(InfobgConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();
        assert!(result.is_err());
        Ok(())
    });
}
