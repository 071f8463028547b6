//! Shared fixtures: a small Vidin/Montana catalog and cp1251 table files.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use infobg_catalog::Catalogs;
use infobg_census::{BatchOptions, SourceEncoding};
use infobg_core::codes::{DistrictAbbrev, MunicipalityAbbrev, SettlementCode};
use infobg_core::entities::{District, Municipality, Settlement};
use infobg_core::enums::{AltitudeBand, SettlementKind};

fn district(name: &str, abbrev: &str) -> District {
    District {
        name: name.into(),
        abbrev: DistrictAbbrev::new(abbrev).unwrap(),
    }
}

fn municipality(name: &str, abbrev: &str) -> Municipality {
    Municipality {
        name: name.into(),
        abbrev: MunicipalityAbbrev::new(abbrev).unwrap(),
    }
}

fn settlement(code: &str, name: &str, owner: &str, kind: SettlementKind) -> Settlement {
    Settlement {
        code: SettlementCode::new(code).unwrap(),
        name: name.into(),
        municipality: MunicipalityAbbrev::new(owner).unwrap(),
        kind,
        altitude: AltitudeBand::From100To199,
    }
}

pub fn catalogs() -> Catalogs {
    use SettlementKind::{Town, Village};
    Catalogs::from_parts(
        [
            district("Видин", "VID"),
            district("Монтана", "MON"),
            district("Велико Търново", "VTR"),
        ],
        [
            municipality("Брегово", "VID03"),
            municipality("Видин", "VID06"),
            municipality("Димово", "VID09"),
            municipality("Вършец", "MON11"),
            municipality("Велико Търново", "VTR04"),
        ],
        [
            settlement("12348", "Горно Вършило", "VID09", Village),
            settlement("29129", "Арчар", "VID09", Village),
            settlement("06169", "Бреста", "VID09", Village),
            settlement("06171", "Бреста", "VID03", Village),
            settlement("12259", "Вършец", "MON11", Town),
            settlement("10971", "Видин", "VID06", Town),
            settlement("12079", "Вълчи дол", "VID03", Village),
            settlement("10447", "Велико Търново", "VTR04", Town),
        ],
    )
}

/// Write `text` as a windows-1251 file.
pub fn write_table(dir: &Path, name: &str, text: &str) -> PathBuf {
    let (bytes, _, unmappable) = encoding_rs::WINDOWS_1251.encode(text);
    assert!(!unmappable, "fixture text must be representable in cp1251");
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

pub fn options(dir: &Path, report: Option<PathBuf>) -> BatchOptions {
    BatchOptions {
        dir: dir.to_path_buf(),
        pattern: "tadr*".into(),
        encoding: SourceEncoding::default(),
        report,
    }
}
