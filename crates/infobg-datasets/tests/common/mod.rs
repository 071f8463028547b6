//! A two-district catalog shared by the dataset tests.
#![allow(dead_code)]

use infobg_catalog::Catalogs;
use infobg_core::codes::{DistrictAbbrev, MunicipalityAbbrev, SettlementCode};
use infobg_core::entities::{District, Municipality, Settlement};
use infobg_core::enums::{AltitudeBand, SettlementKind};

fn municipality(name: &str, abbrev: &str) -> Municipality {
    Municipality {
        name: name.into(),
        abbrev: MunicipalityAbbrev::new(abbrev).unwrap(),
    }
}

fn settlement(code: &str, name: &str, owner: &str) -> Settlement {
    Settlement {
        code: SettlementCode::new(code).unwrap(),
        name: name.into(),
        municipality: MunicipalityAbbrev::new(owner).unwrap(),
        kind: SettlementKind::Village,
        altitude: AltitudeBand::From100To199,
    }
}

pub fn catalogs() -> Catalogs {
    Catalogs::from_parts(
        [
            District {
                name: "Видин".into(),
                abbrev: DistrictAbbrev::new("VID").unwrap(),
            },
            District {
                name: "Монтана".into(),
                abbrev: DistrictAbbrev::new("MON").unwrap(),
            },
        ],
        [
            municipality("Брегово", "VID03"),
            municipality("Димово", "VID09"),
            municipality("Вършец", "MON11"),
        ],
        [
            settlement("12348", "Горно Вършило", "VID09"),
            settlement("29129", "Арчар", "VID09"),
            settlement("06171", "Бреста", "VID03"),
        ],
    )
}
