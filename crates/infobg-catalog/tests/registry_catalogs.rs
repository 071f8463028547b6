//! Building catalogs from registry editions, precedence, and the JSON cache.

use std::path::Path;

use infobg_catalog::cache::{DISTRICTS_FILE, MUNICIPALITIES_FILE, SETTLEMENTS_FILE};
use infobg_catalog::registry;
use infobg_catalog::units::territorial_units;
use infobg_catalog::{CatalogError, Catalogs};
use infobg_core::codes::{DistrictAbbrev, SettlementCode};
use infobg_core::entities::{District, Municipality, Settlement, TerritorialLevel};
use pretty_assertions::assert_eq;
use schemars::schema_for;
use serde_json::{Value, json};

fn write(dir: &Path, name: &str, value: &Value) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Two editions; the newer one renames a settlement and the older one has
/// an extra municipality and settlement.
fn registry_root() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    let newer = root.path().join("2025");
    let older = root.path().join("2011");

    write(
        &newer,
        registry::DISTRICTS_FILE,
        &json!([{"oblast": "VID", "name": "Видин"}, {"oblast": "", "name": ""}]),
    );
    write(
        &newer,
        registry::MUNICIPALITIES_FILE,
        &json!({"data": [{"obshtina": "VID09", "name": "Димово"}]}),
    );
    write(
        &newer,
        registry::SETTLEMENTS_FILE,
        &json!([
            {"ekatte": "29129", "name": "Горно Вършило", "kind": "3", "altitude": "3",
             "obshtina": "VID09", "oblast": "VID"},
            {"ekatte": "", "name": "Общо"}
        ]),
    );

    write(
        &older,
        registry::DISTRICTS_FILE,
        &json!([{"oblast": "VID", "name": "Видин"}]),
    );
    write(
        &older,
        registry::MUNICIPALITIES_FILE,
        &json!([
            {"obshtina": "VID09", "name": "Димово"},
            {"obshtina": "VID03", "name": "Брегово"}
        ]),
    );
    write(
        &older,
        registry::SETTLEMENTS_FILE,
        &json!([
            {"ekatte": "29129", "name": "Горно Вършилово", "kind": "3", "altitude": "3",
             "obshtina": "VID09", "oblast": "VID"},
            {"ekatte": "12348", "name": "Медовница", "kind": "3", "altitude": "2",
             "obshtina": "VID03", "oblast": "VID"}
        ]),
    );
    root
}

#[test]
fn newest_edition_wins_on_conflict() {
    let root = registry_root();
    let catalogs = Catalogs::from_registry(root.path()).unwrap();

    assert_eq!(catalogs.districts.len(), 1);
    assert_eq!(catalogs.municipalities.len(), 2);
    assert_eq!(catalogs.settlements.len(), 2);

    let code = SettlementCode::new("29129").unwrap();
    assert_eq!(catalogs.settlements.get(&code).unwrap().name, "Горно Вършило");
    assert!(catalogs.settlements.find("горно вършилово", None, None).is_err());
}

#[test]
fn missing_or_empty_registry_aborts() {
    let root = tempfile::tempdir().unwrap();
    assert!(matches!(
        Catalogs::from_registry(&root.path().join("nsi.bg")),
        Err(CatalogError::MissingRegistry(_))
    ));

    write(&root.path().join("2025"), registry::DISTRICTS_FILE, &json!([]));
    assert!(matches!(
        Catalogs::from_registry(root.path()),
        Err(CatalogError::Empty { what: "districts", .. })
    ));
}

#[test]
fn cache_roundtrip_preserves_every_record() {
    let root = registry_root();
    let built = Catalogs::from_registry(root.path()).unwrap();

    let out = tempfile::tempdir().unwrap();
    built.write_cache(out.path()).unwrap();
    let reloaded = Catalogs::read_cache(out.path()).unwrap().expect("cache present");

    assert_eq!(
        built.districts.iter().collect::<Vec<_>>(),
        reloaded.districts.iter().collect::<Vec<_>>()
    );
    assert_eq!(
        built.municipalities.iter().collect::<Vec<_>>(),
        reloaded.municipalities.iter().collect::<Vec<_>>()
    );
    assert_eq!(
        built.settlements.iter().collect::<Vec<_>>(),
        reloaded.settlements.iter().collect::<Vec<_>>()
    );
}

#[test]
fn cache_files_match_entity_schemas() {
    let root = registry_root();
    let out = tempfile::tempdir().unwrap();
    Catalogs::from_registry(root.path())
        .unwrap()
        .write_cache(out.path())
        .unwrap();

    let check = |file: &str, schema: Value| {
        let text = std::fs::read_to_string(out.path().join(file)).unwrap();
        let instance: Value = serde_json::from_str(&text).unwrap();
        let validator = jsonschema::validator_for(&schema).unwrap();
        let errors: Vec<String> = validator.iter_errors(&instance).map(|e| e.to_string()).collect();
        assert!(errors.is_empty(), "{file}: {errors:?}");
    };
    check(DISTRICTS_FILE, serde_json::to_value(schema_for!(Vec<District>)).unwrap());
    check(
        MUNICIPALITIES_FILE,
        serde_json::to_value(schema_for!(Vec<Municipality>)).unwrap(),
    );
    check(
        SETTLEMENTS_FILE,
        serde_json::to_value(schema_for!(Vec<Settlement>)).unwrap(),
    );

    let text = std::fs::read_to_string(out.path().join(DISTRICTS_FILE)).unwrap();
    let districts: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(districts[0]["nickname"], "VID");
}

#[test]
fn load_prefers_cache_and_falls_back_to_registry() {
    let root = registry_root();
    let out = tempfile::tempdir().unwrap();

    // No cache yet: built from the registry.
    let built = Catalogs::load(root.path(), out.path(), true).unwrap();
    assert_eq!(built.settlements.len(), 2);

    // A cache with a single district is honoured when allowed.
    let cached = Catalogs::from_parts(
        [District {
            name: "Монтана".into(),
            abbrev: DistrictAbbrev::new("MON").unwrap(),
        }],
        built.municipalities.iter().cloned(),
        built.settlements.iter().cloned(),
    );
    cached.write_cache(out.path()).unwrap();
    let loaded = Catalogs::load(root.path(), out.path(), true).unwrap();
    assert!(loaded.districts.find("монтана").is_ok());

    // ...and ignored on refresh.
    let refreshed = Catalogs::load(root.path(), out.path(), false).unwrap();
    assert!(refreshed.districts.find("монтана").is_err());

    // A corrupt cache falls back to the registry.
    std::fs::write(out.path().join(SETTLEMENTS_FILE), "[{").unwrap();
    let recovered = Catalogs::load(root.path(), out.path(), true).unwrap();
    assert!(recovered.districts.find("видин").is_ok());
}

#[test]
fn empty_cache_is_rebuilt_from_registry() {
    let root = registry_root();
    let out = tempfile::tempdir().unwrap();
    for name in [DISTRICTS_FILE, MUNICIPALITIES_FILE, SETTLEMENTS_FILE] {
        write(out.path(), name, &json!([]));
    }

    let loaded = Catalogs::load(root.path(), out.path(), true).unwrap();

    assert!(loaded.districts.find("видин").is_ok());
    assert_eq!(loaded.settlements.len(), 2);
}

#[test]
fn units_flatten_one_edition() {
    let root = registry_root();
    let units = territorial_units(&root.path().join("2011")).unwrap();

    let levels: Vec<TerritorialLevel> = units.iter().map(|u| u.level).collect();
    assert_eq!(
        levels,
        vec![
            TerritorialLevel::Settlement,
            TerritorialLevel::Settlement,
            TerritorialLevel::Municipality,
            TerritorialLevel::Municipality,
            TerritorialLevel::District,
        ]
    );
    let medovnitsa = &units[1];
    assert_eq!(medovnitsa.code, "12348");
    assert_eq!(medovnitsa.district, "VID");
    assert_eq!(medovnitsa.municipality.as_deref(), Some("VID03"));
    assert_eq!(medovnitsa.kind, Some(3));
}
