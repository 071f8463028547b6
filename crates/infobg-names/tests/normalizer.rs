//! Normalizer + alias table behaviour on realistic labels.

use infobg_core::enums::SettlementKind;
use infobg_names::{AliasEntry, AliasTable, HierarchyOverride, LabelTriple, Normalizer};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

#[fixture]
fn builtin() -> AliasTable {
    AliasTable::builtin().expect("builtin aliases parse")
}

#[rstest]
#[case("В.ТЪРНОВО", "велико търново")]
#[case("  в.търново  ", "велико търново")]
#[case("Софийска", "софия")]
#[case("ДОБРИЧКА", "добрич-селска")]
#[case("| Генерал-Тошево |", "генерал тошево")]
#[case("БОБОВДОЛ", "бобов дол")]
fn aliased_labels_reach_canonical_spelling(
    builtin: AliasTable,
    #[case] raw: &str,
    #[case] canonical: &str,
) {
    let normalizer = Normalizer::new(&builtin);
    assert_eq!(normalizer.area(raw), canonical);
}

#[rstest]
fn every_builtin_alias_is_case_and_space_insensitive(builtin: AliasTable) {
    let normalizer = Normalizer::new(&builtin);
    for entry in builtin.entries() {
        let shouted = format!("  {}\t", entry.legacy.to_uppercase());
        assert_eq!(
            normalizer.area(&shouted),
            entry.canonical,
            "alias {} did not survive case/whitespace changes",
            entry.legacy
        );
    }
}

#[rstest]
fn settlement_prefix_is_stripped_before_aliasing(builtin: AliasTable) {
    let normalizer = Normalizer::new(&builtin);
    assert_eq!(
        normalizer.settlement("С.ВЪЛЧИДОЛ"),
        (Some(SettlementKind::Village), "вълчи дол".to_string())
    );
    assert_eq!(
        normalizer.settlement("гр.Горно Вършило"),
        (Some(SettlementKind::Town), "горно вършило".to_string())
    );
}

#[test]
fn substitute_table_changes_resolution() {
    let table = AliasTable::new(
        vec![AliasEntry {
            legacy: "горно вършило".into(),
            canonical: "горно вършило".into(),
        }],
        Vec::new(),
    )
    .unwrap();
    let normalizer = Normalizer::new(&table);
    let labels = normalizer.triple(&LabelTriple::new("ВИДИН", "ДИМОВО", "с.Горно Вършило"));
    assert_eq!(labels.settlement, "горно вършило");
    assert_eq!(labels.district, "видин");
    assert_eq!(labels.municipality, "димово");
}

#[test]
fn overrides_run_after_aliases() {
    let table = AliasTable::new(
        vec![AliasEntry {
            legacy: "в.търново".into(),
            canonical: "велико търново".into(),
        }],
        vec![HierarchyOverride {
            district: "велико търново".into(),
            municipality: "велико търново".into(),
            settlement: Some("самоводене".into()),
            to_district: None,
            to_municipality: None,
            to_settlement: Some("самоводене-гара".into()),
        }],
    )
    .unwrap();
    let normalizer = Normalizer::new(&table);
    let labels = normalizer.triple(&LabelTriple::new("В.ТЪРНОВО", "В.ТЪРНОВО", "с.САМОВОДЕНЕ"));
    assert_eq!(labels.settlement, "самоводене-гара");
    assert_eq!(labels.kind, Some(SettlementKind::Village));
}

#[test]
fn alias_file_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aliases.toml");
    std::fs::write(
        &path,
        "[[alias]]\nlegacy = \"старо име\"\ncanonical = \"ново име\"\n",
    )
    .unwrap();

    let table = AliasTable::load(&path).unwrap();
    assert_eq!(table.canonical("старо име"), "ново име");
    assert!(AliasTable::load(&dir.path().join("missing.toml")).is_err());
}
