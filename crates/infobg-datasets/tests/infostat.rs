mod common;

use infobg_datasets::{DatasetError, InfostatKind, load_infostat};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(dir: &TempDir, kind: InfostatKind, text: &str) {
    std::fs::write(dir.path().join(kind.file_name()), text).unwrap();
}

const MOTHER_TONGUE: &str = "\
Население по майчин език;;;;;;;;
;2021;;;;;;;
Община;Общо;Български;Турски;Ромски;Друг;Не мога да определя;Не желая;Непоказан
BG Общо за страната;6519789;5000000;500000;200000;10000;5000;4000;3000
VID Видин;80000;70000;100;5000;50;20;10;5
VID09 ДИМОВО;5000;4500;10;400;20;-;..;60
VID03 КУЛА;3000;2900;0;100;0;0;0;0
MON99 Нова община;10;10;0;0;0;0;0;0
MON11 Вършец;;1;1;1;1;1;1;1
";

#[test]
fn abbreviated_rows_must_match_the_catalog() {
    let dir = TempDir::new().unwrap();
    write(&dir, InfostatKind::MotherTongue, MOTHER_TONGUE);

    let records = load_infostat(dir.path(), InfostatKind::MotherTongue, &common::catalogs()).unwrap();

    assert_eq!(records.len(), 1);
    let dimovo = &records[0];
    assert_eq!(dimovo.municipality.as_str(), "VID09");
    assert_eq!(dimovo.year, 2021);
    assert_eq!(dimovo.total, 5000);
    let counts: Vec<_> = dimovo.categories.iter().map(|c| (c.name, c.count)).collect();
    assert_eq!(
        counts,
        vec![
            ("bulgarian", 4500),
            ("turkish", 10),
            ("roma", 400),
            ("other", 20),
            ("undecided", 0),
            ("no_answer", 0),
            ("not_shown", 60),
        ]
    );
}

#[test]
fn religion_has_its_own_columns() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        InfostatKind::Religion,
        "\
Вероизповедание;;;;;;;;;
;;2011;;;;;;;
Община;Общо;Православни;Мюсюлмани;Юдеи;Други;Нямат;Не мога;Не желая;Непоказан
VID03 Брегово;4000;3500;1;0;9;100;50;40;300
",
    );

    let records = load_infostat(dir.path(), InfostatKind::Religion, &common::catalogs()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].year, 2011);
    assert_eq!(records[0].categories.len(), 8);
    assert_eq!(records[0].categories[7].name, "not_shown");
    assert_eq!(records[0].categories[7].count, 300);
}

#[test]
fn education_rows_resolve_by_name_with_two_year_blocks() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        InfostatKind::Education,
        "\
Образование 7+;;;;;;;;;;;;
;2011;;;;;;2021;;;;;
Община;Общо;Висше;Средно;Основно;Начално;Без;Общо;Висше;Средно;Основно;Начално;Без
ДИМОВО;5000;300;2000;1500;800;400;4500;350;2100;1300;500;250
Брегово;-;-;-;-;-;-;4000;1;2;3;4;5
Кула;1;1;1;1;1;1;1;1;1;1;1;1
",
    );

    let records = load_infostat(dir.path(), InfostatKind::Education, &common::catalogs()).unwrap();

    let summary: Vec<_> = records
        .iter()
        .map(|r| (r.municipality.as_str(), r.year, r.total))
        .collect();
    assert_eq!(
        summary,
        vec![("VID09", 2011, 5000), ("VID09", 2021, 4500), ("VID03", 2021, 4000)]
    );
    assert_eq!(records[1].categories[0].name, "university");
    assert_eq!(records[1].categories[0].count, 350);
    assert_eq!(records[1].categories[4].count, 250);
}

#[test]
fn header_problems_are_errors() {
    let dir = TempDir::new().unwrap();
    let catalogs = common::catalogs();

    write(&dir, InfostatKind::Ethnicity, "Етническа принадлежност\n");
    assert!(matches!(
        load_infostat(dir.path(), InfostatKind::Ethnicity, &catalogs),
        Err(DatasetError::MissingHeader { what: "year", .. })
    ));

    write(&dir, InfostatKind::Ethnicity, "заглавие\nбез година\nколони\n");
    assert!(matches!(
        load_infostat(dir.path(), InfostatKind::Ethnicity, &catalogs),
        Err(DatasetError::MissingYear { .. })
    ));

    assert!(matches!(
        load_infostat(dir.path(), InfostatKind::Religion, &catalogs),
        Err(DatasetError::Csv { .. })
    ));
}
