//! Saving generated workbooks

use std::io::{Cursor, Read};

use pretty_assertions::assert_eq;
use sheetforge::prelude::*;
use sheetforge::record;

struct Account {
    account_id: i64,
    owner: String,
    balance: f64,
}

record!(Account {
    "AccountId" => account_id,
    "Owner" => owner,
    "Balance" => balance,
});

fn workbook() -> Workbook {
    let accounts = vec![
        Account {
            account_id: 1,
            owner: "Ada".into(),
            balance: 250.75,
        },
        Account {
            account_id: 2,
            owner: "Grace".into(),
            balance: -40.0,
        },
    ];
    let config = GeneratorConfig::default()
        .exclude_id_fields(true)
        .with_aggregates(AggregateKinds::SUM)
        .with_rule(FormattingRule::highlight_negative("Balance"))
        .with_freeze_panes(1, 0)
        .with_data_range_name("Accounts");

    let mut workbook = Workbook::new();
    Engine::new()
        .add_to_workbook(&mut workbook, &accounts, "Accounts", &config)
        .unwrap();
    workbook
}

struct Gauge {
    station: String,
    level: f64,
}

record!(Gauge {
    "Station" => station,
    "Level" => level,
});

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

#[test]
fn test_save_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accounts.xlsx");
    workbook().save(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains(r#"<pane ySplit="1""#), "{sheet}");
    assert!(sheet.contains(r#"<t xml:space="preserve">Ada</t>"#), "{sheet}");
    assert!(sheet.contains(r#"<v>210.75</v>"#), "{sheet}");
    assert!(sheet.contains(r#"sqref="B2:B3""#), "{sheet}");

    let book = read_part(&bytes, "xl/workbook.xml");
    assert!(
        book.contains(r#"<definedName name="Accounts">&apos;Accounts&apos;!$A$1:$B$3</definedName>"#),
        "{book}"
    );
}

#[test]
fn test_save_to_bytes_matches_parts() {
    let bytes = workbook().save_to_bytes().unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/workbook.xml",
            "xl/worksheets/sheet1.xml",
        ]
    );

    let styles = read_part(&bytes, "xl/styles.xml");
    assert!(styles.contains(r#"<dxfs count="1">"#), "{styles}");
}

#[test]
fn test_non_finite_levels_save_as_errors() {
    let gauges = vec![
        Gauge {
            station: "North".into(),
            level: f64::NAN,
        },
        Gauge {
            station: "South".into(),
            level: f64::INFINITY,
        },
    ];
    let config = GeneratorConfig::default().with_aggregates(AggregateKinds::SUM);
    let mut workbook = Workbook::new();
    Engine::new()
        .add_to_workbook(&mut workbook, &gauges, "Gauges", &config)
        .unwrap();

    let bytes = workbook.save_to_bytes().unwrap();
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    // two data cells and the sum row
    assert_eq!(sheet.matches(r#"t="e"><v>#NUM!</v></c>"#).count(), 3, "{sheet}");
    assert!(sheet.contains(r#"<c r="B4""#), "{sheet}");
    assert!(!sheet.contains("NaN"), "{sheet}");
    assert!(!sheet.contains(">inf<"), "{sheet}");
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let err = workbook().save(dir.path().join("accounts.csv")).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { argument: "path", .. }));
    assert!(err.to_string().contains("Unsupported file format"));
}

#[test]
fn test_empty_workbook_cannot_be_saved() {
    let err = Workbook::new().save_to_bytes().unwrap_err();
    assert!(matches!(err, Error::Xlsx(_)));
}
