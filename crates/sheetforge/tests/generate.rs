//! End-to-end sheet generation

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use sheetforge::prelude::*;
use sheetforge::{record, CfRuleType, FreezePanes};

struct Line {
    price: f64,
    qty: i32,
}

record!(Line { "Price" => price, "Qty" => qty });

fn lines() -> Vec<Line> {
    vec![
        Line {
            price: 10.0,
            qty: 10,
        },
        Line {
            price: 20.0,
            qty: 20,
        },
        Line {
            price: 30.0,
            qty: 30,
        },
    ]
}

struct Product {
    product_id: i32,
    category_id: i64,
    product_name: String,
    unit_price: Decimal,
    in_stock: bool,
    released: NaiveDate,
    updated: Option<NaiveDateTime>,
}

impl Record for Product {
    fn schema() -> Schema<Self> {
        Schema::new("Product")
            .field("ProductId", |p: &Product| p.product_id)
            .field("CategoryID", |p: &Product| p.category_id)
            .field("ProductName", |p: &Product| p.product_name.clone())
            .field("UnitPrice", |p: &Product| p.unit_price)
            .field("InStock", |p: &Product| p.in_stock)
            .field("Released", |p: &Product| p.released)
            .field("Updated", |p: &Product| p.updated)
            .write_only::<String>("InternalNote")
    }
}

fn products() -> Vec<Product> {
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    vec![
        Product {
            product_id: 1,
            category_id: 7,
            product_name: "Widget".into(),
            unit_price: Decimal::new(123456, 2),
            in_stock: true,
            released: day,
            updated: day.and_hms_opt(9, 30, 0),
        },
        Product {
            product_id: 2,
            category_id: 7,
            product_name: "Gadget".into(),
            unit_price: Decimal::new(-500, 2),
            in_stock: false,
            released: day,
            updated: None,
        },
    ]
}

fn header(sheet: &Worksheet) -> Vec<CellValue> {
    let width = sheet.used_range().map_or(0, |r| r.end.col + 1);
    (0..width).map(|col| sheet.get_value_at(0, col)).collect()
}

#[test]
fn test_price_qty_aggregates() {
    let config = GeneratorConfig::default().with_aggregates(AggregateKinds::ALL);
    let sheet = Engine::new().generate(&lines(), "Lines", &config).unwrap();

    assert_eq!(
        header(&sheet),
        vec![CellValue::string("Price"), CellValue::string("Qty")]
    );

    // 1-based rows 5 to 9
    let qty: Vec<CellValue> = (4..9).map(|row| sheet.get_value_at(row, 1)).collect();
    assert_eq!(
        qty,
        vec![
            CellValue::Number(60.0),
            CellValue::Number(20.0),
            CellValue::Number(10.0),
            CellValue::Number(30.0),
            CellValue::Number(3.0),
        ]
    );
    let price: Vec<CellValue> = (4..9).map(|row| sheet.get_value_at(row, 0)).collect();
    assert_eq!(
        price,
        vec![
            CellValue::Number(60.0),
            CellValue::Number(20.0),
            CellValue::Number(10.0),
            CellValue::Number(30.0),
            CellValue::Number(3.0),
        ]
    );

    // First column is numeric, so no row labels
    assert_eq!(sheet.get_value_at(9, 0), CellValue::Empty);

    let sum_style = sheet.cell_style_at(4, 0).unwrap();
    assert!(sum_style.font.bold);
    assert_eq!(sum_style.fill.color(), Some(Color::LIGHT_GRAY));
    assert_eq!(sum_style.number_format, NumberFormat::thousands_decimal());
    assert_eq!(
        sheet.cell_style_at(4, 1).unwrap().number_format,
        NumberFormat::thousands()
    );
    assert_eq!(
        sheet.cell_style_at(8, 0).unwrap().fill.color(),
        Some(Color::LAVENDER)
    );
    assert_eq!(
        sheet.cell_style_at(8, 0).unwrap().number_format,
        NumberFormat::thousands()
    );
}

#[test]
fn test_decimal_aggregates_are_truncated() {
    let data = vec![
        Line {
            price: 10.5,
            qty: 1,
        },
        Line {
            price: 20.5,
            qty: 1,
        },
        Line {
            price: 30.0,
            qty: 1,
        },
    ];
    let config = GeneratorConfig::default()
        .with_aggregates(AggregateKinds::SUM | AggregateKinds::AVERAGE);
    let sheet = Engine::new().generate(&data, "Lines", &config).unwrap();
    assert_eq!(sheet.get_value_at(4, 0), CellValue::Number(61.0));
    assert_eq!(sheet.get_value_at(5, 0), CellValue::Number(20.333));
}

struct Payment {
    amount: Decimal,
}

record!(Payment { "Amount" => amount });

#[test]
fn test_fixed_point_aggregates_are_exact() {
    let payments: Vec<Payment> = ["0.7", "0.1"]
        .iter()
        .map(|a| Payment {
            amount: a.parse().unwrap(),
        })
        .collect();
    let config = GeneratorConfig::default()
        .with_aggregates(AggregateKinds::SUM | AggregateKinds::AVERAGE);
    let sheet = Engine::new().generate(&payments, "Payments", &config).unwrap();
    assert_eq!(sheet.get_value_at(3, 0), CellValue::Number(0.8));
    assert_eq!(sheet.get_value_at(4, 0), CellValue::Number(0.4));
}

#[test]
fn test_cell_formatting_by_type() {
    let sheet = Engine::new()
        .generate(&products(), "Products", &GeneratorConfig::default())
        .unwrap();

    assert_eq!(
        header(&sheet),
        vec![
            CellValue::string("Product Id"),
            CellValue::string("Category ID"),
            CellValue::string("Product Name"),
            CellValue::string("Unit Price"),
            CellValue::string("In Stock"),
            CellValue::string("Released"),
            CellValue::string("Updated"),
        ]
    );

    let header_style = sheet.cell_style_at(0, 0).unwrap();
    assert!(header_style.font.bold);
    assert_eq!(header_style.fill.color(), Some(Color::LIGHT_BLUE));
    assert_eq!(
        header_style.alignment.horizontal,
        sheetforge_core::HorizontalAlignment::Center
    );

    assert_eq!(sheet.get_value_at(1, 0), CellValue::Number(1.0));
    assert_eq!(
        sheet.cell_style_at(1, 0).unwrap().number_format,
        NumberFormat::thousands()
    );
    assert_eq!(sheet.get_value_at(1, 3), CellValue::Number(1234.56));
    assert_eq!(
        sheet.cell_style_at(1, 3).unwrap().number_format,
        NumberFormat::thousands_decimal()
    );
    assert_eq!(sheet.get_value_at(1, 4), CellValue::string("Yes"));
    assert_eq!(sheet.get_value_at(2, 4), CellValue::string("No"));

    let midnight = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(sheet.get_value_at(1, 5), CellValue::DateTime(midnight));
    assert_eq!(
        sheet.cell_style_at(1, 5).unwrap().number_format,
        NumberFormat::custom("yyyy-mm-dd")
    );
    assert_eq!(
        sheet.cell_style_at(1, 6).unwrap().number_format,
        NumberFormat::custom("yyyy-mm-dd hh:mm:ss")
    );
    assert_eq!(sheet.get_value_at(2, 6), CellValue::Empty);
    assert!(!sheet.cell_style_at(2, 6).unwrap().border.is_empty());
}

#[test]
fn test_exclude_id_fields() {
    let config = GeneratorConfig::default().exclude_id_fields(true);
    let sheet = Engine::new()
        .generate(&products(), "Products", &config)
        .unwrap();
    assert_eq!(sheet.get_value_at(0, 0), CellValue::string("Product Name"));
    assert_eq!(header(&sheet).len(), 5);
}

#[test]
fn test_label_column_for_aggregates() {
    let config = GeneratorConfig::default()
        .exclude_id_fields(true)
        .with_aggregates(AggregateKinds::SUM | AggregateKinds::MAX);
    let sheet = Engine::new()
        .generate(&products(), "Products", &config)
        .unwrap();

    assert_eq!(sheet.get_value_at(3, 0), CellValue::string("Sum"));
    assert_eq!(sheet.get_value_at(4, 0), CellValue::string("Max"));
    assert_eq!(sheet.get_value_at(3, 1), CellValue::Number(1229.56));
    assert_eq!(sheet.get_value_at(4, 1), CellValue::Number(1234.56));
    // Non-numeric columns stay empty
    assert_eq!(sheet.get_value_at(3, 2), CellValue::Empty);
    assert_eq!(
        sheet.cell_style_at(3, 0).unwrap().fill.color(),
        Some(Color::LIGHT_GRAY)
    );
}

#[test]
fn test_no_aggregate_rows_without_numeric_columns() {
    struct Tag {
        name: String,
    }
    record!(Tag { "Name" => name });

    let tags = vec![Tag { name: "a".into() }];
    let config = GeneratorConfig::default().with_aggregates(AggregateKinds::ALL);
    let sheet = Engine::new().generate(&tags, "Tags", &config).unwrap();
    assert_eq!(sheet.used_range().map(|r| r.end.row), Some(1));
}

#[test]
fn test_empty_collection() {
    let config = GeneratorConfig::default()
        .with_aggregates(AggregateKinds::ALL)
        .with_rule(FormattingRule::data_bars("Price"));
    let sheet = Engine::new()
        .generate(&Vec::<Line>::new(), "Empty", &config)
        .unwrap();

    assert_eq!(sheet.get_value_at(0, 0), CellValue::string("Price"));
    for row in 1..6 {
        assert_eq!(sheet.get_value_at(row, 0), CellValue::Number(0.0));
        assert_eq!(sheet.get_value_at(row, 1), CellValue::Number(0.0));
    }
    assert!(sheet.conditional_formats().is_empty());
}

#[test]
fn test_sheet_name_validation() {
    let engine = Engine::new();
    let config = GeneratorConfig::default();

    let long = "A".repeat(32);
    let err = engine.generate(&lines(), &long, &config).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidArgument {
            argument: "sheet_name",
            ..
        }
    ));
    let message = err.to_string();
    assert!(message.contains("32"), "{message}");
    assert!(message.contains("31"), "{message}");

    let err = engine.generate(&lines(), "Q1:Q2", &config).unwrap_err();
    assert!(err.to_string().contains("':'"), "{err}");

    for name in ["", "   "] {
        let err = engine.generate(&lines(), name, &config).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    let ok = "B".repeat(31);
    assert_eq!(engine.generate(&lines(), &ok, &config).unwrap().name(), ok);
}

#[test]
fn test_no_exportable_fields() {
    struct Hidden;

    impl Record for Hidden {
        fn schema() -> Schema<Self> {
            Schema::new("Hidden").write_only::<i32>("Secret")
        }
    }

    let err = Engine::new()
        .generate(&[Hidden], "Hidden", &GeneratorConfig::default())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Record type 'Hidden' has no exportable fields"
    );

    struct OnlyId {
        id: i32,
    }
    record!(OnlyId { "Id" => id });
    let config = GeneratorConfig::default().exclude_id_fields(true);
    let err = Engine::new()
        .generate(&[OnlyId { id: 1 }], "Ids", &config)
        .unwrap_err();
    assert!(matches!(err, Error::NoExportableFields { .. }));
}

#[test]
fn test_rule_with_empty_field_is_rejected() {
    let config = GeneratorConfig::default().with_rule(FormattingRule::highlight_negative(""));
    let err = Engine::new()
        .generate(&lines(), "Lines", &config)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { argument: "rules", .. }));
}

#[test]
fn test_conditional_formats_cover_data_rows() {
    let config = GeneratorConfig::default()
        .with_aggregates(AggregateKinds::SUM)
        .with_rule(FormattingRule::highlight_negative("Qty"))
        .with_rule(FormattingRule::color_scale("Price", Color::WHITE, Color::BLUE))
        .with_rule(FormattingRule::top_n("Missing", 3));
    let sheet = Engine::new().generate(&lines(), "Lines", &config).unwrap();

    let rules = sheet.conditional_formats();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].sqref(), "B2:B4");
    assert_eq!(rules[0].priority, 1);
    assert_eq!(rules[1].sqref(), "A2:A4");
    assert_eq!(rules[1].priority, 2);
    assert!(matches!(rules[1].rule_type, CfRuleType::ColorScale { .. }));
}

#[test]
fn test_strict_rules() {
    let config = GeneratorConfig::default()
        .strict_rules(true)
        .with_rule(FormattingRule::data_bars("Discount"));
    let err = Engine::new()
        .generate(&lines(), "Lines", &config)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Formatting rule targets unknown field 'Discount'"
    );
}

#[test]
fn test_freeze_panes_and_autosize() {
    let config = GeneratorConfig::default().with_freeze_panes(1, 1);
    let sheet = Engine::new()
        .generate(&products(), "Products", &config)
        .unwrap();
    assert_eq!(sheet.freeze_panes(), Some(&FreezePanes { row: 1, col: 1 }));
    // "Category ID" is the longest text in column B
    assert_eq!(sheet.column_width(1), 13.0);

    let unfrozen = Engine::new()
        .generate(&products(), "Products", &GeneratorConfig::default())
        .unwrap();
    assert_eq!(unfrozen.freeze_panes(), None);
}

#[test]
fn test_generation_is_deterministic() {
    let config = GeneratorConfig::default()
        .with_aggregates(AggregateKinds::ALL)
        .with_rule(FormattingRule::highlight_duplicates("ProductName"));
    let engine = Engine::new();
    let first = engine.generate(&products(), "Products", &config).unwrap();
    let second = engine.generate(&products(), "Products", &config).unwrap();

    let cells = |sheet: &Worksheet| -> Vec<(u32, u16, CellValue, Option<Style>)> {
        sheet
            .iter_cells()
            .map(|(row, col, data)| {
                (
                    row,
                    col,
                    data.value.clone(),
                    sheet.cell_style_at(row, col).cloned(),
                )
            })
            .collect()
    };
    assert_eq!(cells(&first), cells(&second));
    assert_eq!(first.conditional_formats(), second.conditional_formats());
}

#[test]
fn test_add_to_workbook_defines_data_range() {
    let mut workbook = Workbook::new();
    let engine = Engine::new();
    let config = GeneratorConfig::default()
        .with_aggregates(AggregateKinds::SUM)
        .with_data_range_name("LineData");

    let index = engine
        .add_to_workbook(&mut workbook, &lines(), "Bob's Lines", &config)
        .unwrap();
    assert_eq!(index, 0);
    let name = workbook.get_named_range("LineData").unwrap();
    assert_eq!(name.refers_to, "'Bob''s Lines'!$A$1:$B$4");

    // Duplicate sheet name leaves the workbook untouched
    let err = engine
        .add_to_workbook(&mut workbook, &lines(), "BOB'S LINES", &GeneratorConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Sheet(sheetforge_core::Error::DuplicateSheetName(_))
    ));

    // Duplicate defined name fails before the sheet is added
    let err = engine
        .add_to_workbook(&mut workbook, &lines(), "Second", &config)
        .unwrap_err();
    assert!(matches!(err, Error::Sheet(sheetforge_core::Error::InvalidName(_))));
    assert_eq!(workbook.sheet_count(), 1);
}
