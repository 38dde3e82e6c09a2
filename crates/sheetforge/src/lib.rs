//! # sheetforge
//!
//! Turns typed records into styled spreadsheets.
//!
//! - Fields are discovered from a declarative [`Schema`] (see [`record!`])
//! - Each column gets a formatter resolved once from its declared type
//! - Optional aggregate rows (sum, average, min, max, count) below the data
//! - Conditional formats (highlights, color scales, data bars, top-N,
//!   duplicates) over the data rows of a column
//! - Frozen panes and autosized columns
//!
//! ## Example
//!
//! ```rust
//! use sheetforge::prelude::*;
//! use sheetforge::record;
//!
//! struct Order {
//!     order_id: i64,
//!     customer: String,
//!     amount: f64,
//! }
//!
//! record!(Order {
//!     "OrderId" => order_id,
//!     "CustomerName" => customer,
//!     "Amount" => amount,
//! });
//!
//! let orders = vec![
//!     Order { order_id: 1, customer: "Acme".into(), amount: 120.0 },
//!     Order { order_id: 2, customer: "Globex".into(), amount: -15.5 },
//! ];
//!
//! let config = GeneratorConfig::default()
//!     .exclude_id_fields(true)
//!     .with_aggregates(AggregateKinds::SUM | AggregateKinds::COUNT)
//!     .with_rule(FormattingRule::highlight_negative("Amount"))
//!     .with_freeze_panes(1, 0);
//!
//! let mut workbook = Workbook::new();
//! Engine::new().add_to_workbook(&mut workbook, &orders, "Orders", &config).unwrap();
//!
//! let sheet = workbook.worksheet(0).unwrap();
//! assert_eq!(sheet.get_value_at(0, 0), CellValue::string("Customer Name"));
//! assert_eq!(sheet.get_value_at(3, 1), CellValue::Number(104.5));
//!
//! // workbook.save("orders.xlsx").unwrap();
//! ```

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod prelude;
pub mod record;
pub mod rules;
pub mod value;

pub use aggregate::{
    AggregateKind, AggregateKinds, AggregationStrategies, AggregationStrategy, NumericColumn,
};
pub use config::GeneratorConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use format::{
    format_with, DisplayValue, FormattedCell, FormatterRegistry, StyleHint, ValueFormatter,
};
pub use record::{extract, format_label, is_id_field, FieldDescriptor, Record, Schema};
pub use rules::{FormattingRule, RuleKind, RuleParams, RuleStrategies, RuleStrategy};
pub use value::{DeclaredType, FieldType, FieldValue, NumericFamily, NumericKind, ValueKind};

// Re-export the sheet model
pub use sheetforge_core::{
    CellAddress, CellRange, CellValue, CfOperator, CfRuleType, Color, ConditionalFormatRule,
    FreezePanes, NumberFormat, Style, Workbook, Worksheet, MAX_COLS, MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};
pub use sheetforge_xlsx::{XlsxError, XlsxWriter};

use std::path::Path;

/// Extension trait for [`Workbook`] to write XLSX output
pub trait WorkbookExt {
    /// Save the workbook; only the `.xlsx` extension is supported
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Serialize the workbook as XLSX bytes
    fn save_to_bytes(&self) -> Result<Vec<u8>>;
}

impl WorkbookExt for Workbook {
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") => Ok(XlsxWriter::write_file(self, path)?),
            _ => Err(Error::invalid(
                "path",
                format!("Unsupported file format: {}", path.display()),
            )),
        }
    }

    fn save_to_bytes(&self) -> Result<Vec<u8>> {
        Ok(XlsxWriter::write_to_bytes(self)?)
    }
}
