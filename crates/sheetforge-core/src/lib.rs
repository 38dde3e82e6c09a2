//! # sheetforge-core
//!
//! The sheet object model that the sheetforge engine writes into.
//!
//! - [`CellValue`] - a value stored in a cell (number, text, boolean, date-time)
//! - [`CellAddress`] and [`CellRange`] - 0-based cell addressing
//! - [`Style`] - cell formatting (font, fill, border, alignment, number format)
//! - [`ConditionalFormatRule`] - range-level formatting rules
//! - [`Workbook`], [`Worksheet`] - the document structures
//!
//! ## Example
//!
//! ```rust
//! use sheetforge_core::{CellValue, Style, Worksheet};
//!
//! let mut sheet = Worksheet::new("Report");
//! sheet.set_cell_value_at(0, 0, "Price").unwrap();
//! sheet.set_cell_value_at(1, 0, 12.5).unwrap();
//! sheet.set_cell_style_at(0, 0, &Style::new().bold(true)).unwrap();
//!
//! assert_eq!(sheet.get_value_at(1, 0), CellValue::Number(12.5));
//! ```

pub mod cell;
pub mod conditional_format;
pub mod error;
pub mod named_range;
pub mod style;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellData, CellRange, CellValue};
pub use conditional_format::{
    CfColorValue, CfOperator, CfRuleType, CfValue, CfValueType, ConditionalFormatRule,
};
pub use error::{Error, Result};
pub use named_range::{NamedRange, NamedRangeCollection};
pub use workbook::{validate_sheet_name, Workbook};
pub use worksheet::{FreezePanes, Worksheet};

pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, NumberFormat, Style, StylePool,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name, in characters
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters Excel rejects in sheet names
pub const INVALID_SHEET_NAME_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];
