//! # sheetforge-xlsx
//!
//! XLSX (Office Open XML) writer for sheetforge workbooks.
//!
//! ```rust
//! use sheetforge_core::Workbook;
//! use sheetforge_xlsx::XlsxWriter;
//!
//! let mut wb = Workbook::new();
//! let index = wb.add_worksheet_with_name("Report").unwrap();
//! wb.worksheet_mut(index).unwrap().set_cell_value_at(0, 0, "Hello").unwrap();
//!
//! let bytes = XlsxWriter::write_to_bytes(&wb).unwrap();
//! assert!(bytes.starts_with(b"PK"));
//! ```

pub mod error;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use writer::XlsxWriter;
