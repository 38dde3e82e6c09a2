//! Cell value types

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::style::NumberFormat;

/// Days from 0001-01-01 (CE day 1) to 1899-12-30, the Excel 1900 epoch
const EXCEL_EPOCH_DAYS_FROM_CE: i64 = 693_594;

/// The value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value
    #[default]
    Empty,
    /// TRUE/FALSE
    Boolean(bool),
    /// Any number
    Number(f64),
    /// Text
    String(String),
    /// Calendar date and time; stored as a serial number on disk
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Text value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric view: numbers as-is, date-times as Excel serials
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::DateTime(dt) => Some(excel_serial(dt)),
            _ => None,
        }
    }

    /// Type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Boolean(_) => "boolean",
            CellValue::Number(_) => "number",
            CellValue::String(_) => "string",
            CellValue::DateTime(_) => "datetime",
        }
    }

    /// Text as a spreadsheet application would show it under `format`
    ///
    /// Only the format codes this crate emits are rendered precisely
    /// (`#,##0`, `#,##0.00`, `yyyy-mm-dd`, `yyyy-mm-dd hh:mm:ss`); anything
    /// else falls back to the plain display form.
    pub fn rendered_text(&self, format: &NumberFormat) -> String {
        match self {
            CellValue::Number(n) => match format.decimal_places() {
                Some(places) => group_thousands(*n, places),
                None => self.to_string(),
            },
            CellValue::DateTime(dt) => match format.code() {
                Some(code) if code.eq_ignore_ascii_case("yyyy-mm-dd") => {
                    dt.format("%Y-%m-%d").to_string()
                }
                _ => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            },
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(s) => f.write_str(s),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::DateTime(d.and_time(chrono::NaiveTime::MIN))
    }
}

/// Excel 1900-system serial number of a date-time
///
/// Day 1 is 1900-01-01; the epoch sits at 1899-12-30 so serials match
/// Excel for every date after February 1900.
pub fn excel_serial(dt: &NaiveDateTime) -> f64 {
    let days = i64::from(dt.date().num_days_from_ce()) - EXCEL_EPOCH_DAYS_FROM_CE;
    let time = dt.time();
    let seconds = f64::from(time.num_seconds_from_midnight())
        + f64::from(time.nanosecond()) / 1_000_000_000.0;
    days as f64 + seconds / 86_400.0
}

/// `1234567.891` with 2 places becomes `1,234,567.89`
fn group_thousands(n: f64, places: usize) -> String {
    let fixed = format!("{:.*}", places, n.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if n < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
