//! Value formatting
//!
//! A [`FormatterRegistry`] holds [`ValueFormatter`]s ordered by priority.
//! Each column resolves its formatter once from its declared type; every cell
//! in the column is then formatted by that formatter, with nulls
//! short-circuited to an empty cell.

use chrono::NaiveTime;
use sheetforge_core::{CellValue, Color, HorizontalAlignment, NumberFormat, Style};

use crate::value::{DeclaredType, FieldValue, NumericFamily, ValueKind};

/// `yyyy-mm-dd hh:mm:ss`
pub const DATE_TIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
/// `yyyy-mm-dd`
pub const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Value written into a cell
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    Number(f64),
    Text(String),
    DateTime(chrono::NaiveDateTime),
}

impl DisplayValue {
    /// Empty text becomes an empty cell
    pub fn into_cell_value(self) -> CellValue {
        match self {
            DisplayValue::Number(n) => CellValue::Number(n),
            DisplayValue::Text(s) if s.is_empty() => CellValue::Empty,
            DisplayValue::Text(s) => CellValue::String(s),
            DisplayValue::DateTime(dt) => CellValue::DateTime(dt),
        }
    }
}

/// Declarative styling attached to a formatted value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleHint {
    pub number_format: Option<NumberFormat>,
    pub fill: Option<Color>,
    pub bold: bool,
    pub border: bool,
    pub align_center: bool,
}

impl StyleHint {
    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = Some(format);
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_border(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn with_center(mut self) -> Self {
        self.align_center = true;
        self
    }

    pub fn to_style(&self) -> Style {
        let mut style = Style::new().bold(self.bold);
        if let Some(format) = &self.number_format {
            style = style.number_format(format.clone());
        }
        if let Some(color) = self.fill {
            style = style.fill_color(color);
        }
        if self.border {
            style = style.thin_border();
        }
        if self.align_center {
            style = style.horizontal_alignment(HorizontalAlignment::Center);
        }
        style
    }
}

/// A formatted cell: display value plus style hint
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedCell {
    pub value: DisplayValue,
    pub hint: StyleHint,
}

impl FormattedCell {
    pub fn new(value: DisplayValue, hint: StyleHint) -> Self {
        Self { value, hint }
    }

    /// Empty text, default style
    pub fn empty() -> Self {
        Self::new(DisplayValue::Text(String::new()), StyleHint::default())
    }

    fn text(value: &FieldValue) -> Self {
        Self::new(DisplayValue::Text(value.to_string()), StyleHint::default())
    }
}

/// A type-matching formatting strategy
pub trait ValueFormatter: Send + Sync {
    /// Short name for diagnostics
    fn name(&self) -> &str;

    /// Higher priority is tried first
    fn priority(&self) -> i32;

    /// Whether this formatter handles the declared type
    fn matches(&self, declared: &DeclaredType) -> bool;

    /// Format a non-null value
    fn format(&self, value: &FieldValue) -> FormattedCell;
}

/// Fixed-point and floating values, `#,##0.00`
#[derive(Debug, Default)]
pub struct DecimalFormatter;

impl ValueFormatter for DecimalFormatter {
    fn name(&self) -> &str {
        "decimal"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn matches(&self, declared: &DeclaredType) -> bool {
        matches!(declared.kind.numeric(), Some(kind) if kind.family() == NumericFamily::Decimal)
    }

    fn format(&self, value: &FieldValue) -> FormattedCell {
        match value.as_f64() {
            Some(n) => FormattedCell::new(
                DisplayValue::Number(n),
                StyleHint::default().with_number_format(NumberFormat::thousands_decimal()),
            ),
            None => FormattedCell::text(value),
        }
    }
}

/// Signed integers, `#,##0`
#[derive(Debug, Default)]
pub struct IntegerFormatter;

impl ValueFormatter for IntegerFormatter {
    fn name(&self) -> &str {
        "integer"
    }

    fn priority(&self) -> i32 {
        90
    }

    fn matches(&self, declared: &DeclaredType) -> bool {
        matches!(declared.kind.numeric(), Some(kind) if kind.is_integer())
    }

    fn format(&self, value: &FieldValue) -> FormattedCell {
        match value.as_f64() {
            Some(n) => FormattedCell::new(
                DisplayValue::Number(n),
                StyleHint::default().with_number_format(NumberFormat::thousands()),
            ),
            None => FormattedCell::text(value),
        }
    }
}

#[derive(Debug, Default)]
pub struct DateTimeFormatter;

impl ValueFormatter for DateTimeFormatter {
    fn name(&self) -> &str {
        "date-time"
    }

    fn priority(&self) -> i32 {
        80
    }

    fn matches(&self, declared: &DeclaredType) -> bool {
        declared.kind == ValueKind::DateTime
    }

    fn format(&self, value: &FieldValue) -> FormattedCell {
        match value {
            FieldValue::DateTime(dt) => FormattedCell::new(
                DisplayValue::DateTime(*dt),
                StyleHint::default().with_number_format(NumberFormat::custom(DATE_TIME_FORMAT)),
            ),
            other => FormattedCell::text(other),
        }
    }
}

/// Dates, shown at midnight
#[derive(Debug, Default)]
pub struct DateFormatter;

impl ValueFormatter for DateFormatter {
    fn name(&self) -> &str {
        "date"
    }

    fn priority(&self) -> i32 {
        70
    }

    fn matches(&self, declared: &DeclaredType) -> bool {
        declared.kind == ValueKind::Date
    }

    fn format(&self, value: &FieldValue) -> FormattedCell {
        match value {
            FieldValue::Date(d) => FormattedCell::new(
                DisplayValue::DateTime(d.and_time(NaiveTime::MIN)),
                StyleHint::default().with_number_format(NumberFormat::custom(DATE_FORMAT)),
            ),
            other => FormattedCell::text(other),
        }
    }
}

/// Booleans as "Yes"/"No"
#[derive(Debug, Default)]
pub struct BooleanFormatter;

impl ValueFormatter for BooleanFormatter {
    fn name(&self) -> &str {
        "boolean"
    }

    fn priority(&self) -> i32 {
        60
    }

    fn matches(&self, declared: &DeclaredType) -> bool {
        declared.kind == ValueKind::Boolean
    }

    fn format(&self, value: &FieldValue) -> FormattedCell {
        match value {
            FieldValue::Bool(b) => FormattedCell::new(
                DisplayValue::Text(if *b { "Yes" } else { "No" }.to_string()),
                StyleHint::default(),
            ),
            other => FormattedCell::text(other),
        }
    }
}

/// Anything: the value's string form
#[derive(Debug, Default)]
pub struct FallbackFormatter;

impl ValueFormatter for FallbackFormatter {
    fn name(&self) -> &str {
        "fallback"
    }

    fn priority(&self) -> i32 {
        i32::MIN
    }

    fn matches(&self, _declared: &DeclaredType) -> bool {
        true
    }

    fn format(&self, value: &FieldValue) -> FormattedCell {
        FormattedCell::text(value)
    }
}

static FALLBACK: FallbackFormatter = FallbackFormatter;

/// Format one value with an already resolved formatter
pub fn format_with(formatter: &dyn ValueFormatter, value: &FieldValue) -> FormattedCell {
    if value.is_null() {
        return FormattedCell::empty();
    }
    formatter.format(value)
}

/// Priority-ordered formatters
pub struct FormatterRegistry {
    formatters: Vec<Box<dyn ValueFormatter>>,
}

impl FormatterRegistry {
    /// Decimal, integer, date-time, date, boolean and fallback formatters
    pub fn standard() -> Self {
        let formatters: Vec<Box<dyn ValueFormatter>> = vec![
            Box::new(DecimalFormatter),
            Box::new(IntegerFormatter),
            Box::new(DateTimeFormatter),
            Box::new(DateFormatter),
            Box::new(BooleanFormatter),
            Box::new(FallbackFormatter),
        ];
        Self { formatters }
    }

    /// Add a formatter; among equal priorities, earlier registrations win
    pub fn with_formatter(mut self, formatter: Box<dyn ValueFormatter>) -> Self {
        self.formatters.push(formatter);
        self.formatters
            .sort_by_key(|f| std::cmp::Reverse(f.priority()));
        self
    }

    /// Highest-priority formatter matching the declared type
    pub fn resolve(&self, declared: &DeclaredType) -> &dyn ValueFormatter {
        self.formatters
            .iter()
            .find(|f| f.matches(declared))
            .map_or(&FALLBACK as &dyn ValueFormatter, |f| f.as_ref())
    }

    /// Format a value of a declared type
    pub fn format_cell(&self, value: &FieldValue, declared: &DeclaredType) -> FormattedCell {
        format_with(self.resolve(declared), value)
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.formatters.iter().map(|fmt| (fmt.name(), fmt.priority())))
            .finish()
    }
}
