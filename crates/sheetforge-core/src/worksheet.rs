//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellData, CellRange, CellStorage, CellValue};
use crate::conditional_format::ConditionalFormatRule;
use crate::error::{Error, Result};
use crate::style::Style;
use crate::{MAX_COLS, MAX_ROWS};

/// Excel's maximum column width, in characters
const MAX_COLUMN_WIDTH: f64 = 255.0;

/// Extra characters added to the longest value when autosizing
const AUTOFIT_PADDING: f64 = 2.0;

/// A worksheet (single sheet in a workbook)
#[derive(Debug)]
pub struct Worksheet {
    name: String,
    cells: CellStorage,
    freeze_panes: Option<FreezePanes>,
    conditional_formats: Vec<ConditionalFormatRule>,
}

impl Worksheet {
    /// Create an empty worksheet
    ///
    /// The name is not validated here; [`crate::Workbook`] checks it when the
    /// sheet is added.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
            freeze_panes: None,
            conditional_formats: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell access ===

    /// Value by A1 address
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Value at a position, [`CellValue::Empty`] when nothing is stored
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    pub fn style_by_index(&self, style_index: u32) -> Option<&Style> {
        self.cells.style_pool().get(style_index)
    }

    /// Style of a cell, `None` when the cell is absent
    pub fn cell_style_at(&self, row: u32, col: u16) -> Option<&Style> {
        self.cells
            .get(row, col)
            .and_then(|c| self.style_by_index(c.style_index))
    }

    /// Set a value by A1 address
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        self.validate_cell_position(row, col)?;
        let style_index = self.cells.style_pool_mut().get_or_insert(style.clone());
        self.cells.set_style(row, col, style_index);
        Ok(())
    }

    /// Bounds of all stored cells
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(min_row, min_col, max_row, max_col)| {
                CellRange::from_indices(min_row, min_col, max_row, max_col)
            })
    }

    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All stored cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter()
    }

    /// The sheet's deduplicated styles, index 0 first
    pub fn styles(&self) -> impl Iterator<Item = (u32, &Style)> {
        self.cells.style_pool().iter()
    }

    // === Columns ===

    pub fn column_width(&self, col: u16) -> f64 {
        self.cells.column_width(col)
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.cells
            .set_column_width(col, width.clamp(0.0, MAX_COLUMN_WIDTH));
    }

    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        self.cells.custom_column_widths()
    }

    /// Size every used column to its longest rendered value
    ///
    /// Text is measured in characters as shown under each cell's number
    /// format. Columns never shrink below the default width.
    pub fn autofit_columns(&mut self) {
        let mut longest: BTreeMap<u16, usize> = BTreeMap::new();
        for (_, col, cell) in self.cells.iter() {
            let format = self
                .cells
                .style_pool()
                .get(cell.style_index)
                .map(|s| &s.number_format);
            let text = match format {
                Some(format) => cell.value.rendered_text(format),
                None => cell.value.to_string(),
            };
            let len = text.chars().count();
            let entry = longest.entry(col).or_insert(0);
            *entry = (*entry).max(len);
        }

        let default_width = self.cells.default_column_width();
        for (col, len) in longest {
            let width = (len as f64 + AUTOFIT_PADDING).max(default_width);
            self.set_column_width(col, width);
        }
    }

    // === Freeze panes ===

    pub fn freeze_panes(&self) -> Option<&FreezePanes> {
        self.freeze_panes.as_ref()
    }

    /// Freeze the top `row` rows and left `col` columns; `(0, 0)` unfreezes
    pub fn set_freeze_panes(&mut self, row: u32, col: u16) {
        if row == 0 && col == 0 {
            self.freeze_panes = None;
        } else {
            self.freeze_panes = Some(FreezePanes { row, col });
        }
    }

    // === Conditional formatting ===

    /// Add a rule; it is ranked after every rule already on the sheet
    pub fn add_conditional_format(&mut self, mut rule: ConditionalFormatRule) {
        let next = self
            .conditional_formats
            .iter()
            .map(|r| r.priority)
            .max()
            .map_or(1, |p| p + 1);
        rule.priority = rule.priority.max(next);
        self.conditional_formats.push(rule);
    }

    pub fn conditional_formats(&self) -> &[ConditionalFormatRule] {
        &self.conditional_formats
    }

    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        Ok(())
    }
}

/// Frozen pane split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreezePanes {
    /// Frozen rows (first unfrozen row, 0-based)
    pub row: u32,
    /// Frozen columns (first unfrozen column, 0-based)
    pub col: u16,
}

impl FreezePanes {
    /// A1 reference of the top-left unfrozen cell
    pub fn top_left_cell(&self) -> String {
        CellAddress::new(self.row, self.col).to_a1_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, NumberFormat};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_values_and_styles() {
        let mut ws = Worksheet::new("Data");
        ws.set_cell_value("B3", 4.5).unwrap();
        ws.set_cell_style_at(2, 1, &Style::new().bold(true)).unwrap();

        assert_eq!(ws.get_value_at(2, 1), CellValue::Number(4.5));
        assert_eq!(ws.get_value("A1").unwrap(), CellValue::Empty);
        assert!(ws.cell_style_at(2, 1).unwrap().font.bold);
        assert!(ws.cell_style_at(0, 0).is_none());
        assert_eq!(ws.used_range().unwrap().to_a1_string(), "B3");
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut ws = Worksheet::new("Data");
        assert!(matches!(
            ws.set_cell_value_at(MAX_ROWS, 0, 1.0),
            Err(Error::RowOutOfBounds(..))
        ));
        assert!(matches!(
            ws.set_cell_value_at(0, MAX_COLS, 1.0),
            Err(Error::ColumnOutOfBounds(..))
        ));
    }

    #[test]
    fn test_autofit_uses_rendered_text() {
        let mut ws = Worksheet::new("Data");
        ws.set_cell_value_at(0, 0, "Id").unwrap();
        ws.set_cell_value_at(0, 1, "Price").unwrap();
        ws.set_cell_value_at(1, 1, 1234567.891).unwrap();
        ws.set_cell_style_at(1, 1, &Style::new().number_format(NumberFormat::thousands_decimal()))
            .unwrap();
        ws.autofit_columns();

        // "Id" is shorter than the default width
        assert_eq!(ws.column_width(0), 8.43);
        // "1,234,567.89" is 12 characters
        assert_eq!(ws.column_width(1), 14.0);
    }

    #[test]
    fn test_autofit_clamps_to_max() {
        let mut ws = Worksheet::new("Data");
        ws.set_cell_value_at(0, 0, "x".repeat(400)).unwrap();
        ws.autofit_columns();
        assert_eq!(ws.column_width(0), MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_freeze_panes() {
        let mut ws = Worksheet::new("Data");
        ws.set_freeze_panes(1, 2);
        assert_eq!(ws.freeze_panes().unwrap().top_left_cell(), "C2");
        ws.set_freeze_panes(0, 0);
        assert!(ws.freeze_panes().is_none());
    }

    #[test]
    fn test_conditional_format_priorities() {
        let mut ws = Worksheet::new("Data");
        let range = CellRange::parse("A2:A4").unwrap();
        ws.add_conditional_format(
            ConditionalFormatRule::cell_is_less_than("0")
                .with_range(range)
                .with_format(Style::new().fill_color(Color::LIGHT_CORAL)),
        );
        ws.add_conditional_format(ConditionalFormatRule::data_bar(Color::BLUE).with_range(range));

        let priorities: Vec<_> = ws.conditional_formats().iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![1, 2]);
    }
}
