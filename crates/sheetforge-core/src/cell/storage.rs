//! Sparse cell storage

use std::collections::BTreeMap;

use super::CellValue;
use crate::style::StylePool;

/// A stored cell: value plus an index into the sheet's [`StylePool`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellData {
    pub value: CellValue,
    /// Index 0 is the default style
    pub style_index: u32,
}

impl CellData {
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style_index: 0,
        }
    }

    /// No value and default style
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.style_index == 0
    }
}

/// Row-major sparse storage
///
/// Structure: `BTreeMap<row, BTreeMap<col, CellData>>`, so iteration is
/// always in sheet order and serialization needs no sorting.
#[derive(Debug)]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,
    style_pool: StylePool,
    default_column_width: f64,
    column_widths: BTreeMap<u16, f64>,
}

impl CellStorage {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            style_pool: StylePool::new(),
            default_column_width: 8.43,
            column_widths: BTreeMap::new(),
        }
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Set the value, keeping any style already on the cell
    pub fn set_value(&mut self, row: u32, col: u16, value: CellValue) {
        let cell = self.rows.entry(row).or_default().entry(col).or_default();
        cell.value = value;
        if cell.is_empty() {
            self.remove(row, col);
        }
    }

    /// Set the style index, keeping any value already in the cell
    pub fn set_style(&mut self, row: u32, col: u16, style_index: u32) {
        let cell = self.rows.entry(row).or_default().entry(col).or_default();
        cell.style_index = style_index;
        if cell.is_empty() {
            self.remove(row, col);
        }
    }

    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellData> {
        let row_map = self.rows.get_mut(&row)?;
        let removed = row_map.remove(&col);
        if row_map.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(min_row, min_col, max_row, max_col)` of stored cells
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;
        let min_col = self.rows.values().filter_map(|r| r.keys().next()).min()?;
        let max_col = self.rows.values().filter_map(|r| r.keys().next_back()).max()?;
        Some((min_row, *min_col, max_row, *max_col))
    }

    /// All cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    pub fn style_pool(&self) -> &StylePool {
        &self.style_pool
    }

    pub fn style_pool_mut(&mut self) -> &mut StylePool {
        &mut self.style_pool
    }

    pub fn default_column_width(&self) -> f64 {
        self.default_column_width
    }

    /// Width of a column in characters, falling back to the default
    pub fn column_width(&self, col: u16) -> f64 {
        self.column_widths
            .get(&col)
            .copied()
            .unwrap_or(self.default_column_width)
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    /// Columns with an explicit width
    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }
}

impl Default for CellStorage {
    fn default() -> Self {
        Self::new()
    }
}
