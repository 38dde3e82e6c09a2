//! Defined names
//!
//! A defined name points at a block of cells, e.g. `'Sales'!$A$1:$D$10`.
//! Names are workbook-scoped, case-insensitive and unique.

use std::collections::BTreeMap;

/// A defined name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRange {
    pub name: String,
    /// Reference the name resolves to, without a leading `=`
    pub refers_to: String,
}

impl NamedRange {
    pub fn new(name: impl Into<String>, refers_to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            refers_to: refers_to.into(),
        }
    }
}

/// Defined names of a workbook, ordered by lowercase name
#[derive(Debug, Default, Clone)]
pub struct NamedRangeCollection {
    ranges: BTreeMap<String, NamedRange>,
}

impl NamedRangeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name; fails when the name already exists
    pub fn define(&mut self, range: NamedRange) -> Result<(), String> {
        let key = range.name.to_lowercase();
        if self.ranges.contains_key(&key) {
            return Err(format!("Named range '{}' already exists", range.name));
        }
        self.ranges.insert(key, range);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&NamedRange> {
        self.ranges.get(&name.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedRange> {
        self.ranges.values()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
