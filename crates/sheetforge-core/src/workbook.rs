//! Workbook type - the main document structure

use crate::error::{Error, Result};
use crate::named_range::{NamedRange, NamedRangeCollection};
use crate::worksheet::Worksheet;
use crate::{INVALID_SHEET_NAME_CHARS, MAX_SHEET_NAME_LEN};

/// A workbook: ordered worksheets plus defined names
#[derive(Debug, Default)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
    named_ranges: NamedRangeCollection,
}

impl Workbook {
    /// Create a workbook with no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Worksheet by name, case-insensitive
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.sheet_index(name).and_then(|i| self.worksheets.get(i))
    }

    /// Index of a worksheet by name, case-insensitive
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        let lower = name.to_lowercase();
        self.worksheets
            .iter()
            .position(|ws| ws.name().to_lowercase() == lower)
    }

    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add an empty worksheet
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.add_existing_worksheet(Worksheet::new(name))
    }

    /// Add a populated worksheet, validating its name
    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        self.check_new_sheet_name(worksheet.name())?;
        let index = self.worksheets.len();
        self.worksheets.push(worksheet);
        Ok(index)
    }

    /// Define a name, e.g. `define_name("Rates", "'Data'!$B$2:$B$9")`
    pub fn define_name(&mut self, name: &str, refers_to: &str) -> Result<()> {
        if !is_valid_defined_name(name) {
            return Err(Error::InvalidName(format!(
                "'{}' is not a valid defined name",
                name
            )));
        }
        self.named_ranges
            .define(NamedRange::new(name, refers_to))
            .map_err(Error::InvalidName)
    }

    /// Case-insensitive lookup
    pub fn get_named_range(&self, name: &str) -> Option<&NamedRange> {
        self.named_ranges.get(name)
    }

    pub fn named_ranges(&self) -> &NamedRangeCollection {
        &self.named_ranges
    }

    fn check_new_sheet_name(&self, name: &str) -> Result<()> {
        validate_sheet_name(name)?;
        if self.sheet_index(name).is_some() {
            return Err(Error::DuplicateSheetName(name.into()));
        }
        Ok(())
    }
}

/// Check a sheet name against Excel's rules
///
/// Rejects empty or whitespace-only names, names over
/// [`MAX_SHEET_NAME_LEN`] characters and names containing any of
/// [`INVALID_SHEET_NAME_CHARS`]. Uniqueness is checked by the workbook.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::EmptySheetName);
    }
    let len = name.chars().count();
    if len > MAX_SHEET_NAME_LEN {
        return Err(Error::SheetNameTooLong {
            name: name.into(),
            len,
            max: MAX_SHEET_NAME_LEN,
        });
    }
    if let Some(ch) = name.chars().find(|c| INVALID_SHEET_NAME_CHARS.contains(c)) {
        return Err(Error::SheetNameInvalidChar {
            name: name.into(),
            ch,
        });
    }
    Ok(())
}

/// Letters, digits, `_` and `.`, starting with a letter or `_`
fn is_valid_defined_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '.')
        }
        _ => false,
    }
}
