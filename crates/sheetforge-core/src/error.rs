//! Error types for sheetforge-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the sheet object model
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid A1-style cell address
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u16, u16),

    /// Empty or whitespace-only sheet name
    #[error("Sheet name cannot be empty or whitespace")]
    EmptySheetName,

    /// Sheet name longer than Excel allows
    #[error("Sheet name '{name}' is {len} characters long, the limit is {max}")]
    SheetNameTooLong {
        name: String,
        len: usize,
        max: usize,
    },

    /// Sheet name containing a character Excel rejects
    #[error("Sheet name '{name}' contains invalid character '{ch}'")]
    SheetNameInvalidChar { name: String, ch: char },

    /// Duplicate sheet name (case-insensitive)
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Invalid or duplicate defined name
    #[error("Invalid named range: {0}")]
    InvalidName(String),
}
