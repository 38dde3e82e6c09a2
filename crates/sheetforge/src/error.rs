//! Error types for the sheetforge engine

use thiserror::Error;

use crate::aggregate::AggregateKind;
use crate::rules::RuleKind;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while generating or saving a sheet
///
/// Every generation error is raised before the sheet is handed back, so a
/// caller never sees a partially built sheet.
#[derive(Debug, Error)]
pub enum Error {
    /// An input failed validation
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    /// The record type has no readable fields left after extraction
    #[error("Record type '{type_name}' has no exportable fields")]
    NoExportableFields { type_name: String },

    /// No aggregation strategy is registered for the kind
    #[error("No aggregation strategy registered for {0}")]
    UnknownAggregateKind(AggregateKind),

    /// No conditional format strategy is registered for the kind
    #[error("No formatting rule strategy registered for {0}")]
    UnknownRuleKind(RuleKind),

    /// A formatting rule names a field that is not a column (strict mode only)
    #[error("Formatting rule targets unknown field '{field}'")]
    UnknownRuleField { field: String },

    /// Sheet object model error
    #[error("Sheet error: {0}")]
    Sheet(#[from] sheetforge_core::Error),

    /// XLSX serialization error
    #[error("XLSX error: {0}")]
    Xlsx(#[from] sheetforge_xlsx::XlsxError),
}

impl Error {
    pub(crate) fn invalid(argument: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}
