//! Prelude module - common imports for sheetforge users
//!
//! ```rust
//! use sheetforge::prelude::*;
//! ```

pub use crate::{
    // Engine
    AggregateKind,
    AggregateKinds,
    // Sheet model
    CellRange,
    CellValue,
    Color,
    Engine,
    // Error types
    Error,
    FieldValue,
    FormattingRule,
    GeneratorConfig,
    NumberFormat,
    Record,
    Result,
    RuleKind,
    Schema,
    Style,
    Workbook,
    // Extension traits
    WorkbookExt,
    Worksheet,
};
