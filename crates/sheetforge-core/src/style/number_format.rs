//! Number format types

/// Display format of a cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    /// General format
    #[default]
    General,
    /// Built-in format by ID
    BuiltIn(u32),
    /// Custom format code
    Custom(String),
}

impl NumberFormat {
    /// 3 - #,##0
    pub const ID_NUMBER_SEP: u32 = 3;
    /// 4 - #,##0.00
    pub const ID_NUMBER_SEP_DEC2: u32 = 4;

    /// Custom format code
    pub fn custom<S: Into<String>>(code: S) -> Self {
        NumberFormat::Custom(code.into())
    }

    /// `#,##0`
    pub fn thousands() -> Self {
        NumberFormat::BuiltIn(Self::ID_NUMBER_SEP)
    }

    /// `#,##0.00`
    pub fn thousands_decimal() -> Self {
        NumberFormat::BuiltIn(Self::ID_NUMBER_SEP_DEC2)
    }

    /// XLSX `numFmtId` of a built-in format, `None` for custom codes
    pub fn builtin_id(&self) -> Option<u32> {
        match self {
            NumberFormat::General => Some(0),
            NumberFormat::BuiltIn(id) => Some(*id),
            NumberFormat::Custom(_) => None,
        }
    }

    /// Format code, where known
    pub fn code(&self) -> Option<&str> {
        match self {
            NumberFormat::General => Some("General"),
            NumberFormat::BuiltIn(Self::ID_NUMBER_SEP) => Some("#,##0"),
            NumberFormat::BuiltIn(Self::ID_NUMBER_SEP_DEC2) => Some("#,##0.00"),
            NumberFormat::BuiltIn(_) => None,
            NumberFormat::Custom(code) => Some(code),
        }
    }

    /// Decimal places of a thousands-separated format (`#,##0`, `#,##0.00`, ...)
    pub fn decimal_places(&self) -> Option<usize> {
        let code = self.code()?;
        let rest = code.strip_prefix("#,##0")?;
        match rest.strip_prefix('.') {
            None if rest.is_empty() => Some(0),
            Some(zeros) if !zeros.is_empty() && zeros.bytes().all(|b| b == b'0') => {
                Some(zeros.len())
            }
            _ => None,
        }
    }
}
