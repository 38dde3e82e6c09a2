//! Field values and declared types
//!
//! A record field is read into a [`FieldValue`]; its static type is
//! described by a [`DeclaredType`], computed once from the Rust type through
//! [`FieldType`]. Formatter dispatch and numeric classification look only at
//! the declared type, never at individual cell values.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// The seven numeric representations a column can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    /// Fixed-point decimal
    Decimal,
    F64,
    F32,
    I64,
    I32,
    I16,
    I8,
}

/// Display and precision family of a [`NumericKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericFamily {
    /// Fixed-point and floating point: 2-decimal display, truncated aggregates
    Decimal,
    /// Signed integers: 0-decimal display, exact aggregates
    Integer,
}

impl NumericKind {
    pub fn family(self) -> NumericFamily {
        match self {
            NumericKind::Decimal | NumericKind::F64 | NumericKind::F32 => NumericFamily::Decimal,
            NumericKind::I64 | NumericKind::I32 | NumericKind::I16 | NumericKind::I8 => {
                NumericFamily::Integer
            }
        }
    }

    pub fn is_integer(self) -> bool {
        self.family() == NumericFamily::Integer
    }
}

/// Canonical type tag of a field, with nullable wrappers removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Numeric(NumericKind),
    /// Calendar date with time of day
    DateTime,
    /// Calendar date only
    Date,
    Boolean,
    /// Anything else; shown through its string form
    Other,
}

impl ValueKind {
    pub fn numeric(self) -> Option<NumericKind> {
        match self {
            ValueKind::Numeric(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Static type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclaredType {
    pub kind: ValueKind,
    /// The field is an `Option<_>`
    pub nullable: bool,
}

impl DeclaredType {
    pub fn of<T: FieldType>() -> Self {
        Self {
            kind: T::KIND,
            nullable: T::NULLABLE,
        }
    }
}

/// A field value read from a record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Decimal(Decimal),
    F64(f64),
    F32(f32),
    I64(i64),
    I32(i32),
    I16(i16),
    I8(i8),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Bool(bool),
    Text(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Widen any numeric representation to `f64`
    ///
    /// `f32` goes through its shortest decimal form so `0.1f32` widens to
    /// `0.1` rather than `0.10000000149011612`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            FieldValue::Decimal(d) => d.to_f64(),
            FieldValue::F64(n) => Some(n),
            FieldValue::F32(n) => Some(n.to_string().parse().unwrap_or(f64::from(n))),
            FieldValue::I64(n) => Some(n as f64),
            FieldValue::I32(n) => Some(f64::from(n)),
            FieldValue::I16(n) => Some(f64::from(n)),
            FieldValue::I8(n) => Some(f64::from(n)),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Decimal(d) => write!(f, "{}", d),
            FieldValue::F64(n) => write!(f, "{}", n),
            FieldValue::F32(n) => write!(f, "{}", n),
            FieldValue::I64(n) => write!(f, "{}", n),
            FieldValue::I32(n) => write!(f, "{}", n),
            FieldValue::I16(n) => write!(f, "{}", n),
            FieldValue::I8(n) => write!(f, "{}", n),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// A Rust type usable as a record field
pub trait FieldType {
    const KIND: ValueKind;
    const NULLABLE: bool = false;

    fn to_field_value(&self) -> FieldValue;
}

macro_rules! impl_field_type {
    ($($ty:ty => $kind:expr, $variant:ident;)*) => {
        $(
            impl FieldType for $ty {
                const KIND: ValueKind = $kind;

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::$variant(self.clone())
                }
            }
        )*
    };
}

impl_field_type! {
    Decimal => ValueKind::Numeric(NumericKind::Decimal), Decimal;
    f64 => ValueKind::Numeric(NumericKind::F64), F64;
    f32 => ValueKind::Numeric(NumericKind::F32), F32;
    i64 => ValueKind::Numeric(NumericKind::I64), I64;
    i32 => ValueKind::Numeric(NumericKind::I32), I32;
    i16 => ValueKind::Numeric(NumericKind::I16), I16;
    i8 => ValueKind::Numeric(NumericKind::I8), I8;
    NaiveDateTime => ValueKind::DateTime, DateTime;
    NaiveDate => ValueKind::Date, Date;
    bool => ValueKind::Boolean, Bool;
    String => ValueKind::Other, Text;
}

// Types outside the seven numeric representations render as text
macro_rules! impl_text_field_type {
    ($($ty:ty),*) => {
        $(
            impl FieldType for $ty {
                const KIND: ValueKind = ValueKind::Other;

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Text(self.to_string())
                }
            }
        )*
    };
}

impl_text_field_type!(&'static str, char, u8, u16, u32, u64, u128, usize, i128, isize);

impl<T: FieldType> FieldType for Option<T> {
    const KIND: ValueKind = T::KIND;
    const NULLABLE: bool = true;

    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(value) => value.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_declared_types() {
        assert_eq!(
            DeclaredType::of::<Option<i16>>(),
            DeclaredType {
                kind: ValueKind::Numeric(NumericKind::I16),
                nullable: true
            }
        );
        assert_eq!(DeclaredType::of::<Decimal>().kind.numeric(), Some(NumericKind::Decimal));
        assert_eq!(DeclaredType::of::<u32>().kind, ValueKind::Other);
        assert_eq!(DeclaredType::of::<Option<Option<bool>>>().kind, ValueKind::Boolean);
    }

    #[test]
    fn test_numeric_families() {
        for kind in [NumericKind::Decimal, NumericKind::F64, NumericKind::F32] {
            assert_eq!(kind.family(), NumericFamily::Decimal);
        }
        for kind in [NumericKind::I64, NumericKind::I32, NumericKind::I16, NumericKind::I8] {
            assert!(kind.is_integer());
        }
    }

    #[test]
    fn test_widening() {
        assert_eq!(FieldValue::F32(0.1).as_f64(), Some(0.1));
        assert_eq!(FieldValue::I8(-7).as_f64(), Some(-7.0));
        assert_eq!(
            FieldValue::Decimal(Decimal::from_str("12.345").unwrap()).as_f64(),
            Some(12.345)
        );
        assert_eq!(FieldValue::Text("1".into()).as_f64(), None);
        assert_eq!(FieldValue::Null.as_f64(), None);
    }

    #[test]
    fn test_option_values() {
        assert_eq!(Some(3_i32).to_field_value(), FieldValue::I32(3));
        assert_eq!(None::<i32>.to_field_value(), FieldValue::Null);
        assert_eq!(42_u64.to_field_value(), FieldValue::Text("42".into()));
    }
}
