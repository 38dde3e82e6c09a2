//! Numeric column statistics
//!
//! Every numeric representation is widened to `f64` when the column is
//! built, so one code path serves all seven kinds. Fixed-point columns also
//! keep their exact values, and their sum and average are computed in
//! `Decimal`. Decimal-family results are truncated toward zero to three
//! decimal places after the arithmetic; integer results pass through
//! unchanged.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::value::{FieldValue, NumericKind};

const RESULT_SCALE: u32 = 3;

/// One column's values, widened, nulls kept in place
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    kind: NumericKind,
    values: Vec<Option<f64>>,
    /// Unwidened values of a fixed-point column
    exact: Option<Vec<Option<Decimal>>>,
}

impl NumericColumn {
    pub fn new(kind: NumericKind, values: Vec<Option<f64>>) -> Self {
        Self {
            kind,
            values,
            exact: None,
        }
    }

    /// Widen field values; anything non-numeric counts as null
    ///
    /// A [`NumericKind::Decimal`] column keeps the `Decimal` values as well.
    pub fn from_values<I>(kind: NumericKind, values: I) -> Self
    where
        I: IntoIterator<Item = FieldValue>,
    {
        let values: Vec<FieldValue> = values.into_iter().collect();
        let exact = (kind == NumericKind::Decimal).then(|| {
            values
                .iter()
                .map(|v| match v {
                    FieldValue::Decimal(d) => Some(*d),
                    _ => None,
                })
                .collect()
        });
        Self {
            kind,
            values: values.iter().map(FieldValue::as_f64).collect(),
            exact,
        }
    }

    pub fn kind(&self) -> NumericKind {
        self.kind
    }

    /// Total, nulls count as zero
    pub fn sum(&self) -> f64 {
        match self.exact_sum().and_then(settle) {
            Some(total) => total,
            None => self.refine(self.raw_sum()),
        }
    }

    /// Sum divided by the number of records, nulls included
    pub fn average(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let exact = self
            .exact_sum()
            .and_then(|total| total.checked_div(Decimal::from(self.values.len())))
            .and_then(settle);
        match exact {
            Some(average) => average,
            None => self.refine(self.raw_sum() / self.values.len() as f64),
        }
    }

    /// Smallest non-null value, 0 when there is none
    pub fn min(&self) -> f64 {
        self.refine(self.non_null().reduce(f64::min).unwrap_or(0.0))
    }

    /// Largest non-null value, 0 when there is none
    pub fn max(&self) -> f64 {
        self.refine(self.non_null().reduce(f64::max).unwrap_or(0.0))
    }

    /// Number of records, nulls included
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// `None` for widened columns and on overflow
    fn exact_sum(&self) -> Option<Decimal> {
        self.exact
            .as_ref()?
            .iter()
            .flatten()
            .try_fold(Decimal::ZERO, |acc, d| acc.checked_add(*d))
    }

    fn raw_sum(&self) -> f64 {
        self.non_null().sum()
    }

    fn non_null(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().copied()
    }

    fn refine(&self, value: f64) -> f64 {
        if self.kind.is_integer() {
            return value;
        }
        truncate(value)
    }
}

fn settle(value: Decimal) -> Option<f64> {
    value
        .round_dp_with_strategy(RESULT_SCALE, RoundingStrategy::ToZero)
        .to_f64()
}

/// Truncate toward zero to three decimal places
///
/// The value is read through its shortest decimal form, so `1229.56` stays
/// `1229.56` instead of truncating its binary expansion to `1229.559`.
/// Values outside the fixed-point range are returned unchanged.
pub(crate) fn truncate(value: f64) -> f64 {
    value
        .to_string()
        .parse::<Decimal>()
        .ok()
        .map(|d| d.round_dp_with_strategy(RESULT_SCALE, RoundingStrategy::ToZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
