//! Property tests for labels and aggregates

use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sheetforge::{format_label, FieldValue, NumericColumn, NumericKind};

proptest! {
    #[test]
    fn label_only_inserts_spaces(name in "[A-Za-z0-9_]{0,24}") {
        let label = format_label(&name);
        prop_assert_eq!(label.replace(' ', ""), name.clone());
        prop_assert!(!label.starts_with(' '));
        prop_assert_eq!(format_label(&name), label);
    }

    #[test]
    fn label_is_stable_without_lowercase_to_uppercase(name in "[A-Z0-9]{0,12}[a-z0-9]{0,12}") {
        prop_assert_eq!(format_label(&name), name);
    }

    #[test]
    fn count_includes_nulls(values in prop::collection::vec(prop::option::of(-1000i32..1000), 0..50)) {
        let column = NumericColumn::from_values(
            NumericKind::I32,
            values.iter().map(|v| v.map_or(FieldValue::Null, FieldValue::I32)),
        );
        prop_assert_eq!(column.count(), values.len());
    }

    #[test]
    fn integer_aggregates_are_exact(values in prop::collection::vec(-1000i32..1000, 1..50)) {
        let column = NumericColumn::from_values(
            NumericKind::I32,
            values.iter().copied().map(FieldValue::I32),
        );
        let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
        prop_assert_eq!(column.sum(), sum as f64);
        prop_assert_eq!(column.min(), f64::from(*values.iter().min().unwrap()));
        prop_assert_eq!(column.max(), f64::from(*values.iter().max().unwrap()));
    }

    #[test]
    fn extremes_ignore_nulls(values in prop::collection::vec(prop::option::of(-1000i16..1000), 0..50)) {
        let column = NumericColumn::from_values(
            NumericKind::I16,
            values.iter().map(|v| v.map_or(FieldValue::Null, FieldValue::I16)),
        );
        let present: Vec<i16> = values.iter().flatten().copied().collect();
        let expected_min = present.iter().min().map_or(0.0, |&v| f64::from(v));
        let expected_max = present.iter().max().map_or(0.0, |&v| f64::from(v));
        prop_assert_eq!(column.min(), expected_min);
        prop_assert_eq!(column.max(), expected_max);
        prop_assert!(column.min() <= column.max());
    }

    #[test]
    fn decimal_results_truncate_toward_zero(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..30)) {
        let column = NumericColumn::new(NumericKind::F64, values.iter().copied().map(Some).collect());
        let raw_min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let raw_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for (result, raw) in [(column.min(), raw_min), (column.max(), raw_max)] {
            prop_assert!((raw - result).abs() < 0.001 + 1e-9, "{} vs {}", result, raw);
            prop_assert!(result.abs() <= raw.abs() + 1e-9, "{} vs {}", result, raw);
        }
    }

    #[test]
    fn fixed_point_sum_matches_decimal_arithmetic(cents in prop::collection::vec(-1_000_000i64..1_000_000, 1..40)) {
        let amounts: Vec<Decimal> = cents.iter().map(|&c| Decimal::new(c, 2)).collect();
        let column = NumericColumn::from_values(
            NumericKind::Decimal,
            amounts.iter().copied().map(FieldValue::Decimal),
        );
        let total: Decimal = amounts.iter().sum();
        prop_assert_eq!(column.sum(), total.to_f64().unwrap());
    }
}
