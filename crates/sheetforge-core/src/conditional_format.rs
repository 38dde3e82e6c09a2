//! Conditional formatting
//!
//! Range-level rules that style cells by their values. Rules carry their own
//! differential style (`format`) for the highlight kinds; color scales and
//! data bars describe their colors inline.
//!
//! ## Example
//!
//! ```rust
//! use sheetforge_core::{CellRange, Color, ConditionalFormatRule, Style, Worksheet};
//!
//! let mut sheet = Worksheet::new("Data");
//! let rule = ConditionalFormatRule::cell_is_less_than("0")
//!     .with_range(CellRange::parse("B2:B10").unwrap())
//!     .with_format(Style::new().fill_color(Color::LIGHT_CORAL));
//! sheet.add_conditional_format(rule);
//! ```

use crate::cell::CellRange;
use crate::style::{Color, Style};

/// A conditional formatting rule
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalFormatRule {
    pub rule_type: CfRuleType,
    /// Ranges the rule applies to
    pub ranges: Vec<CellRange>,
    /// Lower value wins when rules overlap
    pub priority: u32,
    /// Differential style applied on match
    pub format: Option<Style>,
}

impl ConditionalFormatRule {
    pub fn new(rule_type: CfRuleType) -> Self {
        Self {
            rule_type,
            ranges: Vec::new(),
            priority: 1,
            format: None,
        }
    }

    /// Cells comparing true against `value` with `operator`
    pub fn cell_is(operator: CfOperator, value: impl Into<String>) -> Self {
        Self::new(CfRuleType::CellIs {
            operator,
            formula: value.into(),
        })
    }

    pub fn cell_is_less_than(value: impl Into<String>) -> Self {
        Self::cell_is(CfOperator::LessThan, value)
    }

    pub fn cell_is_greater_than(value: impl Into<String>) -> Self {
        Self::cell_is(CfOperator::GreaterThan, value)
    }

    /// Two-stop gradient from the range minimum to its maximum
    pub fn color_scale_2(min_color: Color, max_color: Color) -> Self {
        Self::new(CfRuleType::ColorScale {
            colors: vec![
                CfColorValue::new(CfValue::min(), min_color),
                CfColorValue::new(CfValue::max(), max_color),
            ],
        })
    }

    /// In-cell bars scaled between the range minimum and maximum
    pub fn data_bar(color: Color) -> Self {
        Self::new(CfRuleType::DataBar {
            min_value: CfValue::min(),
            max_value: CfValue::max(),
            color,
        })
    }

    /// The `n` largest values
    pub fn top_n(n: u32) -> Self {
        Self::new(CfRuleType::Top10 {
            rank: n,
            percent: false,
            bottom: false,
        })
    }

    /// Values that occur more than once in the range
    pub fn duplicate_values() -> Self {
        Self::new(CfRuleType::DuplicateValues)
    }

    pub fn with_range(mut self, range: CellRange) -> Self {
        self.ranges.push(range);
        self
    }

    pub fn with_format(mut self, style: Style) -> Self {
        self.format = Some(style);
        self
    }

    /// Space-separated `sqref` of all ranges
    pub fn sqref(&self) -> String {
        self.ranges
            .iter()
            .map(CellRange::to_a1_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Rule kinds
#[derive(Debug, Clone, PartialEq)]
pub enum CfRuleType {
    /// Comparison against a constant or formula
    CellIs { operator: CfOperator, formula: String },
    /// Gradient between two or three stops
    ColorScale { colors: Vec<CfColorValue> },
    /// In-cell bar
    DataBar {
        min_value: CfValue,
        max_value: CfValue,
        color: Color,
    },
    /// Top/bottom N (or N percent)
    Top10 { rank: u32, percent: bool, bottom: bool },
    /// Values occurring more than once
    DuplicateValues,
}

impl CfRuleType {
    /// XLSX `type` attribute
    pub fn xlsx_type(&self) -> &'static str {
        match self {
            CfRuleType::CellIs { .. } => "cellIs",
            CfRuleType::ColorScale { .. } => "colorScale",
            CfRuleType::DataBar { .. } => "dataBar",
            CfRuleType::Top10 { .. } => "top10",
            CfRuleType::DuplicateValues => "duplicateValues",
        }
    }

    /// Whether the kind is styled through a differential format
    pub fn uses_dxf(&self) -> bool {
        matches!(
            self,
            CfRuleType::CellIs { .. } | CfRuleType::Top10 { .. } | CfRuleType::DuplicateValues
        )
    }
}

/// Comparison operators for [`CfRuleType::CellIs`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfOperator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl CfOperator {
    /// XLSX `operator` attribute
    pub fn xlsx_operator(&self) -> &'static str {
        match self {
            CfOperator::Equal => "equal",
            CfOperator::NotEqual => "notEqual",
            CfOperator::GreaterThan => "greaterThan",
            CfOperator::LessThan => "lessThan",
            CfOperator::GreaterThanOrEqual => "greaterThanOrEqual",
            CfOperator::LessThanOrEqual => "lessThanOrEqual",
        }
    }
}

/// Threshold of a color scale stop or data bar end
#[derive(Debug, Clone, PartialEq)]
pub struct CfValue {
    pub value_type: CfValueType,
    pub value: Option<String>,
}

impl CfValue {
    pub fn new(value_type: CfValueType, value: Option<String>) -> Self {
        Self { value_type, value }
    }

    pub fn min() -> Self {
        Self::new(CfValueType::Min, None)
    }

    pub fn max() -> Self {
        Self::new(CfValueType::Max, None)
    }
}

/// A color scale stop
#[derive(Debug, Clone, PartialEq)]
pub struct CfColorValue {
    pub threshold: CfValue,
    pub color: Color,
}

impl CfColorValue {
    pub fn new(threshold: CfValue, color: Color) -> Self {
        Self { threshold, color }
    }
}

/// How a threshold value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CfValueType {
    #[default]
    Min,
    Max,
    Num,
    Percent,
    Percentile,
}

impl CfValueType {
    /// XLSX `cfvo type` attribute
    pub fn xlsx_type(&self) -> &'static str {
        match self {
            CfValueType::Min => "min",
            CfValueType::Max => "max",
            CfValueType::Num => "num",
            CfValueType::Percent => "percent",
            CfValueType::Percentile => "percentile",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_is_rule() {
        let rule = ConditionalFormatRule::cell_is_less_than("0")
            .with_range(CellRange::parse("B2:B4").unwrap())
            .with_format(Style::new().fill_color(Color::LIGHT_CORAL));

        match &rule.rule_type {
            CfRuleType::CellIs { operator, formula } => {
                assert_eq!(*operator, CfOperator::LessThan);
                assert_eq!(formula, "0");
            }
            other => panic!("unexpected rule type {other:?}"),
        }
        assert!(rule.rule_type.uses_dxf());
        assert_eq!(rule.sqref(), "B2:B4");
    }

    #[test]
    fn test_color_scale_stops() {
        let rule = ConditionalFormatRule::color_scale_2(Color::RED, Color::GREEN);
        match &rule.rule_type {
            CfRuleType::ColorScale { colors } => {
                assert_eq!(colors.len(), 2);
                assert_eq!(colors[0].threshold.value_type, CfValueType::Min);
                assert_eq!(colors[1].color, Color::GREEN);
            }
            other => panic!("unexpected rule type {other:?}"),
        }
        assert!(!rule.rule_type.uses_dxf());
    }

    #[test]
    fn test_sqref_joins_ranges() {
        let rule = ConditionalFormatRule::top_n(3)
            .with_range(CellRange::parse("A2:A5").unwrap())
            .with_range(CellRange::parse("C2:C5").unwrap());
        assert_eq!(rule.sqref(), "A2:A5 C2:C5");
        assert_eq!(rule.rule_type.xlsx_type(), "top10");
    }
}
