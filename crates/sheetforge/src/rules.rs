//! Conditional formatting rules
//!
//! A [`FormattingRule`] names a column and a [`RuleKind`]. At generation time
//! the engine resolves the column's data range and asks the matching
//! [`RuleStrategy`] for a sheet-level [`ConditionalFormatRule`].

use std::fmt;

use ahash::AHashMap;
use sheetforge_core::{CellRange, Color, ConditionalFormatRule, Style};

use crate::error::{Error, Result};

/// Default number of ranked cells for [`RuleKind::TopN`]
pub const DEFAULT_TOP_N: u32 = 10;

/// Fill of top-ranked cells
pub const TOP_N_FILL: Color = Color::rgb(255, 235, 156);

/// Fill of repeated values
pub const DUPLICATE_FILL: Color = Color::rgb(255, 199, 206);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleKind {
    /// Cells below zero
    HighlightNegative,
    /// Cells above zero
    HighlightPositive,
    /// Two-color gradient from minimum to maximum
    ColorScale,
    /// In-cell bars
    DataBars,
    /// Values that occur more than once
    HighlightDuplicates,
    /// The N largest values
    TopN,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::HighlightNegative => "HighlightNegative",
            RuleKind::HighlightPositive => "HighlightPositive",
            RuleKind::ColorScale => "ColorScale",
            RuleKind::DataBars => "DataBars",
            RuleKind::HighlightDuplicates => "HighlightDuplicates",
            RuleKind::TopN => "TopN",
        };
        f.write_str(name)
    }
}

/// Kind-specific parameters; unset values fall back to the kind's defaults
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleParams {
    pub min_color: Option<Color>,
    pub max_color: Option<Color>,
    /// Highlight fill or bar color
    pub color: Option<Color>,
    pub top_n: Option<u32>,
}

/// A conditional format targeting one column by field name
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormattingRule {
    field: String,
    kind: RuleKind,
    #[cfg_attr(feature = "serde", serde(default))]
    params: RuleParams,
}

impl FormattingRule {
    pub fn new(field: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            field: field.into(),
            kind,
            params: RuleParams::default(),
        }
    }

    pub fn highlight_negative(field: impl Into<String>) -> Self {
        Self::new(field, RuleKind::HighlightNegative)
    }

    pub fn highlight_positive(field: impl Into<String>) -> Self {
        Self::new(field, RuleKind::HighlightPositive)
    }

    /// Gradient from `min_color` to `max_color`
    pub fn color_scale(field: impl Into<String>, min_color: Color, max_color: Color) -> Self {
        let mut rule = Self::new(field, RuleKind::ColorScale);
        rule.params.min_color = Some(min_color);
        rule.params.max_color = Some(max_color);
        rule
    }

    pub fn data_bars(field: impl Into<String>) -> Self {
        Self::new(field, RuleKind::DataBars)
    }

    pub fn highlight_duplicates(field: impl Into<String>) -> Self {
        Self::new(field, RuleKind::HighlightDuplicates)
    }

    pub fn top_n(field: impl Into<String>, n: u32) -> Self {
        let mut rule = Self::new(field, RuleKind::TopN);
        rule.params.top_n = Some(n);
        rule
    }

    /// Override the highlight or bar color
    pub fn with_color(mut self, color: Color) -> Self {
        self.params.color = Some(color);
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn params(&self) -> &RuleParams {
        &self.params
    }

    /// Rejects an empty or whitespace target field
    pub fn validate(&self) -> Result<()> {
        if self.field.trim().is_empty() {
            return Err(Error::invalid(
                "rules",
                format!("{} rule has an empty target field name", self.kind),
            ));
        }
        Ok(())
    }
}

/// Translates a rule into a range-level conditional format
pub trait RuleStrategy: Send + Sync {
    fn kind(&self) -> RuleKind;

    fn apply(&self, range: CellRange, params: &RuleParams) -> ConditionalFormatRule;
}

fn highlight(color: Color) -> Style {
    Style::new().fill_color(color)
}

#[derive(Debug, Default)]
pub struct HighlightNegativeStrategy;

impl RuleStrategy for HighlightNegativeStrategy {
    fn kind(&self) -> RuleKind {
        RuleKind::HighlightNegative
    }

    fn apply(&self, range: CellRange, params: &RuleParams) -> ConditionalFormatRule {
        ConditionalFormatRule::cell_is_less_than("0")
            .with_range(range)
            .with_format(highlight(params.color.unwrap_or(Color::LIGHT_CORAL)))
    }
}

#[derive(Debug, Default)]
pub struct HighlightPositiveStrategy;

impl RuleStrategy for HighlightPositiveStrategy {
    fn kind(&self) -> RuleKind {
        RuleKind::HighlightPositive
    }

    fn apply(&self, range: CellRange, params: &RuleParams) -> ConditionalFormatRule {
        ConditionalFormatRule::cell_is_greater_than("0")
            .with_range(range)
            .with_format(highlight(params.color.unwrap_or(Color::LIGHT_GREEN)))
    }
}

#[derive(Debug, Default)]
pub struct ColorScaleStrategy;

impl RuleStrategy for ColorScaleStrategy {
    fn kind(&self) -> RuleKind {
        RuleKind::ColorScale
    }

    fn apply(&self, range: CellRange, params: &RuleParams) -> ConditionalFormatRule {
        ConditionalFormatRule::color_scale_2(
            params.min_color.unwrap_or(Color::RED),
            params.max_color.unwrap_or(Color::GREEN),
        )
        .with_range(range)
    }
}

#[derive(Debug, Default)]
pub struct DataBarsStrategy;

impl RuleStrategy for DataBarsStrategy {
    fn kind(&self) -> RuleKind {
        RuleKind::DataBars
    }

    fn apply(&self, range: CellRange, params: &RuleParams) -> ConditionalFormatRule {
        ConditionalFormatRule::data_bar(params.color.unwrap_or(Color::BLUE)).with_range(range)
    }
}

#[derive(Debug, Default)]
pub struct HighlightDuplicatesStrategy;

impl RuleStrategy for HighlightDuplicatesStrategy {
    fn kind(&self) -> RuleKind {
        RuleKind::HighlightDuplicates
    }

    fn apply(&self, range: CellRange, params: &RuleParams) -> ConditionalFormatRule {
        ConditionalFormatRule::duplicate_values()
            .with_range(range)
            .with_format(highlight(params.color.unwrap_or(DUPLICATE_FILL)))
    }
}

#[derive(Debug, Default)]
pub struct TopNStrategy;

impl RuleStrategy for TopNStrategy {
    fn kind(&self) -> RuleKind {
        RuleKind::TopN
    }

    fn apply(&self, range: CellRange, params: &RuleParams) -> ConditionalFormatRule {
        ConditionalFormatRule::top_n(params.top_n.unwrap_or(DEFAULT_TOP_N))
            .with_range(range)
            .with_format(highlight(params.color.unwrap_or(TOP_N_FILL)))
    }
}

/// Strategy factory keyed by rule kind
pub struct RuleStrategies {
    strategies: AHashMap<RuleKind, Box<dyn RuleStrategy>>,
}

impl RuleStrategies {
    /// Strategies for all six kinds
    pub fn standard() -> Self {
        Self::empty()
            .register(Box::new(HighlightNegativeStrategy))
            .register(Box::new(HighlightPositiveStrategy))
            .register(Box::new(ColorScaleStrategy))
            .register(Box::new(DataBarsStrategy))
            .register(Box::new(HighlightDuplicatesStrategy))
            .register(Box::new(TopNStrategy))
    }

    pub fn empty() -> Self {
        Self {
            strategies: AHashMap::new(),
        }
    }

    /// Register a strategy, replacing any previous one for its kind
    pub fn register(mut self, strategy: Box<dyn RuleStrategy>) -> Self {
        self.strategies.insert(strategy.kind(), strategy);
        self
    }

    pub fn resolve(&self, kind: RuleKind) -> Result<&dyn RuleStrategy> {
        self.strategies
            .get(&kind)
            .map(|s| s.as_ref())
            .ok_or(Error::UnknownRuleKind(kind))
    }
}

impl Default for RuleStrategies {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for RuleStrategies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.strategies.keys().map(|k| k.to_string()).collect();
        kinds.sort_unstable();
        f.debug_struct("RuleStrategies").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetforge_core::{CfOperator, CfRuleType};

    fn range() -> CellRange {
        CellRange::parse("C2:C4").unwrap()
    }

    fn apply(rule: &FormattingRule) -> ConditionalFormatRule {
        RuleStrategies::standard()
            .resolve(rule.kind())
            .unwrap()
            .apply(range(), rule.params())
    }

    #[test]
    fn test_highlight_negative_defaults() {
        let cf = apply(&FormattingRule::highlight_negative("Profit"));
        assert_eq!(
            cf.rule_type,
            CfRuleType::CellIs {
                operator: CfOperator::LessThan,
                formula: "0".into()
            }
        );
        assert_eq!(cf.sqref(), "C2:C4");
        assert_eq!(
            cf.format.and_then(|s| s.fill.color()),
            Some(Color::LIGHT_CORAL)
        );
    }

    #[test]
    fn test_highlight_positive_custom_color() {
        let cf = apply(&FormattingRule::highlight_positive("Profit").with_color(Color::YELLOW));
        assert!(matches!(
            cf.rule_type,
            CfRuleType::CellIs {
                operator: CfOperator::GreaterThan,
                ..
            }
        ));
        assert_eq!(cf.format.and_then(|s| s.fill.color()), Some(Color::YELLOW));
    }

    #[test]
    fn test_color_scale_and_bars() {
        let scale = apply(&FormattingRule::new("Price", RuleKind::ColorScale));
        match scale.rule_type {
            CfRuleType::ColorScale { colors } => {
                let stops: Vec<_> = colors.iter().map(|c| c.color).collect();
                assert_eq!(stops, vec![Color::RED, Color::GREEN]);
            }
            other => panic!("unexpected rule {other:?}"),
        }

        let bars = apply(&FormattingRule::data_bars("Price"));
        assert!(matches!(bars.rule_type, CfRuleType::DataBar { color, .. } if color == Color::BLUE));
        assert!(bars.format.is_none());
    }

    #[test]
    fn test_top_n_and_duplicates() {
        let top = apply(&FormattingRule::new("Qty", RuleKind::TopN));
        assert!(matches!(
            top.rule_type,
            CfRuleType::Top10 {
                rank: 10,
                percent: false,
                bottom: false
            }
        ));
        let top3 = apply(&FormattingRule::top_n("Qty", 3));
        assert!(matches!(top3.rule_type, CfRuleType::Top10 { rank: 3, .. }));

        let dup = apply(&FormattingRule::highlight_duplicates("Name"));
        assert_eq!(dup.rule_type, CfRuleType::DuplicateValues);
        assert_eq!(dup.format.and_then(|s| s.fill.color()), Some(DUPLICATE_FILL));
    }

    #[test]
    fn test_validation_and_unknown_kind() {
        let err = FormattingRule::data_bars("  ").validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument 'rules': DataBars rule has an empty target field name"
        );
        assert!(FormattingRule::data_bars("Price").validate().is_ok());

        let err = RuleStrategies::empty()
            .resolve(RuleKind::TopN)
            .err()
            .unwrap();
        assert!(matches!(err, Error::UnknownRuleKind(RuleKind::TopN)));
    }
}
