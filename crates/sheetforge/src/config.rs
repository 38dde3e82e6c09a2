//! Generation options

use sheetforge_core::Color;

use crate::aggregate::AggregateKinds;
use crate::rules::FormattingRule;

/// Options for one [`Engine::generate`](crate::Engine::generate) call
///
/// ```rust
/// use sheetforge::{AggregateKinds, Color, FormattingRule, GeneratorConfig};
///
/// let config = GeneratorConfig::default()
///     .with_header_color(Color::LIGHT_GREEN)
///     .with_aggregates(AggregateKinds::SUM | AggregateKinds::AVERAGE)
///     .with_rule(FormattingRule::highlight_negative("Profit"))
///     .with_freeze_panes(1, 0);
///
/// assert_eq!(config.rules.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Drop fields whose name ends in "id"
    pub exclude_id_fields: bool,
    /// Header row fill
    pub header_color: Color,
    /// Aggregate rows below the data
    pub aggregates: AggregateKinds,
    pub rules: Vec<FormattingRule>,
    /// Rows frozen at the top; 0 for none
    pub freeze_rows: u32,
    /// Columns frozen at the left; 0 for none
    pub freeze_columns: u16,
    /// Fail on rules naming unknown fields instead of skipping them
    pub strict_rules: bool,
    /// Workbook-level name over the header and data rows
    ///
    /// Only [`Engine::add_to_workbook`](crate::Engine::add_to_workbook)
    /// defines it. `generate` checks that it is not blank and otherwise
    /// ignores it, since a lone worksheet cannot hold a defined name.
    pub data_range_name: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            exclude_id_fields: false,
            header_color: Color::LIGHT_BLUE,
            aggregates: AggregateKinds::NONE,
            rules: Vec::new(),
            freeze_rows: 0,
            freeze_columns: 0,
            strict_rules: false,
            data_range_name: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header_color(mut self, color: Color) -> Self {
        self.header_color = color;
        self
    }

    pub fn with_aggregates(mut self, aggregates: AggregateKinds) -> Self {
        self.aggregates = aggregates;
        self
    }

    pub fn with_rule(mut self, rule: FormattingRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_freeze_panes(mut self, rows: u32, columns: u16) -> Self {
        self.freeze_rows = rows;
        self.freeze_columns = columns;
        self
    }

    pub fn exclude_id_fields(mut self, exclude: bool) -> Self {
        self.exclude_id_fields = exclude;
        self
    }

    pub fn strict_rules(mut self, strict: bool) -> Self {
        self.strict_rules = strict;
        self
    }

    pub fn with_data_range_name(mut self, name: impl Into<String>) -> Self {
        self.data_range_name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.header_color, Color::LIGHT_BLUE);
        assert!(config.aggregates.is_empty());
        assert!(config.rules.is_empty());
        assert_eq!((config.freeze_rows, config.freeze_columns), (0, 0));
        assert!(!config.exclude_id_fields);
        assert!(!config.strict_rules);
        assert_eq!(config.data_range_name, None);
    }

    #[test]
    fn test_builders() {
        let config = GeneratorConfig::new()
            .exclude_id_fields(true)
            .strict_rules(true)
            .with_aggregates(AggregateKinds::ALL)
            .with_freeze_panes(1, 2)
            .with_data_range_name("Orders");
        assert!(config.exclude_id_fields);
        assert!(config.strict_rules);
        assert_eq!(config.aggregates, AggregateKinds::ALL);
        assert_eq!((config.freeze_rows, config.freeze_columns), (1, 2));
        assert_eq!(config.data_range_name.as_deref(), Some("Orders"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let config = GeneratorConfig::default()
            .with_aggregates(AggregateKinds::SUM | AggregateKinds::COUNT)
            .with_rule(crate::rules::FormattingRule::top_n("Qty", 3));
        let json = serde_json::to_string(&config).unwrap();
        let back: GeneratorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let partial: GeneratorConfig = serde_json::from_str(r#"{"freeze_rows": 1}"#).unwrap();
        assert_eq!(partial.freeze_rows, 1);
        assert_eq!(partial.header_color, Color::LIGHT_BLUE);
    }
}
