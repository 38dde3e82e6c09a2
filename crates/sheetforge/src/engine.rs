//! Sheet assembly
//!
//! [`Engine::generate`] turns a slice of records into a [`Worksheet`]:
//!
//! 1. inputs are validated and every strategy is resolved up front
//! 2. a header row of field labels
//! 3. one data row per record
//! 4. aggregate rows directly below the data
//! 5. conditional formats over the data rows of their column
//! 6. frozen panes and column autosizing
//!
//! Nothing is written until step 1 has passed, so an error never leaves a
//! half-built sheet behind.

use std::sync::RwLock;

use ahash::AHashMap;
use log::{debug, warn};
use sheetforge_core::{
    validate_sheet_name, CellAddress, CellRange, CellValue, NumberFormat, Workbook, Worksheet,
    MAX_COLS, MAX_ROWS,
};

use crate::aggregate::{AggregateKind, AggregationStrategies, AggregationStrategy, NumericColumn};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::format::{format_with, FormatterRegistry, StyleHint, ValueFormatter};
use crate::record::{extract, format_label, FieldDescriptor, Record};
use crate::rules::{FormattingRule, RuleStrategies, RuleStrategy};
use crate::value::{NumericFamily, NumericKind};

/// The formatting and aggregation engine
///
/// Build one at start-up and share it by reference; `generate` only reads
/// from it apart from the internal label cache.
///
/// ```rust
/// use sheetforge::{record, AggregateKinds, CellValue, Engine, GeneratorConfig};
///
/// struct Line {
///     item: String,
///     qty: i32,
/// }
///
/// record!(Line { "Item" => item, "Qty" => qty });
///
/// let lines = vec![
///     Line { item: "Bolt".into(), qty: 4 },
///     Line { item: "Nut".into(), qty: 6 },
/// ];
/// let config = GeneratorConfig::default().with_aggregates(AggregateKinds::SUM);
/// let sheet = Engine::new().generate(&lines, "Lines", &config).unwrap();
///
/// assert_eq!(sheet.get_value_at(3, 0), CellValue::string("Sum"));
/// assert_eq!(sheet.get_value_at(3, 1), CellValue::Number(10.0));
/// ```
pub struct Engine {
    formatters: FormatterRegistry,
    aggregations: AggregationStrategies,
    rules: RuleStrategies,
    labels: RwLock<AHashMap<String, String>>,
}

/// Per-column decisions shared by every pass over the records
struct ColumnPlan<'a, R> {
    field: &'a FieldDescriptor<R>,
    label: String,
    formatter: &'a dyn ValueFormatter,
    numeric: Option<NumericKind>,
}

/// A generated sheet and the extent of its header plus data block
struct Generated {
    sheet: Worksheet,
    data_rows: u32,
    columns: u16,
}

impl Engine {
    /// Engine with the built-in formatters and strategies
    pub fn new() -> Self {
        Self {
            formatters: FormatterRegistry::standard(),
            aggregations: AggregationStrategies::standard(),
            rules: RuleStrategies::standard(),
            labels: RwLock::new(AHashMap::new()),
        }
    }

    /// Add a custom value formatter
    pub fn with_formatter(mut self, formatter: Box<dyn ValueFormatter>) -> Self {
        self.formatters = self.formatters.with_formatter(formatter);
        self
    }

    /// Replace the aggregation strategy set
    pub fn with_aggregations(mut self, aggregations: AggregationStrategies) -> Self {
        self.aggregations = aggregations;
        self
    }

    /// Replace the conditional format strategy set
    pub fn with_rules(mut self, rules: RuleStrategies) -> Self {
        self.rules = rules;
        self
    }

    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// Column label for a field name, cached per distinct name
    pub fn label(&self, name: &str) -> String {
        if let Ok(cache) = self.labels.read() {
            if let Some(label) = cache.get(name) {
                return label.clone();
            }
        }
        let label = format_label(name);
        if let Ok(mut cache) = self.labels.write() {
            cache
                .entry(name.to_string())
                .or_insert_with(|| label.clone());
        }
        label
    }

    /// Generate a sheet from a slice of records
    pub fn generate<R: Record>(
        &self,
        records: &[R],
        sheet_name: &str,
        config: &GeneratorConfig,
    ) -> Result<Worksheet> {
        self.generate_optional(records.iter().map(Some), sheet_name, config)
    }

    /// Generate a sheet from possibly missing records
    ///
    /// `None` entries are skipped without leaving an empty row; aggregates
    /// count only the records that are present. A standalone sheet has no
    /// workbook to hold [`GeneratorConfig::data_range_name`], so the name is
    /// validated but not defined; use [`Engine::add_to_workbook`] for that.
    pub fn generate_optional<'r, R, I>(
        &self,
        records: I,
        sheet_name: &str,
        config: &GeneratorConfig,
    ) -> Result<Worksheet>
    where
        R: Record + 'r,
        I: IntoIterator<Item = Option<&'r R>>,
    {
        let generated = self.build(records, sheet_name, config)?;
        if let Some(name) = &config.data_range_name {
            debug!(
                "data range name {} not defined for standalone sheet {}; use add_to_workbook",
                name, sheet_name
            );
        }
        Ok(generated.sheet)
    }

    /// Generate a sheet and append it to a workbook
    ///
    /// With [`GeneratorConfig::data_range_name`] set, a workbook-level name is
    /// defined over the header and data rows. The workbook is left untouched
    /// when anything fails. Returns the new sheet's index.
    pub fn add_to_workbook<R: Record>(
        &self,
        workbook: &mut Workbook,
        records: &[R],
        sheet_name: &str,
        config: &GeneratorConfig,
    ) -> Result<usize> {
        if workbook.sheet_index(sheet_name).is_some() {
            return Err(sheetforge_core::Error::DuplicateSheetName(sheet_name.to_string()).into());
        }
        let generated = self.build(records.iter().map(Some), sheet_name, config)?;

        if let Some(name) = &config.data_range_name {
            let range = CellRange::new(
                CellAddress::absolute(0, 0),
                CellAddress::absolute(generated.data_rows, generated.columns - 1),
            );
            let refers_to = format!("'{}'!{}", sheet_name.replace('\'', "''"), range);
            workbook.define_name(name, &refers_to)?;
            debug!("defined name {} as {}", name, refers_to);
        }
        Ok(workbook.add_existing_worksheet(generated.sheet)?)
    }

    fn build<'r, R, I>(
        &self,
        records: I,
        sheet_name: &str,
        config: &GeneratorConfig,
    ) -> Result<Generated>
    where
        R: Record + 'r,
        I: IntoIterator<Item = Option<&'r R>>,
    {
        validate_inputs(sheet_name, config)?;

        let schema = R::schema();
        let fields = extract(&schema, config.exclude_id_fields);
        if fields.is_empty() {
            return Err(Error::NoExportableFields {
                type_name: schema.type_name().to_string(),
            });
        }
        let rows: Vec<&R> = records.into_iter().flatten().collect();

        if fields.len() > usize::from(MAX_COLS) {
            return Err(Error::invalid(
                "records",
                format!(
                    "{} fields exceed the column limit of {}",
                    fields.len(),
                    MAX_COLS
                ),
            ));
        }
        let aggregates: Vec<(AggregateKind, &dyn AggregationStrategy)> = config
            .aggregates
            .kinds()
            .map(|kind| Ok((kind, self.aggregations.resolve(kind)?)))
            .collect::<Result<_>>()?;
        let total_rows = 1 + rows.len() + aggregates.len();
        if total_rows > MAX_ROWS as usize {
            return Err(Error::invalid(
                "records",
                format!(
                    "{} records need {} rows, the limit is {}",
                    rows.len(),
                    total_rows,
                    MAX_ROWS
                ),
            ));
        }

        let columns: Vec<ColumnPlan<'_, R>> = fields
            .into_iter()
            .map(|field| {
                let declared = field.declared_type();
                ColumnPlan {
                    field,
                    label: self.label(field.name()),
                    formatter: self.formatters.resolve(&declared),
                    numeric: declared.kind.numeric(),
                }
            })
            .collect();
        let rules = self.resolve_rules(&columns, config)?;

        let data_rows = rows.len() as u32;
        let column_count = columns.len() as u16;
        debug!(
            "generating sheet '{}': {} records, {} columns, {} aggregate rows, {} rules",
            sheet_name,
            rows.len(),
            columns.len(),
            aggregates.len(),
            rules.len()
        );

        let mut sheet = Worksheet::new(sheet_name);
        write_header(&mut sheet, &columns, config)?;
        write_data(&mut sheet, &columns, &rows)?;
        if !aggregates.is_empty() {
            write_aggregates(&mut sheet, &columns, &rows, &aggregates)?;
        }

        if data_rows == 0 {
            debug!("no data rows, skipping {} conditional formats", rules.len());
        } else {
            for (col, rule, strategy) in rules {
                let range = CellRange::column(col, 1, data_rows);
                sheet.add_conditional_format(strategy.apply(range, rule.params()));
            }
        }

        if config.freeze_rows > 0 || config.freeze_columns > 0 {
            sheet.set_freeze_panes(config.freeze_rows, config.freeze_columns);
        }
        sheet.autofit_columns();

        Ok(Generated {
            sheet,
            data_rows,
            columns: column_count,
        })
    }

    /// Pair each rule with its column and strategy
    fn resolve_rules<'c, R>(
        &self,
        columns: &[ColumnPlan<'_, R>],
        config: &'c GeneratorConfig,
    ) -> Result<Vec<(u16, &'c FormattingRule, &dyn RuleStrategy)>> {
        let mut resolved = Vec::with_capacity(config.rules.len());
        for rule in &config.rules {
            let strategy = self.rules.resolve(rule.kind())?;
            match columns.iter().position(|c| c.field.name() == rule.field()) {
                Some(col) => resolved.push((col as u16, rule, strategy)),
                None if config.strict_rules => {
                    return Err(Error::UnknownRuleField {
                        field: rule.field().to_string(),
                    })
                }
                None => warn!(
                    "skipping {} rule: no column for field '{}'",
                    rule.kind(),
                    rule.field()
                ),
            }
        }
        Ok(resolved)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("formatters", &self.formatters)
            .field("aggregations", &self.aggregations)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

fn validate_inputs(sheet_name: &str, config: &GeneratorConfig) -> Result<()> {
    validate_sheet_name(sheet_name).map_err(|e| Error::invalid("sheet_name", e.to_string()))?;
    for rule in &config.rules {
        rule.validate()?;
    }
    if config.freeze_rows >= MAX_ROWS || config.freeze_columns >= MAX_COLS {
        return Err(Error::invalid(
            "freeze_panes",
            format!(
                "{} rows and {} columns exceed the sheet limits",
                config.freeze_rows, config.freeze_columns
            ),
        ));
    }
    if let Some(name) = &config.data_range_name {
        if name.trim().is_empty() {
            return Err(Error::invalid(
                "data_range_name",
                "name cannot be empty or whitespace",
            ));
        }
    }
    Ok(())
}

fn write_header<R>(
    sheet: &mut Worksheet,
    columns: &[ColumnPlan<'_, R>],
    config: &GeneratorConfig,
) -> Result<()> {
    let style = StyleHint::default()
        .with_fill(config.header_color)
        .with_bold()
        .with_center()
        .with_border()
        .to_style();
    for (col, plan) in columns.iter().enumerate() {
        let col = col as u16;
        sheet.set_cell_value_at(0, col, plan.label.as_str())?;
        sheet.set_cell_style_at(0, col, &style)?;
    }
    Ok(())
}

fn write_data<R>(sheet: &mut Worksheet, columns: &[ColumnPlan<'_, R>], rows: &[&R]) -> Result<()> {
    for (index, record) in rows.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, plan) in columns.iter().enumerate() {
            let col = col as u16;
            let cell = format_with(plan.formatter, &plan.field.read(record));
            let style = cell.hint.with_border().to_style();
            sheet.set_cell_value_at(row, col, cell.value.into_cell_value())?;
            sheet.set_cell_style_at(row, col, &style)?;
        }
    }
    Ok(())
}

fn write_aggregates<R>(
    sheet: &mut Worksheet,
    columns: &[ColumnPlan<'_, R>],
    rows: &[&R],
    aggregates: &[(AggregateKind, &dyn AggregationStrategy)],
) -> Result<()> {
    let numeric: Vec<(u16, NumericColumn)> = columns
        .iter()
        .enumerate()
        .filter_map(|(col, plan)| {
            plan.numeric.map(|kind| {
                let values = rows.iter().map(|record| plan.field.read(record));
                (col as u16, NumericColumn::from_values(kind, values))
            })
        })
        .collect();
    if numeric.is_empty() {
        debug!("no numeric columns, skipping aggregate rows");
        return Ok(());
    }
    let label_first_cell = columns[0].numeric.is_none();

    let first_row = rows.len() as u32 + 1;
    for (offset, (kind, strategy)) in aggregates.iter().enumerate() {
        let row = first_row + offset as u32;
        let hint = StyleHint::default()
            .with_fill(kind.fill())
            .with_bold()
            .with_border();

        if label_first_cell {
            sheet.set_cell_value_at(row, 0, kind.label())?;
            sheet.set_cell_style_at(row, 0, &hint.to_style())?;
        }
        for (col, column) in &numeric {
            let value = strategy.calculate(column);
            let style = hint
                .clone()
                .with_number_format(aggregate_format(*kind, column.kind()))
                .to_style();
            sheet.set_cell_value_at(row, *col, CellValue::Number(value))?;
            sheet.set_cell_style_at(row, *col, &style)?;
        }
    }
    Ok(())
}

fn aggregate_format(kind: AggregateKind, numeric: NumericKind) -> NumberFormat {
    match (kind, numeric.family()) {
        (AggregateKind::Count, _) | (_, NumericFamily::Integer) => NumberFormat::thousands(),
        (_, NumericFamily::Decimal) => NumberFormat::thousands_decimal(),
    }
}
