//! Aggregation strategies, one per [`AggregateKind`]

use ahash::AHashMap;

use super::{AggregateKind, NumericColumn};
use crate::error::{Error, Result};

/// Computes one aggregate over a numeric column
pub trait AggregationStrategy: Send + Sync {
    fn kind(&self) -> AggregateKind;

    fn calculate(&self, column: &NumericColumn) -> f64;
}

#[derive(Debug, Default)]
pub struct SumStrategy;

impl AggregationStrategy for SumStrategy {
    fn kind(&self) -> AggregateKind {
        AggregateKind::Sum
    }

    fn calculate(&self, column: &NumericColumn) -> f64 {
        column.sum()
    }
}

#[derive(Debug, Default)]
pub struct AverageStrategy;

impl AggregationStrategy for AverageStrategy {
    fn kind(&self) -> AggregateKind {
        AggregateKind::Average
    }

    fn calculate(&self, column: &NumericColumn) -> f64 {
        column.average()
    }
}

#[derive(Debug, Default)]
pub struct MinStrategy;

impl AggregationStrategy for MinStrategy {
    fn kind(&self) -> AggregateKind {
        AggregateKind::Min
    }

    fn calculate(&self, column: &NumericColumn) -> f64 {
        column.min()
    }
}

#[derive(Debug, Default)]
pub struct MaxStrategy;

impl AggregationStrategy for MaxStrategy {
    fn kind(&self) -> AggregateKind {
        AggregateKind::Max
    }

    fn calculate(&self, column: &NumericColumn) -> f64 {
        column.max()
    }
}

#[derive(Debug, Default)]
pub struct CountStrategy;

impl AggregationStrategy for CountStrategy {
    fn kind(&self) -> AggregateKind {
        AggregateKind::Count
    }

    fn calculate(&self, column: &NumericColumn) -> f64 {
        column.count() as f64
    }
}

/// Strategy factory keyed by aggregate kind
pub struct AggregationStrategies {
    strategies: AHashMap<AggregateKind, Box<dyn AggregationStrategy>>,
}

impl AggregationStrategies {
    /// Strategies for all five kinds
    pub fn standard() -> Self {
        Self::empty()
            .register(Box::new(SumStrategy))
            .register(Box::new(AverageStrategy))
            .register(Box::new(MinStrategy))
            .register(Box::new(MaxStrategy))
            .register(Box::new(CountStrategy))
    }

    /// No strategies at all
    pub fn empty() -> Self {
        Self {
            strategies: AHashMap::new(),
        }
    }

    /// Register a strategy, replacing any previous one for its kind
    pub fn register(mut self, strategy: Box<dyn AggregationStrategy>) -> Self {
        self.strategies.insert(strategy.kind(), strategy);
        self
    }

    pub fn resolve(&self, kind: AggregateKind) -> Result<&dyn AggregationStrategy> {
        self.strategies
            .get(&kind)
            .map(|s| s.as_ref())
            .ok_or(Error::UnknownAggregateKind(kind))
    }
}

impl Default for AggregationStrategies {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for AggregationStrategies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.strategies.keys().map(|k| k.label()).collect();
        kinds.sort_unstable();
        f.debug_struct("AggregationStrategies")
            .field("kinds", &kinds)
            .finish()
    }
}
