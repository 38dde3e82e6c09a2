//! Aggregate rows
//!
//! [`AggregateKinds`] is the requested set; rows are always emitted in the
//! fixed order of [`AggregateKind::ORDER`]. Values come from an
//! [`AggregationStrategy`] resolved through [`AggregationStrategies`], which
//! in turn runs over a [`NumericColumn`].

mod numeric;
mod strategy;

use std::fmt;

use bitflags::bitflags;
use sheetforge_core::Color;

pub use numeric::NumericColumn;
pub use strategy::{
    AggregationStrategies, AggregationStrategy, AverageStrategy, CountStrategy, MaxStrategy,
    MinStrategy, SumStrategy,
};

/// One aggregate row kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AggregateKind {
    Sum,
    Average,
    Min,
    Max,
    Count,
}

impl AggregateKind {
    /// Emission order of aggregate rows
    pub const ORDER: [AggregateKind; 5] = [
        AggregateKind::Sum,
        AggregateKind::Average,
        AggregateKind::Min,
        AggregateKind::Max,
        AggregateKind::Count,
    ];

    /// Row label written into the first column
    pub fn label(self) -> &'static str {
        match self {
            AggregateKind::Sum => "Sum",
            AggregateKind::Average => "Average",
            AggregateKind::Min => "Min",
            AggregateKind::Max => "Max",
            AggregateKind::Count => "Count",
        }
    }

    /// Background of the aggregate row
    pub fn fill(self) -> Color {
        match self {
            AggregateKind::Sum => Color::LIGHT_GRAY,
            AggregateKind::Average => Color::PALE_BLUE,
            AggregateKind::Min => Color::PALE_YELLOW,
            AggregateKind::Max => Color::LIGHT_GREEN,
            AggregateKind::Count => Color::LAVENDER,
        }
    }

    pub fn flag(self) -> AggregateKinds {
        match self {
            AggregateKind::Sum => AggregateKinds::SUM,
            AggregateKind::Average => AggregateKinds::AVERAGE,
            AggregateKind::Min => AggregateKinds::MIN,
            AggregateKind::Max => AggregateKinds::MAX,
            AggregateKind::Count => AggregateKinds::COUNT,
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

bitflags! {
    /// Set of requested aggregate rows
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AggregateKinds: u8 {
        const SUM = 0b0_0001;
        const AVERAGE = 0b0_0010;
        const MIN = 0b0_0100;
        const MAX = 0b0_1000;
        const COUNT = 0b1_0000;

        /// Every aggregate row
        const ALL = Self::SUM.bits()
                  | Self::AVERAGE.bits()
                  | Self::MIN.bits()
                  | Self::MAX.bits()
                  | Self::COUNT.bits();
    }
}

impl AggregateKinds {
    /// No aggregate rows
    pub const NONE: Self = Self::empty();

    /// Requested kinds in emission order
    pub fn kinds(self) -> impl Iterator<Item = AggregateKind> {
        AggregateKind::ORDER
            .into_iter()
            .filter(move |kind| self.contains(kind.flag()))
    }
}

impl From<AggregateKind> for AggregateKinds {
    fn from(kind: AggregateKind) -> Self {
        kind.flag()
    }
}
