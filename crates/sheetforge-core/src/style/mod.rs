//! Cell styling types
//!
//! - [`Style`] - complete cell style
//! - [`FontStyle`], [`FillStyle`], [`BorderStyle`], [`Alignment`] - its parts
//! - [`NumberFormat`] - display format code
//! - [`Color`] - RGB/ARGB colors
//! - [`StylePool`] - per-sheet style deduplication

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod number_format;
mod pool;

pub use alignment::{Alignment, HorizontalAlignment};
pub use border::{BorderEdge, BorderLineStyle, BorderStyle};
pub use color::Color;
pub use fill::FillStyle;
pub use font::FontStyle;
pub use number_format::NumberFormat;
pub use pool::StylePool;

/// Complete cell style, deduplicated per sheet through [`StylePool`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub font: FontStyle,
    pub fill: FillStyle,
    pub border: BorderStyle,
    pub alignment: Alignment,
    pub number_format: NumberFormat,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Solid background fill
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = FillStyle::Solid { color };
        self
    }

    /// Thin black border on all four edges
    pub fn thin_border(mut self) -> Self {
        self.border = BorderStyle::all(BorderLineStyle::Thin, Color::BLACK);
        self
    }

    /// Number format
    pub fn number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    /// Horizontal alignment
    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.alignment.horizontal = align;
        self
    }

    pub fn is_default(&self) -> bool {
        *self == Style::default()
    }
}
