//! Color representation

use std::fmt;

/// A cell, font, border or rule color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Application default
    #[default]
    Auto,
    /// Opaque RGB
    Rgb { r: u8, g: u8, b: u8 },
    /// RGB with alpha
    Argb { a: u8, r: u8, g: u8, b: u8 },
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a, r, g, b }
    }

    /// 8-digit ARGB hex as used by XLSX, e.g. `FFFF0000` for opaque red
    pub fn to_argb_hex(&self) -> String {
        let (a, r, g, b) = self.components();
        format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b)
    }

    /// `(alpha, red, green, blue)`; [`Color::Auto`] resolves to opaque black
    pub fn components(&self) -> (u8, u8, u8, u8) {
        match *self {
            Color::Auto => (0xFF, 0, 0, 0),
            Color::Rgb { r, g, b } => (0xFF, r, g, b),
            Color::Argb { a, r, g, b } => (a, r, g, b),
        }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    pub const PALE_BLUE: Color = Color::rgb(175, 238, 238);
    pub const PALE_YELLOW: Color = Color::rgb(255, 255, 224);
    pub const LIGHT_GREEN: Color = Color::rgb(144, 238, 144);
    pub const LAVENDER: Color = Color::rgb(230, 230, 250);
    pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
    pub const LIGHT_CORAL: Color = Color::rgb(240, 128, 128);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Auto => f.write_str("auto"),
            Color::Rgb { r, g, b } => write!(f, "#{:02X}{:02X}{:02X}", r, g, b),
            Color::Argb { a, r, g, b } => write!(f, "#{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
        }
    }
}
