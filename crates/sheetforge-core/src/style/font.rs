//! Font style types

/// Font settings
#[derive(Debug, Clone, PartialEq)]
pub struct FontStyle {
    /// Family name, e.g. "Calibri"
    pub name: String,
    /// Size in points
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            name: "Calibri".to_string(),
            size: 11.0,
            bold: false,
            italic: false,
        }
    }
}

impl FontStyle {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::hash::Hash for FontStyle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.size.to_bits().hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
    }
}

impl Eq for FontStyle {}
