//! Typed font description and text layout options.
//!
//! Fonts are built from a family and a pixel size. There is no CSS font
//! string parsing.

use std::collections::HashSet;
use std::fmt;

/// Font family requested for text drawing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    SansSerif,
    Serif,
    Monospace,
    /// A concrete family name such as `"Georgia"`. Falls back to sans-serif
    /// when no loaded face carries the name.
    Named(String),
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontFamily::SansSerif => f.write_str("sans-serif"),
            FontFamily::Serif => f.write_str("serif"),
            FontFamily::Monospace => f.write_str("monospace"),
            FontFamily::Named(name) => f.write_str(name),
        }
    }
}

/// Font used by `fill_text`, `stroke_text` and `measure_text`.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: FontFamily,
    /// Em size in pixels.
    pub size_px: f32,
    /// CSS weight, 100..=900.
    pub weight: u16,
    pub italic: bool,
}

impl Font {
    pub fn new(family: FontFamily, size_px: f32) -> Self {
        Self {
            family,
            size_px,
            weight: 400,
            italic: false,
        }
    }

    /// Shorthand for a named family.
    pub fn named(name: impl Into<String>, size_px: f32) -> Self {
        Self::new(FontFamily::Named(name.into()), size_px)
    }

    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight.clamp(100, 900);
        self
    }

    pub fn bold(self) -> Self {
        self.with_weight(700)
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// The canvas default, `10px sans-serif`.
impl Default for Font {
    fn default() -> Self {
        Self::new(FontFamily::SansSerif, 10.0)
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.italic {
            f.write_str("italic ")?;
        }
        if self.weight != 400 {
            write!(f, "{} ", self.weight)?;
        }
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
}

impl TextAlign {
    /// Offset added to the anchor x for text of the given width.
    pub(crate) fn offset(self, width: f32) -> f32 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Right => -width,
            TextAlign::Center => -width / 2.0,
        }
    }
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

impl TextBaseline {
    /// Offset added to the anchor y so that the alphabetic baseline lands there.
    pub(crate) fn offset(self, ascent: f32, descent: f32) -> f32 {
        match self {
            TextBaseline::Top => ascent,
            TextBaseline::Middle => (ascent - descent) / 2.0,
            TextBaseline::Alphabetic => 0.0,
            TextBaseline::Bottom => -descent,
        }
    }
}

/// Result of `measure_text`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Advance width in pixels.
    pub width: f32,
    /// Distance from the baseline to the top of the line box.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: f32,
}

const SANS_SERIF: &[&str] = &["Arial", "Helvetica", "Liberation Sans", "DejaVu Sans"];
const SERIF: &[&str] = &["Times New Roman", "Times", "Liberation Serif", "DejaVu Serif"];
const MONOSPACE: &[&str] = &["Courier New", "Courier", "Liberation Mono", "DejaVu Sans Mono"];

lazy_static! {
    /// System fonts, scanned once per process and cloned into each canvas.
    static ref SYSTEM_FONTS: fontdb::Database = {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!(target: "canvas", "loaded {} system font faces", db.len());
        db
    };
}

/// Build the font database for a new canvas.
pub(crate) fn font_database(load_system_fonts: bool, custom_fonts: &[Vec<u8>]) -> fontdb::Database {
    let mut db = if load_system_fonts {
        SYSTEM_FONTS.clone()
    } else {
        fontdb::Database::new()
    };
    for data in custom_fonts {
        db.load_font_data(data.clone());
    }
    apply_generic_families(&mut db);
    db
}

/// Point each generic family at the first preferred family that is installed.
fn apply_generic_families(db: &mut fontdb::Database) {
    let available: HashSet<String> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
        .collect();
    let pick = |candidates: &[&str]| {
        candidates
            .iter()
            .find(|name| available.contains(**name))
            .map(|name| name.to_string())
    };

    if let Some(family) = pick(SANS_SERIF) {
        db.set_sans_serif_family(family);
    }
    if let Some(family) = pick(SERIF) {
        db.set_serif_family(family);
    }
    if let Some(family) = pick(MONOSPACE) {
        db.set_monospace_family(family);
    }
}
