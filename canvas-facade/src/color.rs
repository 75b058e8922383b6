//! CSS color resolution.
//!
//! Three textual forms are accepted: `#` hex (`RRGGBB`, `AARRGGBB` and the
//! 3/4 digit shorthands), `rgba(r, g, b, a)` with fractional channels, and
//! case-insensitive CSS keywords. A packed `u32` in `(A<<24)|(R<<16)|(G<<8)|B`
//! layout bypasses text parsing entirely.

use crate::error::{CanvasError, CanvasResult};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// An 8-bit straight-alpha color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorRgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorRgba {
    pub const BLACK: ColorRgba = ColorRgba::rgb(0, 0, 0);
    pub const WHITE: ColorRgba = ColorRgba::rgb(255, 255, 255);
    pub const TRANSPARENT: ColorRgba = ColorRgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from three channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Unpack an `AARRGGBB` value.
    pub const fn from_argb_u32(value: u32) -> Self {
        Self {
            a: (value >> 24) as u8,
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Pack into an `AARRGGBB` value.
    pub const fn to_argb_u32(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// True only for transparent black (packed value of zero).
    pub const fn is_transparent(self) -> bool {
        self.to_argb_u32() == 0
    }

    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Hex form: `#RRGGBB` when opaque, `#AARRGGBB` otherwise.
    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:08X}", self.to_argb_u32())
        }
    }

    /// Channels in R, G, B, A order.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for ColorRgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<u32> for ColorRgba {
    fn from(value: u32) -> Self {
        ColorRgba::from_argb_u32(value)
    }
}

impl From<ColorRgba> for tiny_skia::Color {
    fn from(c: ColorRgba) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

impl FromStr for ColorRgba {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_color(s)
    }
}

/// Color input accepted by style setters and gradient stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpec<'a> {
    /// CSS text: hex, `rgba(...)` or keyword.
    Text(&'a str),
    /// Packed `AARRGGBB`.
    Packed(u32),
}

impl ColorSpec<'_> {
    pub fn resolve(&self) -> CanvasResult<ColorRgba> {
        match *self {
            ColorSpec::Text(text) => resolve_color(text),
            ColorSpec::Packed(value) => Ok(ColorRgba::from_argb_u32(value)),
        }
    }
}

impl<'a> From<&'a str> for ColorSpec<'a> {
    fn from(text: &'a str) -> Self {
        ColorSpec::Text(text)
    }
}

impl From<u32> for ColorSpec<'_> {
    fn from(value: u32) -> Self {
        ColorSpec::Packed(value)
    }
}

impl From<ColorRgba> for ColorSpec<'_> {
    fn from(color: ColorRgba) -> Self {
        ColorSpec::Packed(color.to_argb_u32())
    }
}

/// Resolve CSS color text into a straight-alpha color.
///
/// Keywords that are not in the table fail with
/// [`CanvasError::UnknownColorName`]; malformed hex or `rgba(...)` text fails
/// with [`CanvasError::InvalidColor`].
pub fn resolve_color(input: &str) -> CanvasResult<ColorRgba> {
    let s = input.trim();

    if let Some(digits) = s.strip_prefix('#') {
        return parse_hex(digits, input);
    }

    let is_function = s
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("rgba("));
    if is_function {
        return parse_rgba_function(&s[5..], input);
    }

    let hex = color_name_hex(s).ok_or_else(|| CanvasError::UnknownColorName(s.to_string()))?;
    parse_hex(&hex[1..], input)
}

/// Look up the `#RRGGBB` value of a CSS color keyword, ignoring ASCII case.
pub fn color_name_hex(name: &str) -> Option<&'static str> {
    COLOR_TABLE.get(name.to_ascii_lowercase().as_str()).copied()
}

fn parse_hex(digits: &str, input: &str) -> CanvasResult<ColorRgba> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CanvasError::InvalidColor(format!(
            "'{}' is not a hex color",
            input
        )));
    }

    let expanded: String;
    let digits = match digits.len() {
        3 | 4 => {
            expanded = digits.chars().flat_map(|c| [c, c]).collect();
            expanded.as_str()
        }
        _ => digits,
    };

    if digits.len() != 6 && digits.len() != 8 {
        return Err(CanvasError::InvalidColor(format!(
            "'{}' has {} hex digits, expected 3, 4, 6 or 8",
            input,
            digits.len()
        )));
    }

    let value = u32::from_str_radix(digits, 16)
        .map_err(|e| CanvasError::InvalidColor(format!("{}: {}", input, e)))?;

    if digits.len() == 6 {
        Ok(ColorRgba::from_argb_u32(0xFF00_0000 | value))
    } else {
        Ok(ColorRgba::from_argb_u32(value))
    }
}

fn parse_rgba_function(body: &str, input: &str) -> CanvasResult<ColorRgba> {
    let body = body
        .trim_end()
        .strip_suffix(')')
        .ok_or_else(|| CanvasError::InvalidColor(format!("'{}' is missing ')'", input)))?;

    let mut channels = [0u8; 4];
    let mut count = 0;
    for token in body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if count == channels.len() {
            return Err(CanvasError::InvalidColor(format!(
                "'{}' has more than four channels",
                input
            )));
        }
        let value: f64 = token.parse().map_err(|_| {
            CanvasError::InvalidColor(format!("'{}' is not a number in '{}'", token, input))
        })?;
        if !value.is_finite() {
            return Err(CanvasError::InvalidColor(format!(
                "'{}' is not finite in '{}'",
                token, input
            )));
        }
        // Truncation, not rounding: 0.5 maps to 127.
        channels[count] = (value.clamp(0.0, 1.0) * 255.0).floor() as u8;
        count += 1;
    }

    if count != channels.len() {
        return Err(CanvasError::InvalidColor(format!(
            "'{}' has {} channels, expected 4",
            input, count
        )));
    }

    let [r, g, b, a] = channels;
    Ok(ColorRgba::new(r, g, b, a))
}

lazy_static! {
    static ref COLOR_TABLE: HashMap<&'static str, &'static str> =
        COLOR_NAMES.iter().copied().collect();
}

/// CSS color keywords.
static COLOR_NAMES: &[(&str, &str)] = &[
    ("aliceblue", "#F0F8FF"),
    ("antiquewhite", "#FAEBD7"),
    ("aqua", "#00FFFF"),
    ("aquamarine", "#7FFFD4"),
    ("azure", "#F0FFFF"),
    ("beige", "#F5F5DC"),
    ("bisque", "#FFE4C4"),
    ("black", "#000000"),
    ("blanchedalmond", "#FFEBCD"),
    ("blue", "#0000FF"),
    ("blueviolet", "#8A2BE2"),
    ("brown", "#A52A2A"),
    ("burlywood", "#DEB887"),
    ("cadetblue", "#5F9EA0"),
    ("chartreuse", "#7FFF00"),
    ("chocolate", "#D2691E"),
    ("coral", "#FF7F50"),
    ("cornflowerblue", "#6495ED"),
    ("cornsilk", "#FFF8DC"),
    ("crimson", "#DC143C"),
    ("cyan", "#00FFFF"),
    ("darkblue", "#00008B"),
    ("darkcyan", "#008B8B"),
    ("darkgoldenrod", "#B8860B"),
    ("darkgray", "#A9A9A9"),
    ("darkgreen", "#006400"),
    ("darkgrey", "#A9A9A9"),
    ("darkkhaki", "#BDB76B"),
    ("darkmagenta", "#8B008B"),
    ("darkolivegreen", "#556B2F"),
    ("darkorange", "#FF8C00"),
    ("darkorchid", "#9932CC"),
    ("darkred", "#8B0000"),
    ("darksalmon", "#E9967A"),
    ("darkseagreen", "#8FBC8F"),
    ("darkslateblue", "#483D8B"),
    ("darkslategray", "#2F4F4F"),
    ("darkslategrey", "#2F4F4F"),
    ("darkturquoise", "#00CED1"),
    ("darkviolet", "#9400D3"),
    ("deeppink", "#FF1493"),
    ("deepskyblue", "#00BFFF"),
    ("dimgray", "#696969"),
    ("dimgrey", "#696969"),
    ("dodgerblue", "#1E90FF"),
    ("firebrick", "#B22222"),
    ("floralwhite", "#FFFAF0"),
    ("forestgreen", "#228B22"),
    ("fuchsia", "#FF00FF"),
    ("gainsboro", "#DCDCDC"),
    ("ghostwhite", "#F8F8FF"),
    ("gold", "#FFD700"),
    ("goldenrod", "#DAA520"),
    ("gray", "#808080"),
    ("green", "#008000"),
    ("greenyellow", "#ADFF2F"),
    ("grey", "#808080"),
    ("honeydew", "#F0FFF0"),
    ("hotpink", "#FF69B4"),
    ("indianred", "#CD5C5C"),
    ("indigo", "#4B0082"),
    ("ivory", "#FFFFF0"),
    ("khaki", "#F0E68C"),
    ("lavender", "#E6E6FA"),
    ("lavenderblush", "#FFF0F5"),
    ("lawngreen", "#7CFC00"),
    ("lemonchiffon", "#FFFACD"),
    ("lightblue", "#ADD8E6"),
    ("lightcoral", "#F08080"),
    ("lightcyan", "#E0FFFF"),
    ("lightgoldenrodyellow", "#FAFAD2"),
    ("lightgray", "#D3D3D3"),
    ("lightgreen", "#90EE90"),
    ("lightgrey", "#D3D3D3"),
    ("lightpink", "#FFB6C1"),
    ("lightsalmon", "#FFA07A"),
    ("lightseagreen", "#20B2AA"),
    ("lightskyblue", "#87CEFA"),
    ("lightslategray", "#778899"),
    ("lightslategrey", "#778899"),
    ("lightsteelblue", "#B0C4DE"),
    ("lightyellow", "#FFFFE0"),
    ("lime", "#00FF00"),
    ("limegreen", "#32CD32"),
    ("linen", "#FAF0E6"),
    ("magenta", "#FF00FF"),
    ("maroon", "#800000"),
    ("mediumaquamarine", "#66CDAA"),
    ("mediumblue", "#0000CD"),
    ("mediumorchid", "#BA55D3"),
    ("mediumpurple", "#9370DB"),
    ("mediumseagreen", "#3CB371"),
    ("mediumslateblue", "#7B68EE"),
    ("mediumspringgreen", "#00FA9A"),
    ("mediumturquoise", "#48D1CC"),
    ("mediumvioletred", "#C71585"),
    ("midnightblue", "#191970"),
    ("mintcream", "#F5FFFA"),
    ("mistyrose", "#FFE4E1"),
    ("moccasin", "#FFE4B5"),
    ("navajowhite", "#FFDEAD"),
    ("navy", "#000080"),
    ("oldlace", "#FDF5E6"),
    ("olive", "#808000"),
    ("olivedrab", "#6B8E23"),
    ("orange", "#FFA500"),
    ("orangered", "#FF4500"),
    ("orchid", "#DA70D6"),
    ("palegoldenrod", "#EEE8AA"),
    ("palegreen", "#98FB98"),
    ("paleturquoise", "#AFEEEE"),
    ("palevioletred", "#DB7093"),
    ("papayawhip", "#FFEFD5"),
    ("peachpuff", "#FFDAB9"),
    ("peru", "#CD853F"),
    ("pink", "#FFC0CB"),
    ("plum", "#DDA0DD"),
    ("powderblue", "#B0E0E6"),
    ("purple", "#800080"),
    ("rebeccapurple", "#663399"),
    ("red", "#FF0000"),
    ("rosybrown", "#BC8F8F"),
    ("royalblue", "#4169E1"),
    ("saddlebrown", "#8B4513"),
    ("salmon", "#FA8072"),
    ("sandybrown", "#F4A460"),
    ("seagreen", "#2E8B57"),
    ("seashell", "#FFF5EE"),
    ("sienna", "#A0522D"),
    ("silver", "#C0C0C0"),
    ("skyblue", "#87CEEB"),
    ("slateblue", "#6A5ACD"),
    ("slategray", "#708090"),
    ("slategrey", "#708090"),
    ("snow", "#FFFAFA"),
    ("springgreen", "#00FF7F"),
    ("steelblue", "#4682B4"),
    ("tan", "#D2B48C"),
    ("teal", "#008080"),
    ("thistle", "#D8BFD8"),
    ("tomato", "#FF6347"),
    ("turquoise", "#40E0D0"),
    ("violet", "#EE82EE"),
    ("wheat", "#F5DEB3"),
    ("white", "#FFFFFF"),
    ("whitesmoke", "#F5F5F5"),
    ("yellow", "#FFFF00"),
    ("yellowgreen", "#9ACD32"),
    ("transparent", "#00000000"),
];
