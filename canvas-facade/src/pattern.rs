//! Pattern types for canvas operations.

use crate::error::{CanvasError, CanvasResult};
use crate::pixel::{PixelBuffer, PixelFormat};
use std::fmt;
use tiny_skia::{IntSize, Pixmap, Shader, SpreadMode, Transform};

/// Maximum pattern size (4096x4096).
const MAX_PATTERN_SIZE: u32 = 4096;

/// Pattern repetition mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Repetition {
    /// Repeat in both directions (default).
    #[default]
    Repeat,
    /// Repeat only horizontally.
    RepeatX,
    /// Repeat only vertically.
    RepeatY,
    /// No repetition (single instance).
    NoRepeat,
}

impl Repetition {
    pub fn as_str(self) -> &'static str {
        match self {
            Repetition::Repeat => "repeat",
            Repetition::RepeatX => "repeat-x",
            Repetition::RepeatY => "repeat-y",
            Repetition::NoRepeat => "no-repeat",
        }
    }
}

impl std::str::FromStr for Repetition {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repeat" | "" => Ok(Repetition::Repeat),
            "repeat-x" => Ok(Repetition::RepeatX),
            "repeat-y" => Ok(Repetition::RepeatY),
            "no-repeat" => Ok(Repetition::NoRepeat),
            _ => Err(CanvasError::InvalidArgument(format!(
                "Invalid repetition mode: '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canvas pattern for fill/stroke operations.
#[derive(Debug, Clone)]
pub struct CanvasPattern {
    /// The pattern image, premultiplied.
    pixmap: Pixmap,
    repetition: Repetition,
}

impl CanvasPattern {
    /// Create a pattern from image data in any pixel format.
    pub fn new(image: PixelBuffer, repetition: Repetition) -> CanvasResult<Self> {
        let (width, height) = (image.width(), image.height());
        if width > MAX_PATTERN_SIZE || height > MAX_PATTERN_SIZE {
            return Err(CanvasError::InvalidArgument(format!(
                "Pattern size {}x{} exceeds maximum {}x{}",
                width, height, MAX_PATTERN_SIZE, MAX_PATTERN_SIZE
            )));
        }

        let size = IntSize::from_wh(width, height).ok_or_else(|| {
            CanvasError::InvalidArgument("Pattern dimensions must be non-zero".to_string())
        })?;
        let data = image
            .converted(PixelFormat::RGBA8_PREMULTIPLIED)
            .into_vec();
        let pixmap = Pixmap::from_vec(data, size)
            .ok_or_else(|| CanvasError::InvalidArgument("Failed to create pixmap".to_string()))?;

        Ok(Self { pixmap, repetition })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn repetition(&self) -> Repetition {
        self.repetition
    }

    /// Pattern-space rectangle that painting must stay inside.
    ///
    /// `visible` is the area of interest in pattern space. Repeat mode is
    /// unbounded and returns `None`. A non-repeating axis is limited to the
    /// tile, a repeating one to `visible`.
    pub(crate) fn extent(&self, visible: tiny_skia::Rect) -> Option<tiny_skia::Rect> {
        let (pw, ph) = (self.pixmap.width() as f32, self.pixmap.height() as f32);
        let (left, right) = match self.repetition {
            Repetition::Repeat => return None,
            Repetition::RepeatX => (visible.left(), visible.right()),
            Repetition::RepeatY | Repetition::NoRepeat => (0.0, pw),
        };
        let (top, bottom) = match self.repetition {
            Repetition::RepeatY => (visible.top(), visible.bottom()),
            _ => (0.0, ph),
        };
        tiny_skia::Rect::from_ltrb(left, top, right, bottom)
    }

    /// Shader sampling the tile with repeat spread. Non-repeating modes are
    /// confined by masking the paint to [`CanvasPattern::extent`].
    pub(crate) fn shader(&self, transform: Transform) -> Shader<'_> {
        tiny_skia::Pattern::new(
            self.pixmap.as_ref(),
            SpreadMode::Repeat,
            tiny_skia::FilterQuality::Nearest,
            1.0,
            transform,
        )
    }
}
