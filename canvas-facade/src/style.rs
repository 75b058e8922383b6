//! Style types and enums for canvas operations.

use crate::color::ColorRgba;
use crate::error::CanvasError;
use crate::gradient::CanvasGradient;
use crate::pattern::CanvasPattern;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Paint source used by fill and stroke.
#[derive(Debug, Clone)]
pub enum FillStyle {
    /// Solid color fill.
    Color(ColorRgba),
    /// Linear gradient fill.
    LinearGradient(CanvasGradient),
    /// Radial gradient fill.
    RadialGradient(CanvasGradient),
    /// Image pattern fill.
    Pattern(Arc<CanvasPattern>),
}

impl Default for FillStyle {
    fn default() -> Self {
        FillStyle::Color(ColorRgba::BLACK)
    }
}

impl From<ColorRgba> for FillStyle {
    fn from(color: ColorRgba) -> Self {
        FillStyle::Color(color)
    }
}

/// Line cap style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Flat edge at the endpoint.
    #[default]
    Butt,
    /// Rounded edge extending past the endpoint.
    Round,
    /// Square edge extending past the endpoint.
    Square,
}

impl From<LineCap> for tiny_skia::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        }
    }
}

/// Line join style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Sharp corner.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Beveled corner.
    Bevel,
}

impl From<LineJoin> for tiny_skia::LineJoin {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        }
    }
}

/// Porter-Duff compositing modes accepted by `globalCompositeOperation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompositeOperation {
    #[default]
    SourceOver,
    SourceAtop,
    SourceIn,
    SourceOut,
    DestinationOver,
    DestinationAtop,
    DestinationIn,
    DestinationOut,
    Lighter,
    Copy,
    Xor,
}

impl CompositeOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            CompositeOperation::SourceOver => "source-over",
            CompositeOperation::SourceAtop => "source-atop",
            CompositeOperation::SourceIn => "source-in",
            CompositeOperation::SourceOut => "source-out",
            CompositeOperation::DestinationOver => "destination-over",
            CompositeOperation::DestinationAtop => "destination-atop",
            CompositeOperation::DestinationIn => "destination-in",
            CompositeOperation::DestinationOut => "destination-out",
            CompositeOperation::Lighter => "lighter",
            CompositeOperation::Copy => "copy",
            CompositeOperation::Xor => "xor",
        }
    }
}

impl FromStr for CompositeOperation {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s {
            "source-over" => CompositeOperation::SourceOver,
            "source-atop" => CompositeOperation::SourceAtop,
            "source-in" => CompositeOperation::SourceIn,
            "source-out" => CompositeOperation::SourceOut,
            "destination-over" => CompositeOperation::DestinationOver,
            "destination-atop" => CompositeOperation::DestinationAtop,
            "destination-in" => CompositeOperation::DestinationIn,
            "destination-out" => CompositeOperation::DestinationOut,
            "lighter" => CompositeOperation::Lighter,
            "copy" => CompositeOperation::Copy,
            "xor" => CompositeOperation::Xor,
            _ => {
                return Err(CanvasError::InvalidArgument(format!(
                    "Unknown composite operation: '{}'",
                    s
                )))
            }
        };
        Ok(op)
    }
}

impl fmt::Display for CompositeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CompositeOperation> for tiny_skia::BlendMode {
    fn from(op: CompositeOperation) -> Self {
        match op {
            CompositeOperation::SourceOver => tiny_skia::BlendMode::SourceOver,
            CompositeOperation::SourceAtop => tiny_skia::BlendMode::SourceAtop,
            CompositeOperation::SourceIn => tiny_skia::BlendMode::SourceIn,
            CompositeOperation::SourceOut => tiny_skia::BlendMode::SourceOut,
            CompositeOperation::DestinationOver => tiny_skia::BlendMode::DestinationOver,
            CompositeOperation::DestinationAtop => tiny_skia::BlendMode::DestinationAtop,
            CompositeOperation::DestinationIn => tiny_skia::BlendMode::DestinationIn,
            CompositeOperation::DestinationOut => tiny_skia::BlendMode::DestinationOut,
            CompositeOperation::Lighter => tiny_skia::BlendMode::Plus,
            CompositeOperation::Copy => tiny_skia::BlendMode::Source,
            CompositeOperation::Xor => tiny_skia::BlendMode::Xor,
        }
    }
}
