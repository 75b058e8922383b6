//! Canvas 2D style drawing facade over `tiny-skia`.
//!
//! Besides the usual path, style and transform calls, the crate provides the
//! pieces that do real per-pixel or per-sample work:
//! - [`transfer`]: `putImageData` / `getImageData` / `drawImage` copies between
//!   [`PixelBuffer`]s and any [`Surface`], clipped on both ends, with
//!   channel-order and alpha conversion at the boundary
//! - [`curve`]: Bezier flattening, either by fixed-step Bernstein sampling or
//!   by adaptive subdivision
//! - [`color`]: CSS color resolution (hex, `rgba(...)`, keywords, packed ARGB)
//!
//! Text is shaped with `cosmic-text` and drawn as glyph outlines. Fonts are
//! given as a typed [`Font`] (family and pixel size).
//!
//! # Example
//!
//! ```rust,no_run
//! use canvas_facade::{Canvas, CubicBezierParams};
//!
//! let mut ctx = Canvas::new(400, 300)?;
//! ctx.set_stroke_style("cornflowerblue")?;
//! ctx.begin_path();
//! ctx.move_to(20.0, 20.0);
//! ctx.bezier_curve_to(&CubicBezierParams {
//!     cp1x: 20.0,
//!     cp1y: 100.0,
//!     cp2x: 200.0,
//!     cp2y: 100.0,
//!     x: 200.0,
//!     y: 20.0,
//! })?;
//! ctx.stroke();
//! ctx.save_png("bezier.png")?;
//! # Ok::<(), canvas_facade::CanvasError>(())
//! ```

#[macro_use]
extern crate lazy_static;

mod arc;
pub mod color;
mod context;
pub mod curve;
mod drawing_state;
mod error;
mod font;
mod geometry;
mod gradient;
mod matrix;
mod path;
mod pattern;
pub mod pixel;
mod style;
pub mod transfer;

// Re-export public API
pub use color::{color_name_hex, resolve_color, ColorRgba, ColorSpec};
pub use context::{Canvas, CanvasBuilder};
pub use curve::{FlatteningMode, PathSink, Point};
pub use drawing_state::DrawingState;
pub use error::{CanvasError, CanvasResult, ErrorKind};
pub use font::{Font, FontFamily, TextAlign, TextBaseline, TextMetrics};
pub use geometry::{
    ArcParams, CubicBezierParams, QuadraticBezierParams, RadialGradientParams, RectParams,
};
pub use gradient::{CanvasGradient, GradientStop, GradientType};
pub use matrix::Matrix;
pub use pattern::{CanvasPattern, Repetition};
pub use pixel::{AlphaMode, ChannelOrder, ImageData, PixelBuffer, PixelFormat, Rect};
pub use style::{CompositeOperation, FillStyle, LineCap, LineJoin};
pub use transfer::Surface;
