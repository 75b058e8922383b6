//! Drawing state that can be saved and restored.

use crate::color::ColorRgba;
use crate::font::{Font, TextAlign, TextBaseline};
use crate::matrix::Matrix;
use crate::style::{CompositeOperation, FillStyle, LineCap, LineJoin};

/// Drawing state that can be saved and restored.
#[derive(Debug, Clone)]
pub struct DrawingState {
    /// Current fill style.
    pub fill_style: FillStyle,
    /// Current stroke style.
    pub stroke_style: FillStyle,
    /// Current line width.
    pub line_width: f32,
    /// Current line cap style.
    pub line_cap: LineCap,
    /// Current line join style.
    pub line_join: LineJoin,
    /// Current miter limit.
    pub miter_limit: f32,
    /// Current global composite operation.
    pub global_composite_operation: CompositeOperation,
    pub shadow_offset_x: f32,
    pub shadow_offset_y: f32,
    pub shadow_blur: u32,
    /// `None` until a shadow color is set; distinct from transparent black.
    pub shadow_color: Option<ColorRgba>,
    pub font: Font,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    /// Current transform matrix.
    pub transform: Matrix,
    /// Clip paths in device space; the clip region is their intersection.
    pub clip_paths: Vec<tiny_skia::Path>,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: FillStyle::default(),
            stroke_style: FillStyle::default(),
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            global_composite_operation: CompositeOperation::default(),
            shadow_offset_x: 0.0,
            shadow_offset_y: 0.0,
            shadow_blur: 0,
            shadow_color: None,
            font: Font::default(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
            transform: Matrix::identity(),
            clip_paths: Vec::new(),
        }
    }
}
