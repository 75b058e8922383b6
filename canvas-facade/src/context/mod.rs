//! Canvas 2D rendering context implementation.

mod drawing;
mod image_ops;
mod path_ops;
mod text;
mod transform;

use crate::color::{resolve_color, ColorRgba};
use crate::curve::FlatteningMode;
use crate::drawing_state::DrawingState;
use crate::error::{CanvasError, CanvasResult};
use crate::font;
use crate::geometry::RadialGradientParams;
use crate::gradient::{CanvasGradient, GradientType};
use crate::path::DevicePath;
use crate::pattern::{CanvasPattern, Repetition};
use crate::pixel::{PixelBuffer, PixelFormat};
use crate::style::{CompositeOperation, FillStyle, LineCap, LineJoin};
use crate::transfer::{self, Surface};
use std::path::Path;
use cosmic_text::{FontSystem, SwashCache};
use std::path::PathBuf;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Maximum canvas dimension (same as Chrome).
const MAX_DIMENSION: u32 = 32767;

/// Builder for [`Canvas`].
#[derive(Debug, Clone)]
pub struct CanvasBuilder {
    width: u32,
    height: u32,
    background: Option<ColorRgba>,
    flattening: FlatteningMode,
    image_format: PixelFormat,
    load_system_fonts: bool,
    font_data: Vec<Vec<u8>>,
}

impl CanvasBuilder {
    /// Create a new builder with specified dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(ColorRgba::WHITE),
            flattening: FlatteningMode::default(),
            image_format: PixelFormat::RGBA8,
            load_system_fonts: true,
            font_data: Vec::new(),
        }
    }

    /// Initial fill of the surface. `None` leaves it transparent.
    pub fn background(mut self, color: Option<ColorRgba>) -> Self {
        self.background = color;
        self
    }

    /// How `bezier_curve_to` and `quadratic_curve_to` flatten curves.
    pub fn flattening(mut self, mode: FlatteningMode) -> Self {
        self.flattening = mode;
        self
    }

    /// Pixel format of `ImageData` handed out by the canvas.
    pub fn image_format(mut self, format: PixelFormat) -> Self {
        self.image_format = format;
        self
    }

    /// Whether text can use installed system fonts (default: true).
    pub fn load_system_fonts(mut self, load: bool) -> Self {
        self.load_system_fonts = load;
        self
    }

    /// Register a TTF/OTF font from memory for text drawing.
    pub fn font_data(mut self, data: Vec<u8>) -> Self {
        self.font_data.push(data);
        self
    }

    /// Read a TTF/OTF font file and register it for text drawing.
    pub fn font_file(self, path: impl Into<PathBuf>) -> CanvasResult<Self> {
        let data = std::fs::read(path.into())?;
        Ok(self.font_data(data))
    }

    pub fn build(self) -> CanvasResult<Canvas> {
        Canvas::new_internal(self)
    }
}

/// Canvas 2D rendering context over a tiny-skia pixmap.
pub struct Canvas {
    /// Width of the canvas in pixels.
    pub(crate) width: u32,
    /// Height of the canvas in pixels.
    pub(crate) height: u32,
    /// Premultiplied RGBA backing store.
    pub(crate) pixmap: Pixmap,
    /// Current drawing state.
    pub(crate) state: DrawingState,
    /// Stack of saved drawing states.
    state_stack: Vec<DrawingState>,
    /// Current path, in device space.
    pub(crate) path: DevicePath,
    pub(crate) flattening: FlatteningMode,
    pub(crate) image_format: PixelFormat,
    /// Fonts available to text drawing.
    pub(crate) font_system: FontSystem,
    /// Glyph outline cache.
    pub(crate) swash_cache: SwashCache,
}

impl Canvas {
    /// Create a white canvas with a black fill style.
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        CanvasBuilder::new(width, height).build()
    }

    /// Create a new builder for more configuration options.
    pub fn builder(width: u32, height: u32) -> CanvasBuilder {
        CanvasBuilder::new(width, height)
    }

    fn new_internal(config: CanvasBuilder) -> CanvasResult<Self> {
        let CanvasBuilder {
            width,
            height,
            background,
            flattening,
            image_format,
            load_system_fonts,
            font_data,
        } = config;

        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(CanvasError::InvalidDimensions { width, height });
        }

        let mut pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::InvalidDimensions { width, height })?;
        if let Some(color) = background {
            pixmap.fill(color.into());
        }
        log::debug!(target: "canvas", "new canvas {}x{} background {:?}", width, height, background);

        let font_db = font::font_database(load_system_fonts, &font_data);
        let font_system = FontSystem::new_with_locale_and_db("en".to_string(), font_db);

        Ok(Self {
            width,
            height,
            pixmap,
            state: DrawingState::default(),
            state_stack: Vec::new(),
            path: DevicePath::new(),
            flattening,
            image_format,
            font_system,
            swash_cache: SwashCache::new(),
        })
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn flattening(&self) -> FlatteningMode {
        self.flattening
    }

    pub fn set_flattening(&mut self, mode: FlatteningMode) {
        self.flattening = mode;
    }

    /// Save the current drawing state.
    pub fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
    }

    /// Restore the previously saved drawing state. Does nothing when the stack is empty.
    pub fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    // --- Style setters ---

    /// Set the fill style from CSS color text.
    pub fn set_fill_style(&mut self, style: &str) -> CanvasResult<()> {
        let color = resolve_color(style)?;
        log::debug!(target: "canvas", "fillStyle {}", color);
        self.state.fill_style = FillStyle::Color(color);
        Ok(())
    }

    /// Set the fill style from a packed `0xAARRGGBB` value.
    pub fn set_fill_style_argb(&mut self, argb: u32) {
        self.state.fill_style = FillStyle::Color(ColorRgba::from_argb_u32(argb));
    }

    pub fn fill_style(&self) -> &FillStyle {
        &self.state.fill_style
    }

    /// Set the stroke style from CSS color text.
    pub fn set_stroke_style(&mut self, style: &str) -> CanvasResult<()> {
        let color = resolve_color(style)?;
        log::debug!(target: "canvas", "strokeStyle {}", color);
        self.state.stroke_style = FillStyle::Color(color);
        Ok(())
    }

    /// Set the stroke style from a packed `0xAARRGGBB` value.
    pub fn set_stroke_style_argb(&mut self, argb: u32) {
        self.state.stroke_style = FillStyle::Color(ColorRgba::from_argb_u32(argb));
    }

    pub fn stroke_style(&self) -> &FillStyle {
        &self.state.stroke_style
    }

    /// Set the line width. Non-finite or non-positive values are ignored.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        } else {
            log::warn!(target: "canvas", "ignoring line width {}", width);
        }
    }

    pub fn line_width(&self) -> f32 {
        self.state.line_width
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    /// Set the miter limit. Non-finite or non-positive values are ignored.
    pub fn set_miter_limit(&mut self, limit: f32) {
        if limit.is_finite() && limit > 0.0 {
            self.state.miter_limit = limit;
        } else {
            log::warn!(target: "canvas", "ignoring miter limit {}", limit);
        }
    }

    /// Set the global composite operation by name.
    ///
    /// Unknown names are ignored and the previous mode is kept.
    /// Returns true if the value was accepted.
    pub fn set_global_composite_operation(&mut self, op: &str) -> bool {
        match op.parse::<CompositeOperation>() {
            Ok(mode) => {
                self.state.global_composite_operation = mode;
                true
            }
            Err(err) => {
                log::warn!(target: "canvas", "{}", err);
                false
            }
        }
    }

    pub fn global_composite_operation(&self) -> CompositeOperation {
        self.state.global_composite_operation
    }

    // --- Shadows (recorded in the state, not rendered) ---

    pub fn set_shadow_offset_x(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.shadow_offset_x = offset;
        }
    }

    pub fn set_shadow_offset_y(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.shadow_offset_y = offset;
        }
    }

    pub fn set_shadow_blur(&mut self, blur: u32) {
        self.state.shadow_blur = blur;
    }

    /// Set the shadow color from CSS color text, typically `rgba(r, g, b, a)`.
    pub fn set_shadow_color(&mut self, color: &str) -> CanvasResult<()> {
        self.state.shadow_color = Some(resolve_color(color)?);
        Ok(())
    }

    pub fn clear_shadow_color(&mut self) {
        self.state.shadow_color = None;
    }

    pub fn shadow_offset(&self) -> (f32, f32) {
        (self.state.shadow_offset_x, self.state.shadow_offset_y)
    }

    pub fn shadow_blur(&self) -> u32 {
        self.state.shadow_blur
    }

    pub fn shadow_color(&self) -> Option<ColorRgba> {
        self.state.shadow_color
    }

    // --- Gradients ---

    pub fn create_linear_gradient(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> CanvasGradient {
        CanvasGradient::new_linear(x0, y0, x1, y1)
    }

    /// Create a radial gradient between two circles.
    ///
    /// The rasterizer only supports a zero inner radius: `r0` is ignored with
    /// a warning when drawing, and the gradient starts at the point `(x0, y0)`.
    pub fn create_radial_gradient(&self, params: &RadialGradientParams) -> CanvasGradient {
        CanvasGradient::new_radial(params)
    }

    /// Set the fill style to a gradient.
    pub fn set_fill_style_gradient(&mut self, gradient: CanvasGradient) {
        self.state.fill_style = gradient_style(gradient);
    }

    /// Set the stroke style to a gradient.
    pub fn set_stroke_style_gradient(&mut self, gradient: CanvasGradient) {
        self.state.stroke_style = gradient_style(gradient);
    }

    // --- Patterns ---

    /// Create a pattern from image data.
    pub fn create_pattern(
        &self,
        image: PixelBuffer,
        repetition: Repetition,
    ) -> CanvasResult<Arc<CanvasPattern>> {
        log::debug!(target: "canvas", "createPattern {}x{} {}", image.width(), image.height(), repetition);
        Ok(Arc::new(CanvasPattern::new(image, repetition)?))
    }

    /// Decode an image file and create a pattern from it.
    pub fn create_pattern_from_file(
        &self,
        path: impl AsRef<Path>,
        repetition: Repetition,
    ) -> CanvasResult<Arc<CanvasPattern>> {
        let image = transfer::decode_image_file(path)?.to_rgba8();
        let (width, height) = image.dimensions();
        let buffer = PixelBuffer::from_vec(width, height, PixelFormat::RGBA8, image.into_raw())?;
        self.create_pattern(buffer, repetition)
    }

    /// Set the fill style to a pattern.
    pub fn set_fill_style_pattern(&mut self, pattern: Arc<CanvasPattern>) {
        self.state.fill_style = FillStyle::Pattern(pattern);
    }

    /// Set the stroke style to a pattern.
    pub fn set_stroke_style_pattern(&mut self, pattern: Arc<CanvasPattern>) {
        self.state.stroke_style = FillStyle::Pattern(pattern);
    }
}

fn gradient_style(gradient: CanvasGradient) -> FillStyle {
    match gradient.gradient_type {
        GradientType::Linear { .. } => FillStyle::LinearGradient(gradient),
        GradientType::Radial(_) => FillStyle::RadialGradient(gradient),
    }
}

/// The canvas backing store, exposed for pixel transfers.
impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> PixelFormat {
        PixelFormat::RGBA8_PREMULTIPLIED
    }

    fn pixels(&self) -> &[u8] {
        self.pixmap.data()
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_mut()
    }

    fn mark_dirty(&mut self) {
        log::trace!(target: "canvas", "surface updated");
    }
}
