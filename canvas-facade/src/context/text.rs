//! Text drawing for Canvas.
//!
//! Text is shaped with cosmic-text and each glyph outline is turned into a
//! tiny-skia path, so fills, strokes, gradients, patterns and clipping behave
//! exactly as they do for ordinary paths.

use super::Canvas;
use crate::font::{Font, FontFamily, TextAlign, TextBaseline, TextMetrics};
use cosmic_text::{
    Attrs, Buffer, CacheKeyFlags, Command, Family, FontSystem, Metrics, Shaping, Style, Weight,
};
use tiny_skia::{FillRule, PathBuilder, Transform};

impl Canvas {
    /// Set the font. Fonts with a non-finite or non-positive size are ignored.
    pub fn set_font(&mut self, font: Font) {
        if font.size_px.is_finite() && font.size_px > 0.0 {
            log::debug!(target: "canvas", "font {}", font);
            self.state.font = font;
        } else {
            log::warn!(target: "canvas", "ignoring font size {}", font.size_px);
        }
    }

    pub fn font(&self) -> &Font {
        &self.state.font
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    pub fn text_align(&self) -> TextAlign {
        self.state.text_align
    }

    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    pub fn text_baseline(&self) -> TextBaseline {
        self.state.text_baseline
    }

    /// Measure text with the current font.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        let buffer = self.shape_text(text);
        let (width, ascent, descent) = line_extents(&buffer, self.state.font.size_px);
        TextMetrics {
            width,
            ascent,
            descent,
        }
    }

    /// Fill text with the fill style, anchored at `(x, y)`.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText \"{}\" {} {}", text, x, y);
        self.draw_text(text, x, y, true);
    }

    /// Stroke text outlines with the stroke style and line settings.
    pub fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "strokeText \"{}\" {} {}", text, x, y);
        self.draw_text(text, x, y, false);
    }

    fn shape_text(&mut self, text: &str) -> Buffer {
        let font = &self.state.font;
        let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        // Hinting off, matching how vector renderers place glyph outlines.
        let attrs = Attrs::new()
            .family(resolve_family(&self.font_system, &font.family))
            .weight(Weight(font.weight))
            .style(if font.italic {
                Style::Italic
            } else {
                Style::Normal
            })
            .cache_key_flags(CacheKeyFlags::DISABLE_HINTING);

        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, fill: bool) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let buffer = self.shape_text(text);
        let (width, ascent, descent) = line_extents(&buffer, self.state.font.size_px);
        let base_x = x + self.state.text_align.offset(width);
        let base_y = y + self.state.text_baseline.offset(ascent, descent);
        let transform: Transform = self.state.transform.into();

        // All glyphs go into one device-space path, like the current path.
        let mut outlines = PathBuilder::new();
        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let physical = glyph.physical((base_x, base_y), 1.0);
                let Some(commands) = self
                    .swash_cache
                    .get_outline_commands(&mut self.font_system, physical.cache_key)
                else {
                    continue;
                };
                let glyph_x = base_x + glyph.x + glyph.font_size * glyph.x_offset;
                let glyph_y = base_y + glyph.y - glyph.font_size * glyph.y_offset;
                let placement = Transform::from_translate(glyph_x, glyph_y).post_concat(transform);
                if let Some(path) = glyph_path(commands).and_then(|p| p.transform(placement)) {
                    outlines.push_path(&path);
                }
            }
        }
        let Some(path) = outlines.finish() else {
            return;
        };

        if fill {
            let style = self.state.fill_style.clone();
            self.with_paint_from_style(&style, |ctx, paint, mask| {
                ctx.pixmap
                    .fill_path(&path, paint, FillRule::Winding, Transform::identity(), mask);
            });
        } else {
            let stroke = tiny_skia::Stroke {
                width: self.state.line_width * self.state.transform.mean_scale(),
                line_cap: self.state.line_cap.into(),
                line_join: self.state.line_join.into(),
                miter_limit: self.state.miter_limit,
                dash: None,
            };
            let style = self.state.stroke_style.clone();
            self.with_paint_from_style(&style, |ctx, paint, mask| {
                ctx.pixmap
                    .stroke_path(&path, paint, &stroke, Transform::identity(), mask);
            });
        }
    }
}

/// Map a requested family to a cosmic-text family, falling back to
/// sans-serif for names no loaded face carries.
fn resolve_family<'a>(font_system: &FontSystem, family: &'a FontFamily) -> Family<'a> {
    match family {
        FontFamily::SansSerif => Family::SansSerif,
        FontFamily::Serif => Family::Serif,
        FontFamily::Monospace => Family::Monospace,
        FontFamily::Named(name) => {
            let installed = font_system
                .db()
                .faces()
                .any(|face| face.families.iter().any(|(family, _)| family == name));
            if installed {
                Family::Name(name)
            } else {
                log::debug!(target: "canvas", "font family {} not found, using sans-serif", name);
                Family::SansSerif
            }
        }
    }
}

/// Width, ascent and descent of the shaped text. Ascent and descent fall back
/// to 0.8 and 0.2 of the em size when nothing was laid out.
fn line_extents(buffer: &Buffer, size_px: f32) -> (f32, f32, f32) {
    let mut width: f32 = 0.0;
    let mut ascent: f32 = 0.0;
    let mut descent: f32 = 0.0;
    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
        ascent = ascent.max(run.line_y - run.line_top);
        descent = descent.max(run.line_top + run.line_height - run.line_y);
    }
    if ascent == 0.0 && descent == 0.0 {
        ascent = size_px * 0.8;
        descent = size_px * 0.2;
    }
    (width, ascent, descent)
}

/// Glyph outline as a path. Font units point up, so y is negated.
fn glyph_path(commands: &[Command]) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for cmd in commands {
        match cmd {
            Command::MoveTo(p) => pb.move_to(p.x, -p.y),
            Command::LineTo(p) => pb.line_to(p.x, -p.y),
            Command::QuadTo(ctrl, end) => pb.quad_to(ctrl.x, -ctrl.y, end.x, -end.y),
            Command::CurveTo(c1, c2, end) => pb.cubic_to(c1.x, -c1.y, c2.x, -c2.y, end.x, -end.y),
            Command::Close => pb.close(),
        }
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorRgba;
    use crate::geometry::RectParams;

    fn text_canvas(width: u32, height: u32) -> Canvas {
        Canvas::builder(width, height).background(None).build().unwrap()
    }

    /// Text tests need at least one installed face.
    fn has_fonts(ctx: &Canvas) -> bool {
        let installed = ctx.font_system.db().len() > 0;
        if !installed {
            eprintln!("no fonts installed, skipping text pixel checks");
        }
        installed
    }

    /// Bounding box (x0, y0, x1, y1) of pixels with non-zero alpha.
    fn inked_bounds(ctx: &Canvas) -> Option<(u32, u32, u32, u32)> {
        let data = ctx.get_image_data(0, 0, ctx.width(), ctx.height()).unwrap();
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..ctx.height() {
            for x in 0..ctx.width() {
                if data.pixel(x, y).is_some_and(|p| p[3] > 0) {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                    });
                }
            }
        }
        bounds
    }

    fn inked_count(ctx: &Canvas) -> usize {
        ctx.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    #[test]
    fn test_fill_text_draws_above_baseline() {
        let mut ctx = text_canvas(200, 60);
        if !has_fonts(&ctx) {
            return;
        }
        ctx.set_font(Font::new(FontFamily::SansSerif, 20.0));
        ctx.fill_text("Hello", 10.0, 40.0);

        let (x0, y0, x1, y1) = inked_bounds(&ctx).unwrap();
        assert!(x0 >= 9 && x1 < 120, "x range {}..{}", x0, x1);
        assert!(y0 >= 20 && y1 <= 41, "y range {}..{}", y0, y1);
        // Default fill is opaque black.
        assert!(ctx
            .pixmap
            .pixels()
            .iter()
            .any(|p| p.alpha() == 255 && p.red() == 0));
    }

    #[test]
    fn test_stroke_text_uses_stroke_style() {
        let mut ctx = text_canvas(200, 60);
        if !has_fonts(&ctx) {
            return;
        }
        ctx.set_font(Font::new(FontFamily::SansSerif, 30.0));
        ctx.set_stroke_style("#00ff00").unwrap();
        ctx.stroke_text("O", 10.0, 45.0);

        let data = ctx.get_image_data(0, 0, 200, 60).unwrap();
        let (x0, y0, x1, y1) = inked_bounds(&ctx).unwrap();
        // The outline is green and the counter of the O stays empty.
        assert!(data.data().chunks(4).all(|p| p[3] == 0 || (p[0] == 0 && p[2] == 0)));
        let center = data.pixel((x0 + x1) / 2, (y0 + y1) / 2).unwrap();
        assert_eq!(center[3], 0);
    }

    #[test]
    fn test_stroke_inks_less_than_fill() {
        let mut filled = text_canvas(200, 60);
        if !has_fonts(&filled) {
            return;
        }
        let mut stroked = text_canvas(200, 60);
        for ctx in [&mut filled, &mut stroked] {
            ctx.set_font(Font::new(FontFamily::SansSerif, 40.0).bold());
        }
        filled.fill_text("Wide", 5.0, 50.0);
        stroked.stroke_text("Wide", 5.0, 50.0);
        assert!(inked_count(&stroked) > 0);
        assert!(inked_count(&stroked) < inked_count(&filled));
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let mut ctx = text_canvas(50, 50);
        ctx.fill_text("", 10.0, 30.0);
        ctx.stroke_text("", 10.0, 30.0);
        ctx.fill_text("x", f32::NAN, 30.0);
        assert_eq!(inked_count(&ctx), 0);
    }

    #[test]
    fn test_text_with_gradient_fill() {
        let mut ctx = text_canvas(320, 120);
        if !has_fonts(&ctx) {
            return;
        }
        let mut gradient = ctx.create_linear_gradient(0.0, 0.0, 320.0, 0.0);
        gradient.add_color_stop(0.0, "#ff0000").unwrap();
        gradient.add_color_stop(1.0, "#0000ff").unwrap();
        ctx.set_fill_style_gradient(gradient);
        ctx.set_font(Font::new(FontFamily::SansSerif, 60.0).bold());
        ctx.fill_text("MMMMMMM", 0.0, 90.0);

        let data = ctx.get_image_data(0, 0, 320, 120).unwrap();
        let opaque: Vec<(u32, [u8; 4])> = (0..120)
            .flat_map(|y| (0..320).map(move |x| (x, y)))
            .filter_map(|(x, y)| data.pixel(x, y).map(|p| (x, p)))
            .filter(|(_, p)| p[3] == 255)
            .collect();
        let left = opaque.iter().find(|(x, _)| *x < 60).unwrap().1;
        let right = opaque.iter().rev().find(|(x, _)| *x > 200).unwrap().1;
        assert!(left[0] > left[2], "left {:?}", left);
        assert!(right[2] > right[0], "right {:?}", right);
    }

    #[test]
    fn test_text_follows_transform_and_clip() {
        let mut ctx = text_canvas(200, 100);
        if !has_fonts(&ctx) {
            return;
        }
        ctx.set_font(Font::new(FontFamily::SansSerif, 20.0));
        ctx.translate(100.0, 50.0);
        ctx.fill_text("Hi", 0.0, 0.0);
        let (x0, y0, _, y1) = inked_bounds(&ctx).unwrap();
        assert!(x0 >= 100 && y0 >= 30 && y1 <= 51, "bounds {:?}", (x0, y0, y1));

        let mut clipped = text_canvas(200, 100);
        clipped.set_font(Font::new(FontFamily::SansSerif, 40.0));
        clipped.rect(&RectParams::new(0.0, 0.0, 200.0, 40.0));
        clipped.clip();
        clipped.fill_text("Hello", 10.0, 60.0);
        let (_, _, _, y1) = inked_bounds(&clipped).unwrap();
        assert!(y1 < 40);
    }

    #[test]
    fn test_text_align_center() {
        let mut ctx = text_canvas(200, 60);
        if !has_fonts(&ctx) {
            return;
        }
        ctx.set_font(Font::new(FontFamily::SansSerif, 20.0));
        let width = ctx.measure_text("Center").width;
        assert!(width > 20.0);

        ctx.set_text_align(TextAlign::Center);
        ctx.fill_text("Center", 100.0, 40.0);
        let (x0, _, x1, _) = inked_bounds(&ctx).unwrap();
        let mid = (x0 + x1) as f32 / 2.0;
        assert!((mid - 100.0).abs() < 4.0, "ink centered at {}", mid);
    }

    #[test]
    fn test_measure_text_scales_with_size() {
        let mut ctx = text_canvas(10, 10);
        if !has_fonts(&ctx) {
            return;
        }
        ctx.set_font(Font::new(FontFamily::SansSerif, 10.0));
        let small = ctx.measure_text("Hello World!");
        ctx.set_font(Font::new(FontFamily::SansSerif, 20.0));
        let large = ctx.measure_text("Hello World!");
        assert!(small.width > 0.0);
        assert!((large.width / small.width - 2.0).abs() < 0.1);
        assert!(large.ascent > large.descent);
        assert_eq!(ctx.measure_text("").width, 0.0);
    }

    #[test]
    fn test_font_state_save_restore() {
        let mut ctx = text_canvas(10, 10);
        assert_eq!(*ctx.font(), Font::default());
        ctx.set_font(Font::named("Georgia", 20.0));
        ctx.set_text_align(TextAlign::Right);
        ctx.save();

        ctx.set_font(Font::named("Verdana", 30.0));
        ctx.set_text_baseline(TextBaseline::Top);
        ctx.set_font(Font::new(FontFamily::Serif, 0.0));
        ctx.set_font(Font::new(FontFamily::Serif, f32::NAN));
        assert_eq!(*ctx.font(), Font::named("Verdana", 30.0));

        ctx.restore();
        assert_eq!(*ctx.font(), Font::named("Georgia", 20.0));
        assert_eq!(ctx.text_align(), TextAlign::Right);
        assert_eq!(ctx.text_baseline(), TextBaseline::Alphabetic);
    }

    #[test]
    fn test_unknown_family_falls_back() {
        let mut ctx = text_canvas(200, 60);
        if !has_fonts(&ctx) {
            return;
        }
        ctx.set_font(Font::named("No Such Family 1234", 20.0));
        ctx.set_fill_style_argb(ColorRgba::BLACK.to_argb_u32());
        ctx.fill_text("Fallback", 10.0, 40.0);
        assert!(inked_count(&ctx) > 0);
    }
}
