//! Fill, stroke, clip, and paint helper operations for Canvas.

use super::Canvas;
use crate::geometry::RectParams;
use crate::gradient::{CanvasGradient, GradientType};
use crate::pattern::{CanvasPattern, Repetition};
use crate::style::FillStyle;
use tiny_skia::{FillRule, Mask, PathBuilder, Transform};

impl Canvas {
    // --- Clipping ---

    /// Intersect the clipping region with the current path.
    pub fn clip(&mut self) {
        log::debug!(target: "canvas", "clip");
        if let Some(path) = self.path.to_path() {
            self.state.clip_paths.push(path);
        }
    }

    /// Whether the device-space point lies inside the current path (non-zero rule).
    ///
    /// Points outside the canvas are never inside.
    pub fn is_point_in_path(&self, x: f32, y: f32) -> bool {
        if !(x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32) {
            return false;
        }
        let Some(path) = self.path.to_path() else {
            return false;
        };
        let Some(mut mask) = tiny_skia::Mask::new(self.width, self.height) else {
            return false;
        };
        mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
        let idx = y as usize * self.width as usize + x as usize;
        mask.data()[idx] > 0
    }

    // --- Drawing operations ---

    /// Fill the current path using the non-zero winding rule.
    pub fn fill(&mut self) {
        log::debug!(target: "canvas", "fill");
        let Some(path) = self.path.to_path() else {
            return;
        };
        // Path coordinates are already in device space
        let style = self.state.fill_style.clone();
        self.with_paint_from_style(&style, |ctx, paint, mask| {
            ctx.pixmap
                .fill_path(&path, paint, FillRule::Winding, Transform::identity(), mask);
        });
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) {
        log::debug!(target: "canvas", "stroke");
        let Some(path) = self.path.to_path() else {
            return;
        };

        // The path is pre-transformed but the line width is in user space.
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

    /// Fill a rectangle. The current path is replaced.
    pub fn fill_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "fillRect {} {} {} {}", params.x, params.y, params.width, params.height);
        self.begin_path();
        self.rect(params);
        self.fill();
    }

    /// Stroke a rectangle. The current path is replaced.
    pub fn stroke_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "strokeRect {} {} {} {}", params.x, params.y, params.width, params.height);
        self.begin_path();
        self.rect(params);
        self.stroke();
    }

    /// Clear a rectangle to transparent black. The current path is kept.
    pub fn clear_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "clearRect {} {} {} {}", params.x, params.y, params.width, params.height);
        let [p0, p1, p2, p3] = params
            .corners()
            .map(|(x, y)| self.transform_point(x, y));

        let mut pb = tiny_skia::PathBuilder::new();
        pb.move_to(p0.x as f32, p0.y as f32);
        pb.line_to(p1.x as f32, p1.y as f32);
        pb.line_to(p2.x as f32, p2.y as f32);
        pb.line_to(p3.x as f32, p3.y as f32);
        pb.close();

        if let Some(path) = pb.finish() {
            let paint = tiny_skia::Paint {
                blend_mode: tiny_skia::BlendMode::Clear,
                ..Default::default()
            };
            let clip_mask = self.create_clip_mask();
            self.pixmap.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                clip_mask.as_ref(),
            );
        }
    }

    // --- Private paint helpers ---

    pub(crate) fn create_clip_mask(&self) -> Option<tiny_skia::Mask> {
        let (first, rest) = self.state.clip_paths.split_first()?;
        let mut mask = tiny_skia::Mask::new(self.width, self.height)?;
        mask.fill_path(first, FillRule::Winding, true, Transform::identity());
        for path in rest {
            mask.intersect_path(path, FillRule::Winding, true, Transform::identity());
        }
        Some(mask)
    }

    /// Build a paint and mask for `style` and hand them to `draw`.
    ///
    /// The mask is the clip region, further limited to the tile extent for
    /// non-repeating patterns. Returns `None` without drawing when the style
    /// cannot produce a shader, e.g. a gradient with no stops.
    pub(crate) fn with_paint_from_style<R>(
        &mut self,
        style: &FillStyle,
        draw: impl for<'a> FnOnce(&mut Self, &tiny_skia::Paint<'a>, Option<&Mask>) -> R,
    ) -> Option<R> {
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            blend_mode: self.state.global_composite_operation.into(),
            ..Default::default()
        };
        let clip_mask = self.create_clip_mask();

        match style {
            FillStyle::Color(color) => {
                paint.set_color((*color).into());
                Some(draw(self, &paint, clip_mask.as_ref()))
            }
            FillStyle::LinearGradient(gradient) | FillStyle::RadialGradient(gradient) => {
                paint.shader = self.create_gradient_shader(gradient)?;
                Some(draw(self, &paint, clip_mask.as_ref()))
            }
            FillStyle::Pattern(pattern) => {
                let transform: Transform = self.state.transform.into();
                let mask = if pattern.repetition() == Repetition::Repeat {
                    clip_mask
                } else {
                    Some(self.pattern_extent_mask(pattern, transform, clip_mask)?)
                };
                paint.shader = pattern.shader(transform);
                Some(draw(self, &paint, mask.as_ref()))
            }
        }
    }

    /// Intersect `clip_mask` (or the whole canvas) with the device-space
    /// outline of the pattern's non-repeating extent.
    fn pattern_extent_mask(
        &self,
        pattern: &CanvasPattern,
        transform: Transform,
        clip_mask: Option<Mask>,
    ) -> Option<Mask> {
        // The canvas bounds in pattern space decide how far repeating axes reach.
        let inverse = transform.invert()?;
        let mut corners = [
            tiny_skia::Point::from_xy(0.0, 0.0),
            tiny_skia::Point::from_xy(self.width as f32, 0.0),
            tiny_skia::Point::from_xy(self.width as f32, self.height as f32),
            tiny_skia::Point::from_xy(0.0, self.height as f32),
        ];
        inverse.map_points(&mut corners);
        let visible = tiny_skia::Rect::from_points(&corners)?;
        let extent = PathBuilder::from_rect(pattern.extent(visible)?);

        match clip_mask {
            Some(mut mask) => {
                mask.intersect_path(&extent, FillRule::Winding, true, transform);
                Some(mask)
            }
            None => {
                let mut mask = Mask::new(self.width, self.height)?;
                mask.fill_path(&extent, FillRule::Winding, true, transform);
                Some(mask)
            }
        }
    }

    pub(crate) fn create_gradient_shader(
        &self,
        gradient: &CanvasGradient,
    ) -> Option<tiny_skia::Shader<'static>> {
        if gradient.stops().is_empty() {
            return None;
        }

        let stops: Vec<tiny_skia::GradientStop> = gradient
            .stops()
            .iter()
            .map(|stop| tiny_skia::GradientStop::new(stop.offset as f32, stop.color.into()))
            .collect();
        let transform: Transform = self.state.transform.into();

        match &gradient.gradient_type {
            GradientType::Linear { x0, y0, x1, y1 } => tiny_skia::LinearGradient::new(
                tiny_skia::Point { x: *x0, y: *y0 },
                tiny_skia::Point { x: *x1, y: *y1 },
                stops,
                tiny_skia::SpreadMode::Pad,
                transform,
            ),
            GradientType::Radial(params) => {
                if params.r0 != 0.0 {
                    log::warn!(
                        target: "canvas",
                        "radial gradient inner radius {} is not supported, drawing with 0",
                        params.r0
                    );
                }
                tiny_skia::RadialGradient::new(
                    tiny_skia::Point {
                        x: params.x0,
                        y: params.y0,
                    },
                    tiny_skia::Point {
                        x: params.x1,
                        y: params.y1,
                    },
                    params.r1,
                    stops,
                    tiny_skia::SpreadMode::Pad,
                    transform,
                )
            }
        }
    }
}
