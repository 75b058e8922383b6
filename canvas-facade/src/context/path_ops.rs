//! Path building operations for Canvas.

use super::Canvas;
use crate::curve::{self, PathSink, Point};
use crate::error::CanvasResult;
use crate::geometry::{ArcParams, CubicBezierParams, QuadraticBezierParams, RectParams};
use crate::path::DevicePath;

impl Canvas {
    /// Begin a new path.
    pub fn begin_path(&mut self) {
        log::debug!(target: "canvas", "beginPath");
        self.path = DevicePath::new();
    }

    /// Map a user-space point by the current transformation matrix.
    pub(crate) fn transform_point(&self, x: f32, y: f32) -> Point {
        self.state.transform.apply(Point::new(x as f64, y as f64))
    }

    /// Current point of the path in device space.
    pub fn current_point(&self) -> Option<Point> {
        self.path.current_point()
    }

    /// Move to a point without drawing.
    pub fn move_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "moveTo {} {}", x, y);
        let p = self.transform_point(x, y);
        self.path.move_to(p);
    }

    /// Draw a line to a point. Without a current point this acts as `move_to`.
    pub fn line_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "lineTo {} {}", x, y);
        let p = self.transform_point(x, y);
        self.path.line_to(p);
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) {
        log::debug!(target: "canvas", "closePath");
        self.path.close();
    }

    /// Add a cubic Bezier curve, flattened with the canvas' flattening mode.
    ///
    /// Fails when the path has no current point.
    pub fn bezier_curve_to(&mut self, params: &CubicBezierParams) -> CanvasResult<()> {
        log::debug!(
            target: "canvas",
            "bezierCurveTo {} {} {} {} {} {}",
            params.cp1x, params.cp1y, params.cp2x, params.cp2y, params.x, params.y
        );
        let [cp1, cp2, end] = params.points().map(|p| self.state.transform.apply(p));
        curve::cubic_bezier_to(&mut self.path, cp1, cp2, end, self.flattening)
    }

    /// Add a quadratic Bezier curve, flattened with the canvas' flattening mode.
    ///
    /// Fails when the path has no current point.
    pub fn quadratic_curve_to(&mut self, params: &QuadraticBezierParams) -> CanvasResult<()> {
        log::debug!(
            target: "canvas",
            "quadraticCurveTo {} {} {} {}",
            params.cpx, params.cpy, params.x, params.y
        );
        let [cp, end] = params.points().map(|p| self.state.transform.apply(p));
        curve::quadratic_bezier_to(&mut self.path, cp, end, self.flattening)
    }

    /// Add a rectangle to the path as a closed subpath.
    pub fn rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "rect {} {} {} {}", params.x, params.y, params.width, params.height);
        let [p0, p1, p2, p3] = params
            .corners()
            .map(|(x, y)| self.transform_point(x, y));

        self.path.move_to(p0);
        self.path.line_to(p1);
        self.path.line_to(p2);
        self.path.line_to(p3);
        self.path.close();
    }

    /// Add an arc to the path, connected to the current point by a line.
    pub fn arc(&mut self, params: &ArcParams) {
        log::debug!(
            target: "canvas",
            "arc {} {} {} {} {} {}",
            params.x, params.y, params.radius, params.start_angle, params.end_angle, params.anticlockwise
        );
        if !params.radius.is_finite() || params.radius < 0.0 {
            log::warn!(target: "canvas", "ignoring arc with radius {}", params.radius);
            return;
        }

        let mut arc_builder = tiny_skia::PathBuilder::new();
        crate::arc::arc(&mut arc_builder, params);

        match arc_builder.finish() {
            Some(path) => self
                .path
                .append(&path, self.state.transform.into(), true),
            None => {
                // Zero radius or zero sweep: the arc is just its start point.
                let start = Point::new(
                    (params.x + params.radius * params.start_angle.cos()) as f64,
                    (params.y + params.radius * params.start_angle.sin()) as f64,
                );
                let start = self.state.transform.apply(start);
                self.path.line_to(start);
            }
        }
    }
}
