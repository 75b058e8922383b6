//! Parameter structs for canvas drawing operations.
//!
//! These group the positional arguments of the browser API into named fields.

use crate::curve::Point;

/// Parameters for a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    /// X coordinate of the arc center.
    pub x: f32,
    /// Y coordinate of the arc center.
    pub y: f32,
    /// Radius of the arc.
    pub radius: f32,
    /// Starting angle in radians.
    pub start_angle: f32,
    /// Ending angle in radians.
    pub end_angle: f32,
    /// If true, draw arc counterclockwise.
    pub anticlockwise: bool,
}

/// Parameters for a cubic Bezier curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierParams {
    /// First control point X.
    pub cp1x: f32,
    /// First control point Y.
    pub cp1y: f32,
    /// Second control point X.
    pub cp2x: f32,
    /// Second control point Y.
    pub cp2y: f32,
    /// End point X.
    pub x: f32,
    /// End point Y.
    pub y: f32,
}

impl CubicBezierParams {
    pub(crate) fn points(&self) -> [Point; 3] {
        [
            point(self.cp1x, self.cp1y),
            point(self.cp2x, self.cp2y),
            point(self.x, self.y),
        ]
    }
}

/// Parameters for a quadratic Bezier curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezierParams {
    /// Control point X.
    pub cpx: f32,
    /// Control point Y.
    pub cpy: f32,
    /// End point X.
    pub x: f32,
    /// End point Y.
    pub y: f32,
}

impl QuadraticBezierParams {
    pub(crate) fn points(&self) -> [Point; 2] {
        [point(self.cpx, self.cpy), point(self.x, self.y)]
    }
}

/// Parameters for a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    /// X coordinate of the rectangle origin.
    pub x: f32,
    /// Y coordinate of the rectangle origin.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl RectParams {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Corners in drawing order, starting at the origin.
    pub(crate) fn corners(&self) -> [(f32, f32); 4] {
        [
            (self.x, self.y),
            (self.x + self.width, self.y),
            (self.x + self.width, self.y + self.height),
            (self.x, self.y + self.height),
        ]
    }
}

/// Parameters for creating a radial gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradientParams {
    /// Inner circle center X.
    pub x0: f32,
    /// Inner circle center Y.
    pub y0: f32,
    /// Inner circle radius.
    pub r0: f32,
    /// Outer circle center X.
    pub x1: f32,
    /// Outer circle center Y.
    pub y1: f32,
    /// Outer circle radius.
    pub r1: f32,
}

fn point(x: f32, y: f32) -> Point {
    Point::new(x as f64, y as f64)
}
