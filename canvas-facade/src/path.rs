//! Device-space path under construction.

use crate::curve::{PathSink, Point};
use tiny_skia::{PathBuilder, PathSegment, Transform};

/// The canvas' current path, with coordinates already mapped to device space.
#[derive(Debug, Clone, Default)]
pub(crate) struct DevicePath {
    builder: PathBuilder,
    current: Option<Point>,
    subpath_start: Point,
}

impl DevicePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) {
        self.builder.move_to(p.x as f32, p.y as f32);
        self.current = Some(p);
        self.subpath_start = p;
    }

    pub fn close(&mut self) {
        if self.current.is_some() {
            self.builder.close();
            self.current = Some(self.subpath_start);
        }
    }

    /// Snapshot the path for rendering without consuming it.
    pub fn to_path(&self) -> Option<tiny_skia::Path> {
        self.builder.clone().finish()
    }

    /// Append a path built in user space, mapping each point with `transform`.
    ///
    /// With `connect` set, the first move of `path` becomes a line from the
    /// current point when there is one.
    pub fn append(&mut self, path: &tiny_skia::Path, transform: Transform, connect: bool) {
        let map = |p: tiny_skia::Point| {
            let mut p = p;
            transform.map_point(&mut p);
            p
        };
        let mut first = true;

        for segment in path.segments() {
            match segment {
                PathSegment::MoveTo(p) => {
                    let p = map(p);
                    if first && connect && self.current.is_some() {
                        self.line_to(to_point(p));
                    } else {
                        self.move_to(to_point(p));
                    }
                    first = false;
                }
                PathSegment::LineTo(p) => self.line_to(to_point(map(p))),
                PathSegment::QuadTo(c, p) => {
                    let (c, p) = (map(c), map(p));
                    self.builder.quad_to(c.x, c.y, p.x, p.y);
                    self.current = Some(to_point(p));
                }
                PathSegment::CubicTo(c1, c2, p) => {
                    let (c1, c2, p) = (map(c1), map(c2), map(p));
                    self.builder.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
                    self.current = Some(to_point(p));
                }
                PathSegment::Close => self.close(),
            }
        }
    }
}

impl PathSink for DevicePath {
    fn current_point(&self) -> Option<Point> {
        self.current
    }

    fn line_to(&mut self, p: Point) {
        if self.current.is_none() {
            self.move_to(p);
            return;
        }
        self.builder.line_to(p.x as f32, p.y as f32);
        self.current = Some(p);
    }
}

fn to_point(p: tiny_skia::Point) -> Point {
    Point::new(p.x as f64, p.y as f64)
}
