//! Bezier curve flattening.
//!
//! Curves are turned into line segments appended to a [`PathSink`]. Two
//! strategies share one entry point:
//!
//! - [`FlatteningMode::FixedStep`] samples the curve at `u = 0, 0.0001, ..., 1`
//!   and always emits exactly [`FIXED_STEP_SAMPLES`] points. Output is
//!   independent of curve size, which keeps golden-image comparisons stable.
//! - [`FlatteningMode::Adaptive`] bisects the control polygon until it lies
//!   within `tolerance` of its chord, emitting far fewer segments.
//!
//! Both evaluate a Bezier of any degree from its control points, so cubic and
//! quadratic curves go through the same code.

use crate::error::{CanvasError, CanvasResult};

pub use kurbo::Point;

/// Parameter step of fixed-step flattening.
pub const FIXED_STEP: f64 = 0.0001;

/// Number of samples emitted per curve by fixed-step flattening.
pub const FIXED_STEP_SAMPLES: usize = FIXED_STEPS as usize + 1;

const FIXED_STEPS: u32 = 10_000;

/// Tolerance used when an adaptive mode is given a non-positive one.
pub const DEFAULT_TOLERANCE: f64 = 0.25;

/// Bisection depth limit for adaptive flattening (at most 2^16 segments).
const MAX_DEPTH: u32 = 16;

/// How curves are approximated by line segments.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FlatteningMode {
    /// Uniform parametric sampling at [`FIXED_STEP`].
    #[default]
    FixedStep,
    /// Recursive bisection until the control polygon is within `tolerance`
    /// device pixels of the chord.
    Adaptive { tolerance: f64 },
}

impl FlatteningMode {
    pub fn adaptive(tolerance: f64) -> Self {
        FlatteningMode::Adaptive { tolerance }
    }
}

/// Receiver of flattened geometry.
pub trait PathSink {
    /// The point the next segment starts from, if one is established.
    fn current_point(&self) -> Option<Point>;
    /// Append a straight segment ending at `p`; `p` becomes the current point.
    fn line_to(&mut self, p: Point);
}

/// A plain polyline: the last pushed point is the current point.
impl PathSink for Vec<Point> {
    fn current_point(&self) -> Option<Point> {
        self.last().copied()
    }

    fn line_to(&mut self, p: Point) {
        self.push(p);
    }
}

/// Evaluate the Bezier curve with the given control points at `u` using the
/// Bernstein basis of degree `control.len() - 1`.
pub fn bernstein_point(control: &[Point], u: f64) -> Point {
    let Some(degree) = control.len().checked_sub(1) else {
        return Point::ZERO;
    };
    let v = 1.0 - u;
    let mut binomial = 1.0;
    let (mut x, mut y) = (0.0, 0.0);
    for (i, p) in control.iter().enumerate() {
        let weight = binomial * u.powi(i as i32) * v.powi((degree - i) as i32);
        x += weight * p.x;
        y += weight * p.y;
        binomial = binomial * (degree - i) as f64 / (i + 1) as f64;
    }
    Point::new(x, y)
}

/// Flatten the curve defined by `control` and pass every produced point to
/// `emit` in order.
///
/// Fixed-step output starts with the first control point. Adaptive output
/// starts after it. Both end exactly on the last control point.
pub fn flatten<const N: usize>(
    control: &[Point; N],
    mode: FlatteningMode,
    mut emit: impl FnMut(Point),
) {
    if N < 2 {
        if let Some(p) = control.last() {
            emit(*p);
        }
        return;
    }

    match mode {
        FlatteningMode::FixedStep => {
            // Integer stepping so the last sample is exactly u = 1.
            for i in 0..=FIXED_STEPS {
                let u = i as f64 / FIXED_STEPS as f64;
                emit(bernstein_point(control, u));
            }
        }
        FlatteningMode::Adaptive { tolerance } => {
            let tolerance = if tolerance.is_finite() && tolerance > 0.0 {
                tolerance
            } else {
                DEFAULT_TOLERANCE
            };
            subdivide(control, tolerance, 0, &mut emit);
        }
    }
}

/// Collect the output of [`flatten`].
pub fn flatten_to_vec<const N: usize>(control: &[Point; N], mode: FlatteningMode) -> Vec<Point> {
    let mut points = match mode {
        FlatteningMode::FixedStep => Vec::with_capacity(FIXED_STEP_SAMPLES),
        FlatteningMode::Adaptive { .. } => Vec::new(),
    };
    flatten(control, mode, |p| points.push(p));
    points
}

/// Append a cubic Bezier from the sink's current point.
pub fn cubic_bezier_to(
    sink: &mut (impl PathSink + ?Sized),
    cp1: Point,
    cp2: Point,
    end: Point,
    mode: FlatteningMode,
) -> CanvasResult<()> {
    let start = sink.current_point().ok_or(CanvasError::InvalidCurvePrecondition(
        "bezierCurveTo called before moveTo",
    ))?;
    flatten(&[start, cp1, cp2, end], mode, |p| sink.line_to(p));
    Ok(())
}

/// Append a quadratic Bezier from the sink's current point.
pub fn quadratic_bezier_to(
    sink: &mut (impl PathSink + ?Sized),
    cp: Point,
    end: Point,
    mode: FlatteningMode,
) -> CanvasResult<()> {
    let start = sink.current_point().ok_or(CanvasError::InvalidCurvePrecondition(
        "quadraticCurveTo called before moveTo",
    ))?;
    flatten(&[start, cp, end], mode, |p| sink.line_to(p));
    Ok(())
}

fn subdivide<const N: usize, F: FnMut(Point)>(
    control: &[Point; N],
    tolerance: f64,
    depth: u32,
    emit: &mut F,
) {
    if depth >= MAX_DEPTH || flatness(control) <= tolerance {
        emit(control[N - 1]);
        return;
    }
    let (left, right) = split_half(control);
    subdivide(&left, tolerance, depth + 1, emit);
    subdivide(&right, tolerance, depth + 1, emit);
}

/// Largest distance from an interior control point to the chord segment.
fn flatness<const N: usize>(control: &[Point; N]) -> f64 {
    let a = control[0];
    let b = control[N - 1];
    control[1..N - 1]
        .iter()
        .map(|&p| distance_to_segment(p, a, b))
        .fold(0.0, f64::max)
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > f64::EPSILON {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p.x - (a.x + t * dx)).hypot(p.y - (a.y + t * dy))
}

/// De Casteljau split at `u = 0.5`.
fn split_half<const N: usize>(control: &[Point; N]) -> ([Point; N], [Point; N]) {
    let mut work = *control;
    let mut left = *control;
    let mut right = *control;
    for level in 1..N {
        for i in 0..N - level {
            work[i] = work[i].midpoint(work[i + 1]);
        }
        left[level] = work[0];
        right[N - 1 - level] = work[N - 1 - level];
    }
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_fixed_step_sample_count_and_ends() {
        let start = Point::new(20.0, 20.0);
        let end = Point::new(200.0, 20.0);
        let mut sink = vec![start];
        cubic_bezier_to(
            &mut sink,
            Point::new(20.0, 100.0),
            Point::new(200.0, 100.0),
            end,
            FlatteningMode::FixedStep,
        )
        .unwrap();

        // Initial point plus every sample.
        assert_eq!(sink.len(), 1 + FIXED_STEP_SAMPLES);
        assert_eq!(sink[1], start);
        assert_eq!(*sink.last().unwrap(), end);
        assert_eq!(sink.current_point(), Some(end));
    }

    #[test]
    fn test_degenerate_cubic_stays_at_origin() {
        let zero = Point::new(0.0, 0.0);
        let points = flatten_to_vec(&[zero; 4], FlatteningMode::FixedStep);
        assert_eq!(points.len(), FIXED_STEP_SAMPLES);
        assert!(points.iter().all(|&p| p == zero));
    }

    #[test]
    fn test_quadratic_midpoint() {
        let control = [
            Point::new(0.0, 0.0),
            Point::new(50.0, 100.0),
            Point::new(100.0, 0.0),
        ];
        let points = flatten_to_vec(&control, FlatteningMode::FixedStep);
        // u = 0.5 is sample 5000: 0.25*P0 + 0.5*P1 + 0.25*P2
        assert!(close(points[5000], Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_bernstein_matches_cubic_formula() {
        let p = [
            Point::new(1.0, 2.0),
            Point::new(3.0, 7.0),
            Point::new(8.0, -4.0),
            Point::new(10.0, 1.0),
        ];
        let u: f64 = 0.3;
        let v = 1.0 - u;
        let expected_x =
            v.powi(3) * p[0].x + 3.0 * u * v * v * p[1].x + 3.0 * u * u * v * p[2].x + u.powi(3) * p[3].x;
        let expected_y =
            v.powi(3) * p[0].y + 3.0 * u * v * v * p[1].y + 3.0 * u * u * v * p[2].y + u.powi(3) * p[3].y;
        assert!(close(bernstein_point(&p, u), Point::new(expected_x, expected_y)));
    }

    #[test]
    fn test_missing_current_point() {
        let mut sink: Vec<Point> = Vec::new();
        let err = cubic_bezier_to(
            &mut sink,
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
            FlatteningMode::FixedStep,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCurvePrecondition);
        assert!(sink.is_empty());

        let err = quadratic_bezier_to(
            &mut sink,
            Point::new(1.0, 1.0),
            Point::new(3.0, 3.0),
            FlatteningMode::adaptive(0.5),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCurvePrecondition);
    }

    #[test]
    fn test_adaptive_straight_curve_is_one_segment() {
        let control = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
        ];
        let points = flatten_to_vec(&control, FlatteningMode::adaptive(0.1));
        assert_eq!(points, vec![Point::new(20.0, 0.0)]);
    }

    #[test]
    fn test_adaptive_overshooting_collinear_curve_subdivides() {
        // Control points are collinear but lie past the end point.
        let control = [
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(10.0, 0.0),
        ];
        let points = flatten_to_vec(&control, FlatteningMode::adaptive(0.1));
        assert!(points.len() > 1);
        assert_eq!(*points.last().unwrap(), Point::new(10.0, 0.0));
    }

    #[test]
    fn test_adaptive_stays_close_to_curve() {
        let control = [
            Point::new(20.0, 20.0),
            Point::new(20.0, 100.0),
            Point::new(200.0, 100.0),
            Point::new(200.0, 20.0),
        ];
        let tolerance = 0.25;
        let mut polyline = vec![control[0]];
        polyline.extend(flatten_to_vec(&control, FlatteningMode::adaptive(tolerance)));

        assert!(polyline.len() > 4);
        assert!(polyline.len() < FIXED_STEP_SAMPLES / 10);
        assert_eq!(*polyline.last().unwrap(), control[3]);

        // Every dense sample lies within tolerance of some polyline segment.
        for p in flatten_to_vec(&control, FlatteningMode::FixedStep)
            .into_iter()
            .step_by(50)
        {
            let nearest = polyline
                .windows(2)
                .map(|w| distance_to_segment(p, w[0], w[1]))
                .fold(f64::INFINITY, f64::min);
            assert!(nearest <= tolerance + 1e-9, "{:?} is {} away", p, nearest);
        }
    }

    #[test]
    fn test_non_positive_tolerance_falls_back() {
        let control = [
            Point::new(0.0, 0.0),
            Point::new(50.0, 100.0),
            Point::new(100.0, 0.0),
        ];
        let a = flatten_to_vec(&control, FlatteningMode::adaptive(0.0));
        let b = flatten_to_vec(&control, FlatteningMode::adaptive(DEFAULT_TOLERANCE));
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_half_quadratic() {
        let (l, r) = split_half(&[
            Point::new(0.0, 0.0),
            Point::new(2.0, 4.0),
            Point::new(4.0, 0.0),
        ]);
        assert_eq!(l, [Point::new(0.0, 0.0), Point::new(1.0, 2.0), Point::new(2.0, 2.0)]);
        assert_eq!(r, [Point::new(2.0, 2.0), Point::new(3.0, 2.0), Point::new(4.0, 0.0)]);
    }
}
