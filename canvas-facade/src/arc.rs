//! Arc approximation with cubic Bezier segments.
//!
//! tiny-skia has no arc primitive, so arcs are emitted as at most
//! quarter-turn cubic segments.

use crate::geometry::ArcParams;
use std::f32::consts::{FRAC_PI_2, TAU};
use tiny_skia::PathBuilder;

/// Signed sweep angle of an arc, following the canvas angle rules.
///
/// A difference of a full turn or more draws the whole circle; anything less
/// is reduced modulo a full turn in the drawing direction.
pub(crate) fn sweep(params: &ArcParams) -> f32 {
    let delta = params.end_angle - params.start_angle;
    if params.anticlockwise {
        if -delta >= TAU {
            -TAU
        } else {
            -(-delta).rem_euclid(TAU)
        }
    } else if delta >= TAU {
        TAU
    } else {
        delta.rem_euclid(TAU)
    }
}

/// Append the arc to `path` in user space, starting with a `move_to` to the
/// arc's first point.
pub(crate) fn arc(path: &mut PathBuilder, params: &ArcParams) {
    let ArcParams { x, y, radius, .. } = *params;
    let start = params.start_angle;
    let sweep = sweep(params);

    path.move_to(x + radius * start.cos(), y + radius * start.sin());
    if radius == 0.0 || sweep == 0.0 {
        return;
    }

    let num_segments = ((sweep.abs() / FRAC_PI_2).ceil() as usize).max(1);
    let segment_angle = sweep / num_segments as f32;
    for i in 0..num_segments {
        let angle1 = start + i as f32 * segment_angle;
        arc_segment(path, x, y, radius, angle1, angle1 + segment_angle);
    }
}

fn arc_segment(path: &mut PathBuilder, cx: f32, cy: f32, r: f32, angle1: f32, angle2: f32) {
    let k = 4.0 / 3.0 * ((angle2 - angle1) / 4.0).tan();

    let (y1, x1) = angle1.sin_cos();
    let (y2, x2) = angle2.sin_cos();

    path.cubic_to(
        cx + r * (x1 - k * y1),
        cy + r * (y1 + k * x1),
        cx + r * (x2 + k * y2),
        cy + r * (y2 - k * x2),
        cx + r * x2,
        cy + r * y2,
    );
}
