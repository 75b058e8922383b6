//! Transform operations for Canvas.

use super::Canvas;
use crate::matrix::Matrix;
use tiny_skia::Transform;

impl Canvas {
    fn concat(&mut self, t: Transform) {
        let current: Transform = self.state.transform.into();
        self.state.transform = current.pre_concat(t).into();
    }

    /// Translate the canvas.
    pub fn translate(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "translate {} {}", x, y);
        self.concat(Transform::from_translate(x, y));
    }

    /// Rotate the canvas clockwise by `angle` radians.
    pub fn rotate(&mut self, angle: f32) {
        log::debug!(target: "canvas", "rotate {}", angle);
        let (sin, cos) = angle.sin_cos();
        self.concat(Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0));
    }

    /// Scale the canvas.
    pub fn scale(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "scale {} {}", x, y);
        self.concat(Transform::from_scale(x, y));
    }

    /// Multiply the current transform by `matrix`.
    pub fn transform(&mut self, matrix: Matrix) {
        log::debug!(target: "canvas", "transform {:?}", matrix);
        self.concat(matrix.into());
    }

    /// Set the transform matrix (replacing the current one).
    pub fn set_transform(&mut self, matrix: Matrix) {
        log::debug!(target: "canvas", "setTransform {:?}", matrix);
        self.state.transform = matrix;
    }

    /// Reset the transform to identity.
    pub fn reset_transform(&mut self) {
        log::debug!(target: "canvas", "resetTransform");
        self.state.transform = Matrix::identity();
    }

    /// Get the current transformation matrix.
    pub fn get_transform(&self) -> Matrix {
        self.state.transform
    }
}
