//! Gradient types for canvas operations.

use crate::color::{ColorRgba, ColorSpec};
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::RadialGradientParams;

/// A color stop in a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Offset position (0.0 to 1.0).
    pub offset: f64,
    /// Color at this stop.
    pub color: ColorRgba,
}

/// Canvas gradient (linear or radial).
#[derive(Debug, Clone)]
pub struct CanvasGradient {
    /// Gradient type and geometry.
    pub gradient_type: GradientType,
    /// Color stops, sorted by offset.
    stops: Vec<GradientStop>,
}

/// Type of gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientType {
    /// Linear gradient from (x0, y0) to (x1, y1).
    Linear { x0: f32, y0: f32, x1: f32, y1: f32 },
    /// Radial gradient from inner circle to outer circle.
    Radial(RadialGradientParams),
}

impl CanvasGradient {
    pub fn new_linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            gradient_type: GradientType::Linear { x0, y0, x1, y1 },
            stops: Vec::new(),
        }
    }

    pub fn new_radial(params: &RadialGradientParams) -> Self {
        Self {
            gradient_type: GradientType::Radial(*params),
            stops: Vec::new(),
        }
    }

    /// Add a color stop to the gradient.
    ///
    /// `offset` must lie in `[0, 1]`. Stops with equal offsets keep their
    /// insertion order.
    pub fn add_color_stop<'a>(
        &mut self,
        offset: f64,
        color: impl Into<ColorSpec<'a>>,
    ) -> CanvasResult<()> {
        if !(0.0..=1.0).contains(&offset) {
            return Err(CanvasError::InvalidArgument(format!(
                "Gradient stop offset {} is outside [0, 1]",
                offset
            )));
        }
        let color = color.into().resolve()?;
        let idx = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(idx, GradientStop { offset, color });
        Ok(())
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }
}
