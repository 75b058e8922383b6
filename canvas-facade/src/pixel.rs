//! Pixel buffers and their channel layout.

use crate::error::{CanvasError, CanvasResult};

/// Byte order of the four channels of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelOrder {
    #[default]
    Rgba,
    Bgra,
}

/// Whether color channels are pre-scaled by alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaMode {
    #[default]
    Straight,
    Premultiplied,
}

/// Layout of a 4-byte pixel.
///
/// Every [`PixelBuffer`] and [`Surface`](crate::Surface) carries one of these,
/// and transfers convert between layouts at the copy boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelFormat {
    pub order: ChannelOrder,
    pub alpha: AlphaMode,
}

impl PixelFormat {
    pub const RGBA8: PixelFormat = PixelFormat {
        order: ChannelOrder::Rgba,
        alpha: AlphaMode::Straight,
    };
    pub const BGRA8: PixelFormat = PixelFormat {
        order: ChannelOrder::Bgra,
        alpha: AlphaMode::Straight,
    };
    pub const RGBA8_PREMULTIPLIED: PixelFormat = PixelFormat {
        order: ChannelOrder::Rgba,
        alpha: AlphaMode::Premultiplied,
    };
    pub const BGRA8_PREMULTIPLIED: PixelFormat = PixelFormat {
        order: ChannelOrder::Bgra,
        alpha: AlphaMode::Premultiplied,
    };

    /// Convert one pixel from `from` layout into `to` layout.
    #[inline]
    pub fn convert(pixel: [u8; 4], from: PixelFormat, to: PixelFormat) -> [u8; 4] {
        if from == to {
            return pixel;
        }

        // Normalize to RGBA order.
        let [r, g, b, a] = match from.order {
            ChannelOrder::Rgba => pixel,
            ChannelOrder::Bgra => [pixel[2], pixel[1], pixel[0], pixel[3]],
        };

        let [r, g, b] = match (from.alpha, to.alpha) {
            (AlphaMode::Straight, AlphaMode::Premultiplied) => premultiply([r, g, b], a),
            (AlphaMode::Premultiplied, AlphaMode::Straight) => unpremultiply([r, g, b], a),
            _ => [r, g, b],
        };

        match to.order {
            ChannelOrder::Rgba => [r, g, b, a],
            ChannelOrder::Bgra => [b, g, r, a],
        }
    }
}

/// Scale straight channels by alpha, rounding to nearest.
#[inline]
fn premultiply(rgb: [u8; 3], a: u8) -> [u8; 3] {
    match a {
        255 => rgb,
        0 => [0, 0, 0],
        _ => {
            let a16 = a as u16;
            rgb.map(|c| ((c as u16 * a16 + 127) / 255) as u8)
        }
    }
}

/// Undo premultiplication, rounding to nearest.
///
/// Rounding here (rather than truncating) makes premultiplied -> straight ->
/// premultiplied an exact round trip.
#[inline]
fn unpremultiply(rgb: [u8; 3], a: u8) -> [u8; 3] {
    match a {
        255 => rgb,
        0 => [0, 0, 0],
        _ => {
            let a32 = a as u32;
            rgb.map(|c| ((c as u32 * 255 + a32 / 2) / a32).min(255) as u8)
        }
    }
}

/// A rectangle in integer device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// An owned block of 4-byte pixels, row-major with `width * 4` stride.
///
/// This is the canvas `ImageData`. It is deliberately not `Clone`: use
/// [`PixelBuffer::duplicate`] when a deep copy is really wanted.
#[derive(Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

/// Canvas name for a [`PixelBuffer`].
pub type ImageData = PixelBuffer;

impl PixelBuffer {
    /// Allocate a zeroed (transparent black) buffer.
    ///
    /// Fails with [`CanvasError::InvalidDimensions`] when the byte length
    /// overflows or cannot be allocated.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> CanvasResult<Self> {
        let len = byte_len(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| CanvasError::InvalidDimensions { width, height })?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Wrap existing pixel data, checking its length.
    pub fn from_vec(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> CanvasResult<Self> {
        let expected_len = byte_len(width, height)?;
        if data.len() != expected_len {
            return Err(CanvasError::InvalidArgument(format!(
                "Data length {} does not match expected {} for {}x{} image",
                data.len(),
                expected_len,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Read the pixel at `(x, y)` in this buffer's own format.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[idx..idx + 4]);
        Some(px)
    }

    /// Explicit deep copy.
    pub fn duplicate(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            format: self.format,
            data: self.data.clone(),
        }
    }

    /// Re-encode every pixel into `format`.
    pub fn converted(mut self, format: PixelFormat) -> Self {
        if format != self.format {
            let from = self.format;
            for chunk in self.data.chunks_exact_mut(4) {
                let px = [chunk[0], chunk[1], chunk[2], chunk[3]];
                chunk.copy_from_slice(&PixelFormat::convert(px, from, format));
            }
            self.format = format;
        }
        self
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

/// `width * height * 4`, or `InvalidDimensions` when that does not fit in `usize`.
pub(crate) fn byte_len(width: u32, height: u32) -> CanvasResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(CanvasError::InvalidDimensions { width, height })
}
