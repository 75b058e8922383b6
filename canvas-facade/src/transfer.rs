//! Rectangular pixel copies between image data and rendering surfaces.
//!
//! Both copy directions clip independently against the source and the
//! destination. Coordinates that fall outside either buffer, including
//! negative ones, are skipped; they are never reported as errors.

use crate::error::CanvasResult;
use crate::pixel::{PixelBuffer, PixelFormat, Rect};
use std::path::Path;

/// A rendering target's backing store: `width * height` pixels with a
/// `width * 4` byte stride.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Layout of the bytes returned by [`Surface::pixels`].
    fn format(&self) -> PixelFormat;
    fn pixels(&self) -> &[u8];
    fn pixels_mut(&mut self) -> &mut [u8];
    /// Called after pixels were written directly so later reads observe them.
    fn mark_dirty(&mut self) {}
}

impl Surface for PixelBuffer {
    fn width(&self) -> u32 {
        PixelBuffer::width(self)
    }

    fn height(&self) -> u32 {
        PixelBuffer::height(self)
    }

    fn format(&self) -> PixelFormat {
        PixelBuffer::format(self)
    }

    fn pixels(&self) -> &[u8] {
        self.data()
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        self.data_mut()
    }
}

/// Half-open span `[start, end)` on one axis.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: i64,
    end: i64,
}

impl Span {
    fn is_empty(self) -> bool {
        self.start >= self.end
    }
}

/// Intersect the window `[origin, origin + extent)` with `[0, limit)`.
fn clip(origin: i64, extent: u32, limit: u32) -> Span {
    Span {
        start: origin.max(0),
        end: (origin + extent as i64).min(limit as i64),
    }
}

/// Copy a window of `src` into `dest` with its top-left corner at
/// `(dest_x, dest_y)`.
///
/// Source pixel `(tx, ty)` of the window lands at
/// `(dest_x + tx - window.x, dest_y + ty - window.y)`. The window defaults to
/// the whole source. Pixels are converted from the source's format to the
/// surface's format as they are copied, and replace the destination bytes
/// without compositing. Returns the number of pixels written.
pub fn put_image_data<S: Surface + ?Sized>(
    dest: &mut S,
    src: &PixelBuffer,
    dest_x: i32,
    dest_y: i32,
    window: Option<Rect>,
) -> usize {
    let window = window.unwrap_or(Rect::new(0, 0, src.width(), src.height()));
    log::trace!(
        target: "canvas",
        "putImageData {}x{} window {:?} at {} {}",
        src.width(),
        src.height(),
        window,
        dest_x,
        dest_y
    );

    // Offset from source coordinates to destination coordinates.
    let off_x = dest_x as i64 - window.x as i64;
    let off_y = dest_y as i64 - window.y as i64;

    let src_cols = clip(window.x as i64, window.width, src.width());
    let src_rows = clip(window.y as i64, window.height, src.height());

    // Source columns whose destination column is inside the surface.
    let cols = Span {
        start: src_cols.start.max(-off_x),
        end: src_cols.end.min(dest.width() as i64 - off_x),
    };
    let rows = Span {
        start: src_rows.start.max(-off_y),
        end: src_rows.end.min(dest.height() as i64 - off_y),
    };

    if cols.is_empty() || rows.is_empty() {
        return 0;
    }

    let src_format = src.format();
    let dest_format = dest.format();
    let src_stride = src.width() as usize * 4;
    let dest_stride = dest.width() as usize * 4;
    let run = (cols.end - cols.start) as usize * 4;
    let src_data = src.data();
    let dest_data = dest.pixels_mut();

    for ty in rows.start..rows.end {
        let src_start = ty as usize * src_stride + cols.start as usize * 4;
        let dest_start =
            (ty + off_y) as usize * dest_stride + (cols.start + off_x) as usize * 4;
        let src_row = &src_data[src_start..src_start + run];
        let dest_row = &mut dest_data[dest_start..dest_start + run];

        if src_format == dest_format {
            dest_row.copy_from_slice(src_row);
        } else {
            for (d, s) in dest_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                let px = PixelFormat::convert([s[0], s[1], s[2], s[3]], src_format, dest_format);
                d.copy_from_slice(&px);
            }
        }
    }

    dest.mark_dirty();
    ((cols.end - cols.start) * (rows.end - rows.start)) as usize
}

/// Read `rect` out of `src` into a new buffer in `format`.
///
/// Pixels of `rect` that lie outside the surface stay transparent black.
/// Fails with [`CanvasError::InvalidDimensions`](crate::CanvasError::InvalidDimensions)
/// when `rect` is too large to allocate.
pub fn get_image_data<S: Surface + ?Sized>(
    src: &S,
    rect: Rect,
    format: PixelFormat,
) -> CanvasResult<PixelBuffer> {
    log::trace!(target: "canvas", "getImageData {:?}", rect);
    let mut out = PixelBuffer::new(rect.width, rect.height, format)?;

    let cols = clip(rect.x as i64, rect.width, src.width());
    let rows = clip(rect.y as i64, rect.height, src.height());
    if cols.is_empty() || rows.is_empty() {
        return Ok(out);
    }

    let src_format = src.format();
    let src_stride = src.width() as usize * 4;
    let out_stride = rect.width as usize * 4;
    let run = (cols.end - cols.start) as usize * 4;
    let src_data = src.pixels();
    let out_data = out.data_mut();

    for sy in rows.start..rows.end {
        let src_start = sy as usize * src_stride + cols.start as usize * 4;
        let out_start = (sy - rect.y as i64) as usize * out_stride
            + (cols.start - rect.x as i64) as usize * 4;
        let src_row = &src_data[src_start..src_start + run];
        let out_row = &mut out_data[out_start..out_start + run];

        if src_format == format {
            out_row.copy_from_slice(src_row);
        } else {
            for (d, s) in out_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                d.copy_from_slice(&PixelFormat::convert([s[0], s[1], s[2], s[3]], src_format, format));
            }
        }
    }

    Ok(out)
}

/// Re-pack a decoded image into straight RGBA with every pixel fully opaque.
pub fn repack_opaque(image: &image::DynamicImage) -> CanvasResult<PixelBuffer> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut data = rgba.into_raw();
    for px in data.chunks_exact_mut(4) {
        px[3] = 255;
    }
    PixelBuffer::from_vec(width, height, PixelFormat::RGBA8, data)
}

/// Decode PNG, JPEG or GIF bytes.
pub fn decode_image(bytes: &[u8]) -> CanvasResult<image::DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Decode an image file, inferring the codec from its contents and extension.
pub fn decode_image_file(path: impl AsRef<Path>) -> CanvasResult<image::DynamicImage> {
    let path = path.as_ref();
    log::debug!(target: "canvas", "decoding image {}", path.display());
    Ok(image::open(path)?)
}
