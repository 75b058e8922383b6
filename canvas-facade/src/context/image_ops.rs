//! Image drawing, pixel data, and PNG output operations for Canvas.

use super::Canvas;
use crate::error::CanvasResult;
use crate::pixel::{PixelBuffer, PixelFormat, Rect};
use crate::transfer;
use std::path::Path;

/// Pixel density written into PNG metadata.
const PNG_PPI: f32 = 72.0;

impl Canvas {
    // --- Image data ---

    /// Create a transparent black `ImageData` in the canvas' image format.
    pub fn create_image_data(&self, width: u32, height: u32) -> CanvasResult<PixelBuffer> {
        PixelBuffer::new(width, height, self.image_format)
    }

    /// Read a region of the canvas. Pixels outside the canvas are transparent black.
    ///
    /// A region too large to allocate is rejected with `InvalidDimensions`.
    pub fn get_image_data(
        &self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    ) -> CanvasResult<PixelBuffer> {
        log::debug!(target: "canvas", "getImageData {} {} {} {}", x, y, width, height);
        transfer::get_image_data(self, Rect::new(x, y, width, height), self.image_format)
    }

    /// Write image data with its top-left corner at `(dx, dy)`.
    ///
    /// Bypasses compositing and clipping. Out-of-range pixels are skipped.
    pub fn put_image_data(&mut self, image: &PixelBuffer, dx: i32, dy: i32) {
        log::debug!(target: "canvas", "putImageData {}x{} at {} {}", image.width(), image.height(), dx, dy);
        transfer::put_image_data(self, image, dx, dy, None);
    }

    /// Write the `window` sub-rectangle of `image` with its top-left corner at `(dx, dy)`.
    pub fn put_image_data_dirty(&mut self, image: &PixelBuffer, dx: i32, dy: i32, window: Rect) {
        log::debug!(target: "canvas", "putImageData {:?} at {} {}", window, dx, dy);
        transfer::put_image_data(self, image, dx, dy, Some(window));
    }

    // --- drawImage ---

    /// Draw a decoded image at `(x, y)`.
    ///
    /// The image is made fully opaque and written like `put_image_data`.
    pub fn draw_image(&mut self, image: &image::DynamicImage, x: i32, y: i32) -> CanvasResult<()> {
        log::debug!(target: "canvas", "drawImage {}x{} at {} {}", image.width(), image.height(), x, y);
        let buffer = transfer::repack_opaque(image)?;
        transfer::put_image_data(self, &buffer, x, y, None);
        Ok(())
    }

    /// Decode encoded image bytes and draw them at `(x, y)`.
    pub fn draw_image_bytes(&mut self, bytes: &[u8], x: i32, y: i32) -> CanvasResult<()> {
        let image = transfer::decode_image(bytes)?;
        self.draw_image(&image, x, y)
    }

    /// Decode an image file and draw it at `(x, y)`.
    pub fn draw_image_file(&mut self, path: impl AsRef<Path>, x: i32, y: i32) -> CanvasResult<()> {
        let image = transfer::decode_image_file(path)?;
        self.draw_image(&image, x, y)
    }

    // --- Output ---

    /// Export the canvas as PNG data (straight-alpha RGBA).
    pub fn to_png(&self) -> CanvasResult<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            // Pixel density metadata (pixels per meter)
            let ppm = (PNG_PPI / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            let data = transfer::get_image_data(
                self,
                Rect::new(0, 0, self.width, self.height),
                PixelFormat::RGBA8,
            )?;
            writer.write_image_data(data.data())?;
        }
        Ok(buf)
    }

    /// Encode the canvas as PNG and write it to `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> CanvasResult<()> {
        let path = path.as_ref();
        let png = self.to_png()?;
        std::fs::write(path, png)?;
        log::info!(target: "canvas", "wrote {}x{} PNG to {}", self.width, self.height, path.display());
        Ok(())
    }
}
