//! Pixel storage for render output.

use crate::bmp::{self, ExportError, ExportResult};
use crate::Color;
use image::{Rgb, RgbImage};
use rayon::prelude::*;
use std::path::Path;

/// Row-major image buffer; row 0 is the bottom of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) outside {}x{} buffer", self.width, self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// All pixels, bottom row first.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn row(&self, y: u32) -> &[Color] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// Rows from bottom to top.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }

    pub(crate) fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, Color> {
        self.pixels.chunks_mut(self.width.max(1) as usize)
    }

    pub(crate) fn par_rows_mut(&mut self) -> rayon::slice::ChunksMut<'_, Color> {
        self.pixels.par_chunks_mut(self.width.max(1) as usize)
    }

    /// Single-channel intensities, same layout as the color pixels.
    pub fn to_grayscale(&self) -> Vec<u8> {
        self.pixels.iter().map(|color| color.luminance()).collect()
    }

    /// Convert to a top-down `image` buffer.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let color = self.get(x, self.height - 1 - y);
            Rgb([color.r, color.g, color.b])
        })
    }

    /// Save the buffer, picking the format from the file extension.
    ///
    /// `.bmp` goes through the built-in encoder, anything else through the
    /// `image` crate.
    pub fn save(&self, path: impl AsRef<Path>) -> ExportResult<()> {
        let path = path.as_ref();
        let is_bmp = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("bmp"));

        if is_bmp {
            bmp::save_bmp(path, self)
        } else {
            self.to_image().save(path).map_err(ExportError::from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut buffer = PixelBuffer::new(3, 2);
        buffer.set(2, 1, Color::WHITE);

        assert_eq!(buffer.get(2, 1), Color::WHITE);
        assert_eq!(buffer.get(0, 0), Color::BLACK);
        assert_eq!(buffer.pixels()[5], Color::WHITE);
        assert_eq!(buffer.row(1), &[Color::BLACK, Color::BLACK, Color::WHITE]);
        assert_eq!(buffer.rows().count(), 2);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range() {
        PixelBuffer::new(3, 2).get(3, 0);
    }

    #[test]
    fn test_to_image_flips_rows() {
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.set(0, 0, Color::new(1, 2, 3));

        let image = buffer.to_image();
        assert_eq!(image.get_pixel(0, 1), &Rgb([1, 2, 3]));
        assert_eq!(image.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_to_grayscale() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.set(1, 0, Color::WHITE);
        assert_eq!(buffer.to_grayscale(), vec![0, 255]);
    }
}
