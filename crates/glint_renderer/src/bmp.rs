//! Uncompressed 24-bit BMP export.
//!
//! Layout: 14-byte file header, 40-byte info header, then bottom-up
//! scanlines of B, G, R bytes, each padded with zeros to a multiple of 4.

use crate::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
const BYTES_PER_PIXEL: u32 = 3;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image too large for BMP: {width}x{height}")]
    TooLarge { width: u32, height: u32 },

    #[error("Expected {expected} pixel values, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Bytes per scanline including padding.
pub fn row_stride(width: u32) -> usize {
    (width as usize * BYTES_PER_PIXEL as usize).div_ceil(4) * 4
}

fn encode(width: u32, height: u32, bgr_at: impl Fn(u32, u32) -> [u8; 3]) -> ExportResult<Vec<u8>> {
    let stride = row_stride(width);
    let pixel_bytes = stride as u64 * height as u64;
    let header_size = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
    let file_size = u32::try_from(header_size as u64 + pixel_bytes)
        .ok()
        .filter(|_| width <= i32::MAX as u32 && height <= i32::MAX as u32)
        .ok_or(ExportError::TooLarge { width, height })?;

    let mut bytes = Vec::with_capacity(file_size as usize);

    // File header
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(&header_size.to_le_bytes());

    // Info header
    bytes.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&((BYTES_PER_PIXEL * 8) as u16).to_le_bytes());
    bytes.resize(header_size as usize, 0);

    let padding = stride - width as usize * BYTES_PER_PIXEL as usize;
    for y in 0..height {
        for x in 0..width {
            bytes.extend_from_slice(&bgr_at(x, y));
        }
        bytes.extend(std::iter::repeat(0).take(padding));
    }

    Ok(bytes)
}

/// Encode a color buffer as a BMP file image.
pub fn encode_rgb(buffer: &PixelBuffer) -> ExportResult<Vec<u8>> {
    encode(buffer.width(), buffer.height(), |x, y| {
        let color = buffer.get(x, y);
        [color.b, color.g, color.r]
    })
}

/// Encode single-channel intensities (row-major, row 0 at the bottom).
pub fn encode_grayscale(width: u32, height: u32, values: &[u8]) -> ExportResult<Vec<u8>> {
    let expected = width as usize * height as usize;
    if values.len() != expected {
        return Err(ExportError::SizeMismatch {
            expected,
            actual: values.len(),
        });
    }

    encode(width, height, |x, y| {
        let value = values[y as usize * width as usize + x as usize];
        [value; 3]
    })
}

/// Write a color buffer as BMP to `writer`.
pub fn write_bmp<W: Write>(mut writer: W, buffer: &PixelBuffer) -> ExportResult<()> {
    writer.write_all(&encode_rgb(buffer)?)?;
    writer.flush()?;
    Ok(())
}

/// Save a color buffer as a BMP file.
pub fn save_bmp(path: impl AsRef<Path>, buffer: &PixelBuffer) -> ExportResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_bmp(BufWriter::new(file), buffer)?;
    log::debug!("Wrote {}x{} BMP to {}", buffer.width(), buffer.height(), path.display());
    Ok(())
}
