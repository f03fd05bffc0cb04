//! In-memory RGBA8 bitmap container.
//!
//! Bitmaps are produced by the capture source, transformed by the
//! compositor, and consumed by the exporter. The buffer is row-major
//! RGBA8 with no padding; ownership moves between pipeline stages.

use snapbooth_common::error::{BoothError, BoothResult};

use crate::geometry::Dimensions;

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A decoded raster image: width, height, and a row-major RGBA8 buffer.
///
/// Construction validates the invariants every downstream stage relies
/// on: both dimensions positive and the buffer exactly
/// `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Construct a bitmap from raw RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> BoothResult<Self> {
        if width == 0 || height == 0 {
            return Err(BoothError::decode(format!(
                "bitmap dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| {
                BoothError::decode(format!("bitmap dimensions overflow: {}x{}", width, height))
            })?;
        if pixels.len() != expected {
            return Err(BoothError::decode(format!(
                "pixel buffer is {} bytes, expected {} for {}x{} RGBA8",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A fully transparent bitmap of the given size.
    pub fn blank(width: u32, height: u32) -> BoothResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(BYTES_PER_PIXEL))
            .unwrap_or(0);
        Self::from_rgba8(width, height, vec![0; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Borrow the raw RGBA8 buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume into the raw RGBA8 buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA components of the pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut px = [0u8; BYTES_PER_PIXEL];
        px.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        Some(px)
    }

    /// Reflect about the vertical centerline (selfie-mirror correction).
    ///
    /// Dimensions are unchanged; applying the reflection twice restores
    /// the original pixels.
    pub fn flip_horizontal(&self) -> Bitmap {
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        let mut out = Vec::with_capacity(self.pixels.len());
        for row in self.pixels.chunks_exact(row_bytes) {
            for px in row.chunks_exact(BYTES_PER_PIXEL).rev() {
                out.extend_from_slice(px);
            }
        }
        Bitmap {
            width: self.width,
            height: self.height,
            pixels: out,
        }
    }
}
