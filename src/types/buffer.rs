//! RGBA pixel buffer.

use image::{Rgba, RgbaImage};

use crate::error::{SwapError, Result};

use super::Colour;

/// A width × height grid of RGBA pixels, stored row-major.
///
/// Dimensions are fixed at construction; editing operations only ever
/// rewrite pixel values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Colour>,
}

impl PixelBuffer {
    /// Create a buffer filled with a single colour.
    pub fn filled(width: u32, height: u32, colour: Colour) -> Self {
        Self {
            width,
            height,
            pixels: vec![colour; width as usize * height as usize],
        }
    }

    /// Create a buffer from row-major pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Colour>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(SwapError::Buffer {
                message: format!(
                    "{}x{} buffer needs {} pixels, got {}",
                    width,
                    height,
                    expected,
                    pixels.len()
                ),
                help: None,
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer from rows of pixels. All rows must be the same length.
    pub fn from_rows(rows: Vec<Vec<Colour>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());

        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(SwapError::Buffer {
                message: format!(
                    "row {} has {} pixels, expected {}",
                    y,
                    row.len(),
                    width
                ),
                help: Some("Every row of a sprite must have the same width".to_string()),
            });
        }

        Self::from_pixels(
            width as u32,
            height as u32,
            rows.into_iter().flatten().collect(),
        )
    }

    /// Create a buffer from interleaved channel bytes.
    ///
    /// `channels` must be 3 (RGB, made opaque) or 4 (RGBA).
    pub fn from_raw(width: u32, height: u32, channels: usize, data: &[u8]) -> Result<Self> {
        if channels != 3 && channels != 4 {
            return Err(SwapError::Buffer {
                message: format!("unsupported channel count {}", channels),
                help: Some("Pixel data must be RGB (3) or RGBA (4)".to_string()),
            });
        }

        let expected = width as usize * height as usize * channels;
        if data.len() != expected {
            return Err(SwapError::Buffer {
                message: format!(
                    "{}x{} buffer with {} channels needs {} bytes, got {}",
                    width,
                    height,
                    channels,
                    expected,
                    data.len()
                ),
                help: None,
            });
        }

        let pixels = data
            .chunks_exact(channels)
            .map(Colour::from_channels)
            .collect::<Result<Vec<_>>>()?;

        Self::from_pixels(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Overwrite the pixel at `(x, y)`. Returns false when out of bounds.
    pub fn set(&mut self, x: u32, y: u32, colour: Colour) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = self.index(x, y);
        self.pixels[idx] = colour;
        true
    }

    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    /// Iterate rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Colour]> {
        // chunks(0) panics, so give empty buffers a chunk size of 1.
        self.pixels.chunks(self.width.max(1) as usize)
    }

    /// Mutable slice covering rows `start..end` (clamped to the buffer).
    pub fn rows_mut(&mut self, start: u32, end: u32) -> &mut [Colour] {
        let end = end.min(self.height);
        let start = start.min(end);
        let w = self.width as usize;
        &mut self.pixels[start as usize * w..end as usize * w]
    }

    /// Convert into an `image` RGBA buffer.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(self.pixels[self.index(x, y)].to_rgba())
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl From<&RgbaImage> for PixelBuffer {
    fn from(img: &RgbaImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            pixels: img
                .pixels()
                .map(|p| Colour::new(p[0], p[1], p[2], p[3]))
                .collect(),
        }
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(img: RgbaImage) -> Self {
        Self::from(&img)
    }
}
