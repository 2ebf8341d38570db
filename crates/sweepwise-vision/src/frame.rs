use crate::{Rect, VisionError};

/// An RGB color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// A row-major RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Frame {
    /// Creates a frame from row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::PixelCount`] if `pixels` does not hold exactly
    /// `width * height` entries.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, VisionError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(VisionError::PixelCount {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a frame filled with one color.
    #[must_use]
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Creates a frame from packed `RGB8` bytes, as most capture APIs produce.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::PixelCount`] if `bytes` does not hold exactly
    /// `width * height * 3` bytes.
    pub fn from_rgb8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, VisionError> {
        if !bytes.len().is_multiple_of(3) {
            return Err(VisionError::PixelCount {
                width,
                height,
                expected: width * height,
                actual: bytes.len() / 3,
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Returns the width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the frame.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Paints a rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let x_end = (rect.x + rect.width).min(self.width);
        let y_end = (rect.y + rect.height).min(self.height);
        for y in rect.y.min(y_end)..y_end {
            let row = y * self.width;
            self.pixels[row + rect.x.min(x_end)..row + x_end].fill(color);
        }
    }

    /// Returns the raw bytes of a rectangle, row by row, clipped to the frame.
    ///
    /// Two regions with equal bytes look identical.
    #[must_use]
    pub fn region_bytes(&self, rect: Rect) -> Vec<u8> {
        let x_end = (rect.x + rect.width).min(self.width);
        let y_end = (rect.y + rect.height).min(self.height);
        let x_start = rect.x.min(x_end);
        let mut bytes = Vec::with_capacity((x_end - x_start) * (y_end - rect.y.min(y_end)) * 3);
        for y in rect.y.min(y_end)..y_end {
            let row = y * self.width;
            for px in &self.pixels[row + x_start..row + x_end] {
                bytes.extend_from_slice(&[px.r, px.g, px.b]);
            }
        }
        bytes
    }
}
