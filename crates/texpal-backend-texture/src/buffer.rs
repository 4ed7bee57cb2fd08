//! RGBA texture buffer.
//!
//! Rows are stored bottom-up: `y = 0` is the scanline at v = 0. The PNG
//! writer flips rows when encoding so the file itself is top-down.

use crate::color::Color;

/// A 2D texture buffer of RGBA colors.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data, row-major, bottom row first.
    pub data: Vec<Color>,
}

impl TextureBuffer {
    /// Create a new texture buffer filled with a color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.data[self.index(x, y)]
    }

    /// Fill a rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for py in y.min(y_end)..y_end {
            let row = self.index(0, py);
            for px in x.min(x_end)..x_end {
                self.data[row + px as usize] = color;
            }
        }
    }

    /// Convert to 8-bit RGBA bytes with the top row first, as image files expect.
    pub fn to_rgba8_top_down(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        let width = self.width as usize;
        if width == 0 {
            return bytes;
        }
        for row in self.data.chunks(width).rev() {
            for color in row {
                bytes.extend_from_slice(&color.to_rgba8());
            }
        }
        bytes
    }
}
