//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels and rows.

use super::RgbImage;
use crate::color::{BLUE, CHANNELS, GREEN, RED};
use crate::error::{Error, Result};

impl RgbImage {
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride + x as usize * CHANNELS
    }

    /// Get RGB values at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_rgb_unchecked(x, y))
    }

    /// Get RGB values without the `Option` wrapper.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` addresses bytes past the end of the buffer.
    #[inline]
    pub fn get_rgb_unchecked(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let i = self.offset(x, y);
        let px = &self.data[i..i + CHANNELS];
        (px[RED], px[GREEN], px[BLUE])
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let i = self.offset(x, y);
        self.data[i + RED] = r;
        self.data[i + GREEN] = g;
        self.data[i + BLUE] = b;
        Ok(())
    }

    /// Get the pixel bytes of row `y`, without padding.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {} out of range 0..{}", y, self.height);
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * CHANNELS]
    }

    /// Get the mutable pixel bytes of row `y`, without padding.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(y < self.height, "row {} out of range 0..{}", y, self.height);
        let start = y as usize * self.stride;
        let len = self.width as usize * CHANNELS;
        &mut self.data[start..start + len]
    }

    /// Iterate over the pixels of row `y` as `(r, g, b)` triples.
    pub fn row_pixels(&self, y: u32) -> impl Iterator<Item = (u8, u8, u8)> + '_ {
        self.row(y)
            .chunks_exact(CHANNELS)
            .map(|px| (px[RED], px[GREEN], px[BLUE]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_rgb_out_of_bounds() {
        let img = RgbImage::new(2, 2).unwrap();
        assert_eq!(img.get_rgb(2, 0), None);
        assert_eq!(img.get_rgb(0, 2), None);
    }

    #[test]
    fn test_set_rgb_out_of_bounds() {
        let mut img = RgbImage::new(2, 2).unwrap();
        assert!(matches!(
            img.set_rgb(5, 1, 0, 0, 0),
            Err(Error::OutOfBounds { x: 5, y: 1, .. })
        ));
    }

    #[test]
    fn test_row_pixels() {
        let mut img = RgbImage::new(3, 2).unwrap();
        img.set_rgb(0, 1, 1, 2, 3).unwrap();
        img.set_rgb(2, 1, 4, 5, 6).unwrap();
        let row: Vec<_> = img.row_pixels(1).collect();
        assert_eq!(row, vec![(1, 2, 3), (0, 0, 0), (4, 5, 6)]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_row_panics_past_end() {
        let img = RgbImage::new(3, 2).unwrap();
        let _ = img.row(2);
    }
}
