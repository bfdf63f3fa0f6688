//! RgbImage - The color raster container
//!
//! `RgbImage` is the input type for labelling: a 3-channel, 8-bit raster
//! supplied by an acquisition layer (a file decoder, a camera driver).
//!
//! # Pixel layout
//!
//! - Each pixel is three bytes, in R, G, B order
//! - Row `y` starts at byte offset `y * stride`
//! - `stride` may exceed `width * 3` to allow for alignment padding;
//!   padding bytes are never read as pixels
//! - The last row only needs `width * 3` bytes

mod access;

use crate::color::CHANNELS;
use crate::error::{Error, Result};

/// 3-channel, 8-bit color image
///
/// # Examples
///
/// ```
/// use blobmark_core::RgbImage;
///
/// let mut img = RgbImage::new(4, 3).unwrap();
/// img.set_rgb(1, 2, 10, 20, 30).unwrap();
/// assert_eq!(img.get_rgb(1, 2), Some((10, 20, 30)));
/// assert_eq!(img.stride(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Bytes per row, at least `width * 3`
    stride: usize,
    /// Pixel bytes
    data: Vec<u8>,
}

impl RgbImage {
    /// Create a new black image with a tight row stride.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let stride = Self::min_stride(width);
        let data = vec![0u8; stride * height as usize];

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Wrap an externally produced pixel buffer.
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    /// * `stride` - Bytes per row (must be >= `width * 3`)
    /// * `data` - Pixel bytes, at least `stride * (height - 1) + width * 3` long
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`], [`Error::InvalidStride`] or
    /// [`Error::BufferTooSmall`] when the geometry does not fit the buffer.
    pub fn from_raw(width: u32, height: u32, stride: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let min = Self::min_stride(width);
        if stride < min {
            return Err(Error::InvalidStride { stride, width, min });
        }

        let required = stride
            .checked_mul(height as usize - 1)
            .and_then(|n| n.checked_add(min))
            .ok_or(Error::BufferTooSmall {
                required: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    #[inline]
    fn min_stride(width: u32) -> usize {
        width as usize * CHANNELS
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes between the starts of consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Get the raw pixel bytes, including any row padding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image and return its raw buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Set every pixel to the same color. Padding bytes are left untouched.
    pub fn fill(&mut self, r: u8, g: u8, b: u8) {
        for y in 0..self.height {
            for px in self.row_mut(y).chunks_exact_mut(CHANNELS) {
                px.copy_from_slice(&[r, g, b]);
            }
        }
    }
}
