//! blobmark core - Basic data structures for region labelling
//!
//! This crate provides the fundamental data structures shared by the
//! other blobmark crates:
//!
//! - [`RgbImage`] - 3-channel, 8-bit color raster with an explicit row stride
//! - [`Point`] - Integer pixel coordinate
//! - [`Rect`] - Axis-aligned rectangle
//! - [`Error`] / [`Result`] - Error type for core operations

pub mod error;
pub mod geometry;
pub mod image;

pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use image::RgbImage;

/// Channel layout of [`RgbImage`] pixels.
///
/// Each pixel occupies three consecutive bytes in R, G, B order.
pub mod color {
    /// Red channel offset
    pub const RED: usize = 0;
    /// Green channel offset
    pub const GREEN: usize = 1;
    /// Blue channel offset
    pub const BLUE: usize = 2;

    /// Bytes per pixel
    pub const CHANNELS: usize = 3;

    /// Largest value a single channel can hold.
    pub const CHANNEL_MAX: u32 = 255;

    /// Sum of the three channels of a pixel, in `0..=765`.
    #[inline]
    pub fn channel_sum(r: u8, g: u8, b: u8) -> u32 {
        r as u32 + g as u32 + b as u32
    }

}
