//! Error types for blobmark-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal buffer layout details.

use thiserror::Error;

/// blobmark core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Row stride shorter than one row of pixels
    #[error("invalid row stride: {stride} bytes for width {width} (need at least {min})")]
    InvalidStride { stride: usize, width: u32, min: usize },

    /// Pixel buffer too small for the declared geometry
    #[error("pixel buffer too small: {actual} bytes, need {required}")]
    BufferTooSmall { required: usize, actual: usize },

    /// Coordinates outside the image
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
