//! Error types for blobmark-region

use thiserror::Error;

/// Errors that can occur during region labelling
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobmark_core::Error),

    /// Label grid requested with a zero dimension
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Label grid dimensions do not fit in memory addressing
    #[error("grid too large: {width}x{height}")]
    GridTooLarge { width: u32, height: u32 },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
