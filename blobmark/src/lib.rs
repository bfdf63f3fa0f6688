//! blobmark - Connected region labelling for RGB images
//!
//! Finds the 8-connected dark regions of an image in one raster sweep and
//! reports the pixel mass and bounding box of each.
//!
//! # Overview
//!
//! - Image container and geometry ([`RgbImage`], [`Point`], [`Rect`])
//! - Region labelling, statistics and visualization ([`region`])
//! - Image I/O for PNG and binary PNM ([`io`])
//!
//! # Example
//!
//! ```
//! use blobmark::RgbImage;
//! use blobmark::region::{LabelOptions, label_image, render_labels};
//!
//! let mut img = RgbImage::new(8, 8).unwrap();
//! img.fill(255, 255, 255);
//! img.set_rgb(2, 3, 0, 0, 0).unwrap();
//! img.set_rgb(3, 4, 0, 0, 0).unwrap();
//!
//! let labelled = label_image(&img, &LabelOptions::default()).unwrap();
//! assert_eq!(labelled.region_count(), 1);
//!
//! let preview = render_labels(&labelled).unwrap();
//! assert_eq!(preview.width(), 8);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use blobmark_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use blobmark_io as io;
pub use blobmark_region as region;
