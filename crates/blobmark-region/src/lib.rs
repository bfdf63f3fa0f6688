//! blobmark-region - Connected region labelling
//!
//! This crate turns a color image into labelled 8-connected dark regions:
//!
//! - **Thresholding** - Classify pixels as foreground or background
//! - **Label grid** - Padded per-pixel label storage with a zero border
//! - **Alias table** - Flat provisional-to-canonical label mapping
//! - **Labelling** - Single raster sweep with on-the-fly class merging
//! - **Region statistics** - Pixel mass and bounding box per region
//! - **Rendering** - False-color visualization of labels
//!
//! # Examples
//!
//! ```
//! use blobmark_core::{Point, RgbImage};
//! use blobmark_region::{LabelOptions, label_image};
//!
//! let mut img = RgbImage::new(4, 4).unwrap();
//! img.fill(255, 255, 255);
//! img.set_rgb(0, 0, 0, 0, 0).unwrap();
//! img.set_rgb(1, 1, 0, 0, 0).unwrap();
//! img.set_rgb(3, 3, 0, 0, 0).unwrap();
//!
//! let labelled = label_image(&img, &LabelOptions::new().with_threshold(0.3)).unwrap();
//! assert_eq!(labelled.region_count(), 2);
//!
//! let (label, stats) = labelled.iter_regions().next().unwrap();
//! assert_eq!(label, labelled.label_at(1, 1));
//! assert_eq!(stats.mass, 2);
//! assert_eq!(stats.max_corner, Point::new(1, 1));
//! ```

pub mod alias;
pub mod error;
pub mod grid;
pub mod label;
pub mod render;
pub mod stats;
pub mod threshold;

// Re-export core types
pub use blobmark_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export labelling types and functions
pub use alias::AliasTable;
pub use grid::{BACKGROUND, Direction, Label, LabelGrid};
pub use label::{
    DEFAULT_THRESHOLD, LabelOptions, LabelledImage, label_foreground, label_image,
    label_image_with_threshold, region_pixels,
};
pub use render::{label_color, render_grid, render_labels};
pub use stats::{RegionStats, collect_region_stats};
pub use threshold::{PixelClass, ThresholdClassifier};
