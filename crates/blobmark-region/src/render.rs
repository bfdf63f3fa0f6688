//! Label visualization
//!
//! Renders a labelled image as an RGB image for inspection. The colors carry
//! no meaning beyond telling neighboring labels apart; each label maps to the
//! same color on every run.

use crate::error::RegionResult;
use crate::grid::{Label, LabelGrid};
use crate::label::LabelledImage;
use blobmark_core::RgbImage;

/// Get the display color of a label.
///
/// Each channel is a fixed multiplicative hash of the label.
pub fn label_color(label: Label) -> (u8, u8, u8) {
    let label = label as u64;
    let r = ((label + 37) * 791) % 256;
    let g = ((label + 19) * 567) % 256;
    let b = ((label + 51) * 354) % 256;
    (r as u8, g as u8, b as u8)
}

/// Render the canonical labels of a labelled image.
///
/// Pixels of one region share one color, including pixels whose stored
/// label was merged away after they were written.
pub fn render_labels(labelled: &LabelledImage) -> RegionResult<RgbImage> {
    render_grid(&labelled.canonical_grid())
}

/// Render the labels stored in a grid as they are, without alias resolution.
pub fn render_grid(grid: &LabelGrid) -> RegionResult<RgbImage> {
    let mut out = RgbImage::new(grid.width(), grid.height())?;
    for (p, label) in grid.iter() {
        let (r, g, b) = label_color(label);
        out.set_rgb(p.x, p.y, r, g, b)?;
    }
    Ok(out)
}
