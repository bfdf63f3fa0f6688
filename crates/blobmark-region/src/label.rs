//! Single-pass region labelling
//!
//! Thresholds an RGB image and labels its 8-connected foreground regions in
//! one top-to-bottom, left-to-right sweep. Each foreground pixel looks only
//! at neighbors the sweep has already visited (North, North-East,
//! North-West, West). When North-East and a western neighbor carry different
//! classes, the two classes are merged in the alias table on the spot, so no
//! second relabelling sweep is needed. A statistics pass then collects mass
//! and bounding box for every canonical label.

use crate::alias::AliasTable;
use crate::error::RegionResult;
use crate::grid::{BACKGROUND, Direction, Label, LabelGrid};
use crate::stats::{RegionStats, collect_region_stats};
use crate::threshold::ThresholdClassifier;
use blobmark_core::{Point, RgbImage};

/// Default foreground threshold
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Options for region labelling
#[derive(Debug, Clone)]
pub struct LabelOptions {
    /// Foreground threshold in `[0, 1]`, as a fraction of full brightness
    pub threshold: f32,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl LabelOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Result of a labelling run
///
/// Owns the label grid, the alias table that resolves it, and one
/// [`RegionStats`] record per canonical label.
#[derive(Debug, Clone)]
pub struct LabelledImage {
    grid: LabelGrid,
    aliases: AliasTable,
    regions: Vec<RegionStats>,
}

impl LabelledImage {
    /// Get the image width.
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Get the image height.
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Get the raw label grid.
    ///
    /// Cells hold the label that was canonical when the pixel was visited;
    /// resolve them through [`Self::aliases`] (or use [`Self::label_at`]) to
    /// get the final region.
    pub fn grid(&self) -> &LabelGrid {
        &self.grid
    }

    /// Get the alias table.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Get all region records, including empty placeholders.
    ///
    /// Record `i` describes label `i + 1`.
    pub fn regions(&self) -> &[RegionStats] {
        &self.regions
    }

    /// Get the canonical label of pixel `(x, y)`, or 0 for background.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    pub fn label_at(&self, x: u32, y: u32) -> Label {
        match self.grid.get(x, y) {
            BACKGROUND => BACKGROUND,
            label => self.aliases.resolve(label),
        }
    }

    /// Get the statistics of a non-empty region.
    pub fn region(&self, label: Label) -> Option<&RegionStats> {
        if label == BACKGROUND {
            return None;
        }
        self.regions
            .get(label as usize - 1)
            .filter(|stats| !stats.is_empty())
    }

    /// Iterate over non-empty regions as `(label, stats)`.
    pub fn iter_regions(&self) -> impl Iterator<Item = (Label, &RegionStats)> + '_ {
        self.regions
            .iter()
            .enumerate()
            .filter(|(_, stats)| !stats.is_empty())
            .map(|(i, stats)| (i as Label + 1, stats))
    }

    /// Number of non-empty regions.
    pub fn region_count(&self) -> usize {
        self.iter_regions().count()
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> u64 {
        self.regions.iter().map(|stats| stats.mass as u64).sum()
    }

    /// Copy of the grid with every cell resolved to its canonical label.
    pub fn canonical_grid(&self) -> LabelGrid {
        let mut grid = self.grid.clone();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                grid.set(x, y, self.label_at(x, y));
            }
        }
        grid
    }

    /// Split the result into its parts.
    pub fn into_parts(self) -> (LabelGrid, AliasTable, Vec<RegionStats>) {
        (self.grid, self.aliases, self.regions)
    }
}

/// Threshold and label an RGB image.
///
/// # Arguments
///
/// * `image` - Input color image
/// * `options` - Labelling options
///
/// # Returns
///
/// The labelled image with per-region statistics.
///
/// # Examples
///
/// ```
/// use blobmark_core::RgbImage;
/// use blobmark_region::{LabelOptions, label_image};
///
/// let mut img = RgbImage::new(5, 5).unwrap();
/// img.fill(255, 255, 255);
/// img.set_rgb(2, 2, 0, 0, 0).unwrap();
///
/// let labelled = label_image(&img, &LabelOptions::default()).unwrap();
/// assert_eq!(labelled.region_count(), 1);
/// assert_eq!(labelled.region(1).unwrap().mass, 1);
/// ```
pub fn label_image(image: &RgbImage, options: &LabelOptions) -> RegionResult<LabelledImage> {
    let classifier = ThresholdClassifier::new(options.threshold);
    label_foreground(image.width(), image.height(), |x, y| {
        let (r, g, b) = image.get_rgb_unchecked(x, y);
        classifier.is_foreground(r, g, b)
    })
}

/// Threshold and label an RGB image with the given threshold.
pub fn label_image_with_threshold(
    image: &RgbImage,
    threshold: f32,
) -> RegionResult<LabelledImage> {
    label_image(image, &LabelOptions::new().with_threshold(threshold))
}

/// Label the foreground of a `width` x `height` mask.
///
/// `is_foreground` is called exactly once per pixel, in raster order.
///
/// # Errors
///
/// Returns an error if width or height is 0.
pub fn label_foreground<F>(
    width: u32,
    height: u32,
    mut is_foreground: F,
) -> RegionResult<LabelledImage>
where
    F: FnMut(u32, u32) -> bool,
{
    let mut grid = LabelGrid::new(width, height)?;
    let mut aliases = AliasTable::new();

    for y in 0..height {
        for x in 0..width {
            if is_foreground(x, y) {
                label_pixel(&mut grid, &mut aliases, x, y);
            } else {
                grid.set(x, y, BACKGROUND);
            }
        }
    }

    let regions = collect_region_stats(&grid, &aliases);

    let labelled = LabelledImage {
        grid,
        aliases,
        regions,
    };
    log::debug!(
        "labelled {}x{} image: {} provisional labels, {} regions, {} foreground pixels",
        width,
        height,
        labelled.aliases.len(),
        labelled.region_count(),
        labelled.foreground_count()
    );

    Ok(labelled)
}

/// Assign a label to the foreground pixel at `(x, y)`.
///
/// Neighbors are consulted in priority order North, North-East, North-West,
/// West. North-East is the only neighbor that can belong to a class the
/// western neighbors have not seen yet, so it is the only place two classes
/// can meet and need merging.
fn label_pixel(grid: &mut LabelGrid, aliases: &mut AliasTable, x: u32, y: u32) {
    let first = Direction::PRECEDING
        .into_iter()
        .map(|direction| (direction, grid.neighbor(x, y, direction)))
        .find(|&(_, label)| label != BACKGROUND);

    let label = match first {
        Some((Direction::NorthEast, north_east)) => {
            // North is background here; North-West takes precedence over West
            let other = match grid.neighbor(x, y, Direction::NorthWest) {
                BACKGROUND => grid.neighbor(x, y, Direction::West),
                north_west => north_west,
            };

            let north_east = aliases.resolve(north_east);
            if other != BACKGROUND {
                let other = aliases.resolve(other);
                aliases.merge(north_east, other)
            } else {
                north_east
            }
        }
        Some((_, label)) => aliases.resolve(label),
        None => aliases.allocate_new(),
    };
    grid.set(x, y, label);
}

/// Collect the pixels of every non-empty region, keyed by canonical label.
///
/// Regions are returned in increasing label order; pixels within a region
/// are in raster order.
pub fn region_pixels(labelled: &LabelledImage) -> Vec<(Label, Vec<Point>)> {
    let mut pixels: Vec<Vec<Point>> = labelled
        .regions()
        .iter()
        .map(|stats| Vec::with_capacity(stats.mass as usize))
        .collect();

    for (p, label) in labelled.grid().iter() {
        if label != BACKGROUND {
            let canonical = labelled.aliases().resolve(label);
            pixels[canonical as usize - 1].push(p);
        }
    }

    pixels
        .into_iter()
        .enumerate()
        .filter(|(_, points)| !points.is_empty())
        .map(|(i, points)| (i as Label + 1, points))
        .collect()
}
