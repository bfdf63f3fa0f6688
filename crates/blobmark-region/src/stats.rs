//! Region statistics
//!
//! Second pass over a finished label grid: accumulates pixel mass and an
//! inclusive bounding box for every canonical label.

use crate::alias::AliasTable;
use crate::grid::{BACKGROUND, LabelGrid};
use blobmark_core::{Point, Rect};

/// Mass and bounding box of one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStats {
    /// Number of pixels in the region
    pub mass: u32,
    /// Top-left corner of the bounding box (inclusive)
    pub min_corner: Point,
    /// Bottom-right corner of the bounding box (inclusive)
    pub max_corner: Point,
}

impl Default for RegionStats {
    fn default() -> Self {
        Self::empty()
    }
}

impl RegionStats {
    /// An empty record, ready to accumulate.
    ///
    /// The corners start at opposite extremes so the first pixel added
    /// becomes both corners.
    pub const fn empty() -> Self {
        Self {
            mass: 0,
            min_corner: Point::new(u32::MAX, u32::MAX),
            max_corner: Point::new(0, 0),
        }
    }

    /// Add one pixel to the region.
    #[inline]
    pub fn add(&mut self, p: Point) {
        self.mass += 1;
        self.min_corner.x = self.min_corner.x.min(p.x);
        self.min_corner.y = self.min_corner.y.min(p.y);
        self.max_corner.x = self.max_corner.x.max(p.x);
        self.max_corner.y = self.max_corner.y.max(p.y);
    }

    /// Check whether no pixel belongs to this record.
    ///
    /// Empty records are placeholders for labels that were merged away.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mass == 0
    }

    /// Bounding box width, or 0 for an empty record.
    pub fn width(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.max_corner.x - self.min_corner.x + 1
        }
    }

    /// Bounding box height, or 0 for an empty record.
    pub fn height(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.max_corner.y - self.min_corner.y + 1
        }
    }

    /// Bounding box as a [`Rect`], or `None` for an empty record.
    pub fn bounds(&self) -> Option<Rect> {
        (!self.is_empty()).then(|| Rect::from_inclusive_corners(self.min_corner, self.max_corner))
    }

    /// Check whether a point lies inside the bounding box.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().is_some_and(|rect| rect.contains_point(p))
    }
}

/// Accumulate statistics for every canonical label in `grid`.
///
/// The result has one record per label up to the highest canonical label in
/// `aliases`; record `i` describes label `i + 1`. Every grid cell is
/// resolved through `aliases` before it is counted, so cells written before
/// a later merge land in the surviving region. Records whose label was merged
/// away stay empty.
pub fn collect_region_stats(grid: &LabelGrid, aliases: &AliasTable) -> Vec<RegionStats> {
    let max_label = aliases.max_canonical() as usize;
    let mut regions = vec![RegionStats::empty(); max_label];

    for (p, label) in grid.iter() {
        if label == BACKGROUND {
            continue;
        }
        let canonical = aliases.resolve(label);
        regions[canonical as usize - 1].add(p);
    }

    regions
}
