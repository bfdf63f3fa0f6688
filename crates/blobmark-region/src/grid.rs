//! Padded label grid
//!
//! The grid stores one label per pixel in a flat buffer of
//! `(width + 2) * (height + 2)` cells. Logical pixel `(x, y)` lives at padded
//! cell `(x + 1, y + 1)`; the outermost ring of cells is a sentinel that is
//! zero at construction and can never be written, so a neighbor lookup from
//! any in-range pixel stays inside the buffer and reads background at image
//! edges.

use crate::error::{RegionError, RegionResult};
use blobmark_core::Point;

/// Region label. `0` is background; positive values are region ids.
pub type Label = u32;

/// Background label
pub const BACKGROUND: Label = 0;

/// Compass direction from a pixel to one of its eight neighbors
///
/// Image rows grow downwards, so North is `y - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All eight directions, clockwise from North.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Neighbors visited before the current pixel in a raster scan.
    pub const PRECEDING: [Direction; 4] = [
        Direction::North,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::West,
    ];

    /// Get the `(dx, dy)` step for this direction.
    #[inline]
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }
}

/// Label grid with a one-cell zero border
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    width: u32,
    height: u32,
    /// Row-major padded cells
    cells: Vec<Label>,
}

impl LabelGrid {
    /// Create a grid for a `width` x `height` image with every cell zero.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidDimension`] if width or height is 0, and
    /// [`RegionError::GridTooLarge`] if the padded size overflows `usize`.
    pub fn new(width: u32, height: u32) -> RegionResult<Self> {
        if width == 0 || height == 0 {
            return Err(RegionError::InvalidDimension { width, height });
        }

        let len = (width as usize)
            .checked_add(2)
            .zip((height as usize).checked_add(2))
            .and_then(|(pw, ph)| pw.checked_mul(ph))
            .ok_or(RegionError::GridTooLarge { width, height })?;

        Ok(Self {
            width,
            height,
            cells: vec![BACKGROUND; len],
        })
    }

    /// Get the logical width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the logical height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the width including the sentinel columns.
    #[inline]
    pub fn padded_width(&self) -> usize {
        self.width as usize + 2
    }

    /// Get the height including the sentinel rows.
    #[inline]
    pub fn padded_height(&self) -> usize {
        self.height as usize + 2
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "label grid access ({}, {}) out of range for {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize + 1) * self.padded_width() + x as usize + 1
    }

    /// Get the label at logical coordinate `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Label {
        self.cells[self.index(x, y)]
    }

    /// Set the label at logical coordinate `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`. The sentinel ring is not
    /// addressable through this method.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, label: Label) {
        let i = self.index(x, y);
        self.cells[i] = label;
    }

    /// Get the label one step from `(x, y)` in `direction`.
    ///
    /// Neighbors outside the image read as [`BACKGROUND`] from the sentinel ring.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` itself is out of range.
    #[inline]
    pub fn neighbor(&self, x: u32, y: u32, direction: Direction) -> Label {
        let (dx, dy) = direction.offset();
        let i = self.index(x, y) as isize + dy * self.padded_width() as isize + dx;
        self.cells[i as usize]
    }

    /// Get the labels of logical row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[Label] {
        let start = self.index(0, y);
        &self.cells[start..start + self.width as usize]
    }

    /// Iterate over every logical cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Label)> + '_ {
        (0..self.height).flat_map(move |y| {
            self.row(y)
                .iter()
                .enumerate()
                .map(move |(x, &label)| (Point::new(x as u32, y), label))
        })
    }

    /// Iterate over the sentinel ring cells.
    pub fn border_cells(&self) -> impl Iterator<Item = Label> + '_ {
        let pw = self.padded_width();
        let ph = self.padded_height();
        self.cells
            .iter()
            .enumerate()
            .filter(move |(i, _)| {
                let (px, py) = (i % pw, i / pw);
                px == 0 || py == 0 || px == pw - 1 || py == ph - 1
            })
            .map(|(_, &label)| label)
    }

    /// Check that the sentinel ring is still all background.
    pub fn border_is_clear(&self) -> bool {
        self.border_cells().all(|label| label == BACKGROUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(
            LabelGrid::new(0, 3),
            Err(RegionError::InvalidDimension {
                width: 0,
                height: 3
            })
        ));
        assert!(LabelGrid::new(3, 0).is_err());
    }

    #[test]
    fn test_padded_size() {
        let grid = LabelGrid::new(4, 3).unwrap();
        assert_eq!(grid.padded_width(), 6);
        assert_eq!(grid.padded_height(), 5);
        assert_eq!(grid.border_cells().count(), 2 * 6 + 2 * 3);
        assert!(grid.border_is_clear());
    }

    #[test]
    fn test_set_get() {
        let mut grid = LabelGrid::new(3, 3).unwrap();
        grid.set(2, 1, 7);
        assert_eq!(grid.get(2, 1), 7);
        assert_eq!(grid.row(1), &[0, 0, 7]);
        grid.set(2, 1, BACKGROUND);
        assert_eq!(grid.get(2, 1), BACKGROUND);
    }

    #[test]
    fn test_neighbor_directions() {
        let mut grid = LabelGrid::new(3, 3).unwrap();
        let mut next = 1;
        for y in 0..3 {
            for x in 0..3 {
                grid.set(x, y, next);
                next += 1;
            }
        }
        // Centre (1,1) is 5; labels are laid out 1..=9 row-major
        assert_eq!(grid.neighbor(1, 1, Direction::North), 2);
        assert_eq!(grid.neighbor(1, 1, Direction::NorthEast), 3);
        assert_eq!(grid.neighbor(1, 1, Direction::East), 6);
        assert_eq!(grid.neighbor(1, 1, Direction::SouthEast), 9);
        assert_eq!(grid.neighbor(1, 1, Direction::South), 8);
        assert_eq!(grid.neighbor(1, 1, Direction::SouthWest), 7);
        assert_eq!(grid.neighbor(1, 1, Direction::West), 4);
        assert_eq!(grid.neighbor(1, 1, Direction::NorthWest), 1);
    }

    #[test]
    fn test_neighbor_at_edges_reads_sentinel() {
        let mut grid = LabelGrid::new(2, 2).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                grid.set(x, y, 1);
            }
        }
        for d in Direction::ALL {
            let (dx, dy) = d.offset();
            // Corner (0,0): anything pointing left or up is outside
            let expected = if dx < 0 || dy < 0 { BACKGROUND } else { 1 };
            assert_eq!(grid.neighbor(0, 0, d), expected, "direction {:?}", d);
        }
        assert_eq!(grid.neighbor(1, 1, Direction::SouthEast), BACKGROUND);
        assert!(grid.border_is_clear());
    }

    #[test]
    fn test_single_pixel_grid() {
        let mut grid = LabelGrid::new(1, 1).unwrap();
        grid.set(0, 0, 3);
        for d in Direction::ALL {
            assert_eq!(grid.neighbor(0, 0, d), BACKGROUND);
        }
    }

    #[test]
    fn test_iter_row_major() {
        let mut grid = LabelGrid::new(2, 2).unwrap();
        grid.set(1, 0, 4);
        let cells: Vec<_> = grid.iter().collect();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[1], (Point::new(1, 0), 4));
        assert_eq!(cells[2], (Point::new(0, 1), 0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_past_width_panics() {
        let mut grid = LabelGrid::new(2, 2).unwrap();
        grid.set(2, 0, 1);
    }

    #[test]
    fn test_preceding_are_before_in_raster_order() {
        for d in Direction::PRECEDING {
            let (dx, dy) = d.offset();
            assert!(dy < 0 || (dy == 0 && dx < 0), "{:?}", d);
        }
    }
}
