//! Test inputs and a reference labeller
//!
//! Masks are row-major `Vec<bool>` with `true` for foreground.

use blobmark_core::RgbImage;
use std::collections::VecDeque;

/// Build a mask from ASCII rows; `#` is foreground, anything else is
/// background. All rows must have the same length.
pub fn mask_from_ascii(rows: &[&str]) -> (u32, u32, Vec<bool>) {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    let mut mask = Vec::with_capacity(width as usize * height as usize);
    for row in rows {
        assert_eq!(row.len(), width as usize, "ragged ASCII mask");
        mask.extend(row.bytes().map(|c| c == b'#'));
    }
    (width, height, mask)
}

/// Render a mask as black foreground on a white background.
pub fn mask_image(width: u32, height: u32, mask: &[bool]) -> RgbImage {
    assert_eq!(mask.len(), width as usize * height as usize);
    let mut img = RgbImage::new(width, height).expect("mask image dimensions");
    img.fill(255, 255, 255);
    for (i, _) in mask.iter().enumerate().filter(|(_, fg)| **fg) {
        let x = (i % width as usize) as u32;
        let y = (i / width as usize) as u32;
        img.set_rgb(x, y, 0, 0, 0).expect("pixel in range");
    }
    img
}

/// Build an image from ASCII rows; `#` is black, anything else white.
pub fn image_from_ascii(rows: &[&str]) -> RgbImage {
    let (width, height, mask) = mask_from_ascii(rows);
    mask_image(width, height, &mask)
}

/// Simple linear congruential generator for reproducible masks
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u32) -> Self {
        Self { state: seed as u64 }
    }

    fn next(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    fn next_f64(&mut self) -> f64 {
        // High bits only; the low bits of an LCG have short periods
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Generate a random mask where each pixel is foreground with probability
/// `density`. The same seed always yields the same mask.
pub fn random_mask(width: u32, height: u32, density: f64, seed: u32) -> Vec<bool> {
    let mut rng = SimpleRng::new(seed);
    (0..width as usize * height as usize)
        .map(|_| rng.next_f64() < density)
        .collect()
}

/// Label 8-connected foreground components by breadth-first flood fill.
///
/// Returns one entry per pixel: 0 for background, otherwise the component
/// number. Components are numbered from 1 in raster order of their first
/// pixel.
pub fn flood_fill_components(width: u32, height: u32, mask: &[bool]) -> Vec<u32> {
    let w = width as usize;
    let h = height as usize;
    assert_eq!(mask.len(), w * h);

    let mut out = vec![0u32; w * h];
    let mut next = 0u32;
    let mut queue = VecDeque::new();

    for start in 0..w * h {
        if !mask[start] || out[start] != 0 {
            continue;
        }
        next += 1;
        out[start] = next;
        queue.push_back(start);

        while let Some(i) = queue.pop_front() {
            let (x, y) = ((i % w) as isize, (i / w) as isize);
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (nx, ny) = (x + dx, y + dy);
                    if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                        continue;
                    }
                    let j = ny as usize * w + nx as usize;
                    if mask[j] && out[j] == 0 {
                        out[j] = next;
                        queue.push_back(j);
                    }
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_from_ascii() {
        let (w, h, mask) = mask_from_ascii(&["#.", ".#", "##"]);
        assert_eq!((w, h), (2, 3));
        assert_eq!(mask, vec![true, false, false, true, true, true]);
    }

    #[test]
    fn test_image_from_ascii() {
        let img = image_from_ascii(&["#.", ".."]);
        assert_eq!(img.get_rgb(0, 0), Some((0, 0, 0)));
        assert_eq!(img.get_rgb(1, 0), Some((255, 255, 255)));
    }

    #[test]
    fn test_random_mask_is_reproducible() {
        let a = random_mask(16, 16, 0.5, 7);
        let b = random_mask(16, 16, 0.5, 7);
        let c = random_mask(16, 16, 0.5, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_random_mask_density_extremes() {
        assert!(random_mask(8, 8, 0.0, 1).iter().all(|&fg| !fg));
        assert!(random_mask(8, 8, 1.0, 1).iter().all(|&fg| fg));
    }

    #[test]
    fn test_flood_fill_eight_connected() {
        let (w, h, mask) = mask_from_ascii(&["#..#", ".#..", "...#"]);
        let labels = flood_fill_components(w, h, &mask);
        assert_eq!(labels, vec![1, 0, 0, 2, 0, 1, 0, 0, 0, 0, 0, 3]);
    }

    #[test]
    fn test_flood_fill_numbering_follows_first_pixel() {
        // The U is reached first through its left arm
        let (w, h, mask) = mask_from_ascii(&["#.#", "#.#", "###"]);
        let labels = flood_fill_components(w, h, &mask);
        assert!(labels.iter().all(|&l| l <= 1));
        assert_eq!(labels.iter().filter(|&&l| l == 1).count(), 7);
    }
}
