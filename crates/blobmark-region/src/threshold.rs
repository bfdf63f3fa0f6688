//! Foreground/background pixel classification
//!
//! A pixel is foreground (dark) when the sum of its three channels does not
//! exceed `threshold * 3 * 255`. The scaled limit is computed once when the
//! classifier is built.

use blobmark_core::color::{CHANNEL_MAX, channel_sum};

/// Result of classifying a single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelClass {
    /// Dark pixel, part of some region
    Foreground,
    /// Light pixel, never labelled
    Background,
}

/// Threshold classifier for RGB pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdClassifier {
    /// Largest channel sum still classified as foreground, in `0..=765`
    limit: u32,
}

impl ThresholdClassifier {
    /// Build a classifier for a threshold in `[0, 1]`.
    ///
    /// The limit is `(255 * threshold) * 3`, truncated toward zero. Values
    /// outside `[0, 1]` are not rejected; they saturate to "nothing but pure
    /// black" below 0 and "everything" above 1.
    pub fn new(threshold: f32) -> Self {
        let limit = (CHANNEL_MAX as f32 * threshold) * 3.0;
        Self {
            limit: limit as u32,
        }
    }

    /// Get the scaled channel-sum limit.
    #[inline]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Classify a pixel from its channel values.
    #[inline]
    pub fn classify(&self, r: u8, g: u8, b: u8) -> PixelClass {
        if self.is_foreground(r, g, b) {
            PixelClass::Foreground
        } else {
            PixelClass::Background
        }
    }

    /// Check whether a pixel is foreground.
    #[inline]
    pub fn is_foreground(&self, r: u8, g: u8, b: u8) -> bool {
        channel_sum(r, g, b) <= self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_scaling() {
        assert_eq!(ThresholdClassifier::new(0.0).limit(), 0);
        assert_eq!(ThresholdClassifier::new(1.0).limit(), 765);
        // 255 * 0.5 = 127.5, * 3 = 382.5 -> 382
        assert_eq!(ThresholdClassifier::new(0.5).limit(), 382);
    }

    #[test]
    fn test_zero_threshold_keeps_only_black() {
        let c = ThresholdClassifier::new(0.0);
        assert_eq!(c.classify(0, 0, 0), PixelClass::Foreground);
        assert_eq!(c.classify(0, 0, 1), PixelClass::Background);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let c = ThresholdClassifier::new(0.5);
        assert!(c.is_foreground(127, 127, 128)); // sum 382
        assert!(!c.is_foreground(127, 128, 128)); // sum 383
    }

    #[test]
    fn test_full_threshold_keeps_white() {
        let c = ThresholdClassifier::new(1.0);
        assert!(c.is_foreground(255, 255, 255));
    }

    #[test]
    fn test_out_of_range_saturates() {
        assert_eq!(ThresholdClassifier::new(-0.3).limit(), 0);
        assert!(ThresholdClassifier::new(2.0).is_foreground(255, 255, 255));
    }
}
