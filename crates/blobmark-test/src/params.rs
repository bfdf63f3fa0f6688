//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use blobmark_core::RgbImage;
use blobmark_io::ImageFormat;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse mode from a string; anything unrecognized means compare
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running check index, the mode and every
/// recorded failure. Checks never panic; call [`RegParams::cleanup`] at the
/// end and assert on its result.
pub struct RegParams {
    /// Name of the test (e.g., "label")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two values within an allowed difference
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Record the outcome of an arbitrary condition
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            self.fail(format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            ));
        }
        condition
    }

    /// Compare two images for exact equality
    pub fn compare_images(&mut self, img1: &RgbImage, img2: &RgbImage) -> bool {
        self.index += 1;

        if img1.width() != img2.width() || img1.height() != img2.height() {
            self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - dimension mismatch \
                 ({}x{} vs {}x{})",
                self.test_name,
                self.index,
                img1.width(),
                img1.height(),
                img2.width(),
                img2.height()
            ));
            return false;
        }

        if let Some((x, y)) = first_difference(img1, img2) {
            self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - pixel mismatch at ({}, {})",
                self.test_name, self.index, x, y
            ));
            return false;
        }

        true
    }

    /// Write an image to the regout directory and check it against its
    /// golden file
    pub fn write_image_and_check(&mut self, img: &RgbImage, format: ImageFormat) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            format.extension()
        );

        blobmark_io::write_image(img, &local_path, format).map_err(|e| {
            TestError::ImageWrite {
                path: local_path.clone(),
                message: e.to_string(),
            }
        })?;

        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode the file becomes the golden file. In compare mode the
    /// golden file must exist and match byte for byte or, for images, pixel
    /// for pixel.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    self.fail(format!(
                        "Failure in {}_reg: golden file not found: {}",
                        self.test_name, golden_path
                    ));
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                if local_data != golden_data && !same_image_files(local_path, &golden_path) {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    ));
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if every check passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// First pixel at which two equally sized images differ
fn first_difference(img1: &RgbImage, img2: &RgbImage) -> Option<(u32, u32)> {
    for y in 0..img1.height() {
        if img1.row(y) != img2.row(y) {
            let x = img1
                .row(y)
                .chunks_exact(3)
                .zip(img2.row(y).chunks_exact(3))
                .position(|(a, b)| a != b)
                .unwrap_or(0);
            return Some((x as u32, y));
        }
    }
    None
}

/// Compare two image files pixel-by-pixel
fn same_image_files(path1: &str, path2: &str) -> bool {
    match (
        blobmark_io::read_image(path1),
        blobmark_io::read_image(path2),
    ) {
        (Ok(img1), Ok(img2)) => {
            img1.width() == img2.width()
                && img1.height() == img2.height()
                && first_difference(&img1, &img2).is_none()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(RegTestMode::parse("generate"), RegTestMode::Generate);
        assert_eq!(RegTestMode::parse("DISPLAY"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse(""), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse("bogus"), RegTestMode::Compare);
    }

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_check() {
        let mut rp = RegParams::new("test");
        assert!(rp.check(true, "always"));
        assert!(!rp.check(false, "never"));
        assert!(rp.failures()[0].contains("never"));
    }

    #[test]
    fn test_compare_images() {
        let mut rp = RegParams::new("test");
        let a = RgbImage::new(3, 2).unwrap();
        let mut b = a.clone();
        assert!(rp.compare_images(&a, &b));

        b.set_rgb(2, 1, 1, 0, 0).unwrap();
        assert!(!rp.compare_images(&a, &b));
        assert!(rp.failures()[0].contains("(2, 1)"));

        let c = RgbImage::new(2, 2).unwrap();
        assert!(!rp.compare_images(&a, &c));
    }

    #[test]
    fn test_missing_golden_fails_in_compare_mode() {
        let mut rp = RegParams::new("harness_missing_golden");
        rp.mode = RegTestMode::Compare;
        let golden = format!("{}/harness_missing_golden_golden.01.pnm", golden_dir());
        let _ = fs::remove_file(&golden);

        let img = RgbImage::new(2, 2).unwrap();
        rp.write_image_and_check(&img, ImageFormat::Pnm).unwrap();
        assert!(!rp.is_success());
        assert!(rp.failures()[0].contains("golden file not found"));
        assert!(!Path::new(&golden).exists());
    }

    #[test]
    fn test_first_difference() {
        let a = RgbImage::new(4, 4).unwrap();
        let mut b = a.clone();
        assert_eq!(first_difference(&a, &b), None);
        b.set_rgb(3, 2, 0, 0, 9).unwrap();
        assert_eq!(first_difference(&a, &b), Some((3, 2)));
    }
}
