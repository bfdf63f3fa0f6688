//! blobmark-io - Image I/O for blobmark
//!
//! Reads and writes [`RgbImage`]s in the formats used to feed the labeller
//! and inspect its output:
//!
//! - **PNG** (feature `png-format`) - all color types, decoded to 8-bit RGB
//! - **PNM** (feature `pnm`) - binary PGM (P5) and PPM (P6)

pub mod error;
pub mod format;

#[cfg(feature = "png-format")]
pub mod png;

#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use blobmark_core::RgbImage;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file, detecting the format from its contents.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<RgbImage> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    log::debug!("reading {} ({} bytes)", path.display(), data.len());
    read_image_mem(&data)
}

/// Read an image from an in-memory encoded buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<RgbImage> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(data),
        #[allow(unreachable_patterns)]
        format => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            format
        ))),
    }
}

/// Write an image to a file in the given format.
pub fn write_image<P: AsRef<Path>>(img: &RgbImage, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_image_to(img, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into a byte buffer in the given format.
pub fn write_image_mem(img: &RgbImage, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_to(img, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_to<W: Write>(img: &RgbImage, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(img, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(img, writer),
        #[allow(unreachable_patterns)]
        format => {
            let _ = writer;
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                format
            )))
        }
    }
}
