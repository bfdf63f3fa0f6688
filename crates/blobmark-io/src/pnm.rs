//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P5 binary) and PPM (P6 binary) images and writes PPM (P6).
//! ASCII variants (P1/P2/P3), PBM and PAM (P7) are not supported. Samples
//! with a maxval other than 255 are rescaled to 0..=255.

use crate::{IoError, IoResult};
use blobmark_core::RgbImage;
use std::io::{Read, Write};

/// Parsed PNM header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PnmHeader {
    /// Samples per pixel: 1 for P5, 3 for P6
    channels: usize,
    width: u32,
    height: u32,
    maxval: u32,
    /// Offset of the first raster byte
    data_offset: usize,
}

/// Cursor over header tokens, skipping whitespace and `#` comments.
struct HeaderTokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderTokens<'a> {
    fn skip_space(&mut self) {
        while let Some(&c) = self.data.get(self.pos) {
            if c == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else if c.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_u32(&mut self, what: &str) -> IoResult<u32> {
        self.skip_space();
        let start = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData(format!("PNM header: bad {}", what)))
    }
}

fn parse_header(data: &[u8]) -> IoResult<PnmHeader> {
    let channels = match data.get(..2) {
        Some(b"P5") => 1,
        Some(b"P6") => 3,
        _ => {
            return Err(IoError::UnsupportedFormat(
                "only binary PGM (P5) and PPM (P6) are supported".to_string(),
            ));
        }
    };

    let mut tokens = HeaderTokens { data, pos: 2 };
    let width = tokens.next_u32("width")?;
    let height = tokens.next_u32("height")?;
    let maxval = tokens.next_u32("maxval")?;

    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!(
            "PNM header: maxval {} out of range",
            maxval
        )));
    }

    // Exactly one whitespace byte separates the header from the raster
    match data.get(tokens.pos) {
        Some(c) if c.is_ascii_whitespace() => {}
        _ => {
            return Err(IoError::InvalidData(
                "PNM header: missing separator before raster".to_string(),
            ));
        }
    }

    Ok(PnmHeader {
        channels,
        width,
        height,
        maxval,
        data_offset: tokens.pos + 1,
    })
}

/// Read a PNM image (P5/P6) from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the `P5`/`P6` magic
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<RgbImage> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let header = parse_header(&data)?;
    let bytes_per_sample = if header.maxval > 255 { 2 } else { 1 };
    let sizes = (header.width as usize)
        .checked_mul(header.channels * bytes_per_sample)
        .and_then(|row| Some((row, row.checked_mul(header.height as usize)?)));
    let Some((row_bytes, required)) = sizes else {
        return Err(IoError::InvalidData(format!(
            "PNM header: {}x{} image too large",
            header.width, header.height
        )));
    };
    let raster = &data[header.data_offset..];
    if raster.len() < required {
        return Err(IoError::InvalidData(format!(
            "PNM raster truncated: {} bytes, need {}",
            raster.len(),
            required
        )));
    }

    let scale = |i: usize| -> u8 {
        let v = if bytes_per_sample == 2 {
            (raster[i] as u32) << 8 | raster[i + 1] as u32
        } else {
            raster[i] as u32
        };
        if header.maxval == 255 {
            v as u8
        } else {
            ((v.min(header.maxval) * 255 + header.maxval / 2) / header.maxval) as u8
        }
    };

    let mut img = RgbImage::new(header.width, header.height)?;
    for y in 0..header.height {
        for x in 0..header.width {
            let i = y as usize * row_bytes + x as usize * header.channels * bytes_per_sample;
            let (r, g, b) = if header.channels == 1 {
                let v = scale(i);
                (v, v, v)
            } else {
                (
                    scale(i),
                    scale(i + bytes_per_sample),
                    scale(i + 2 * bytes_per_sample),
                )
            };
            img.set_rgb(x, y, r, g, b)?;
        }
    }

    Ok(img)
}

/// Write an image as binary PPM (P6) to a writer.
///
/// # Arguments
/// * `img`    - The image to encode
/// * `writer` - Destination writer
pub fn write_pnm<W: Write>(img: &RgbImage, mut writer: W) -> IoResult<()> {
    write!(writer, "P6\n{} {}\n255\n", img.width(), img.height())?;
    for y in 0..img.height() {
        writer.write_all(img.row(y))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pnm_roundtrip() {
        let mut img = RgbImage::new(3, 2).unwrap();
        img.set_rgb(0, 0, 1, 2, 3).unwrap();
        img.set_rgb(2, 1, 250, 251, 252).unwrap();

        let mut buffer = Vec::new();
        write_pnm(&img, &mut buffer).unwrap();
        assert!(buffer.starts_with(b"P6\n3 2\n255\n"));

        let img2 = read_pnm(buffer.as_slice()).unwrap();
        assert_eq!(img2, img);
    }

    #[test]
    fn test_read_pgm_with_comment() {
        let data = b"P5\n# a comment\n2 1\n255\n\x00\xff";
        let img = read_pnm(&data[..]).unwrap();
        assert_eq!(img.get_rgb(0, 0), Some((0, 0, 0)));
        assert_eq!(img.get_rgb(1, 0), Some((255, 255, 255)));
    }

    #[test]
    fn test_read_rescales_maxval() {
        let data = b"P5 2 1 15 \x00\x0f";
        let img = read_pnm(&data[..]).unwrap();
        assert_eq!(img.get_rgb(1, 0), Some((255, 255, 255)));
    }

    #[test]
    fn test_read_16bit() {
        let data = b"P5 1 1 65535\n\xff\xff";
        let img = read_pnm(&data[..]).unwrap();
        assert_eq!(img.get_rgb(0, 0), Some((255, 255, 255)));
    }

    #[test]
    fn test_read_truncated() {
        let data = b"P6\n2 2\n255\n\x00\x00\x00";
        assert!(matches!(
            read_pnm(&data[..]),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_read_oversized_header() {
        let data = b"P6\n4294967295 4294967295\n65535\n\x00";
        assert!(matches!(
            read_pnm(&data[..]),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_read_rejects_ascii() {
        assert!(matches!(
            read_pnm(&b"P3\n1 1\n255\n0 0 0\n"[..]),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_read_zero_size() {
        let data = b"P6\n0 2\n255\n";
        assert!(matches!(read_pnm(&data[..]), Err(IoError::Core(_))));
    }
}
