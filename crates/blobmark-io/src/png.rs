//! PNG image format support
//!
//! Every PNG color type is decoded to an [`RgbImage`]: grayscale is
//! replicated across the three channels, palettes are expanded, alpha is
//! dropped and 16-bit samples keep their high byte. Images are always
//! written as 8-bit RGB.

use crate::{IoError, IoResult};
use blobmark_core::RgbImage;
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a sub-byte or 8-bit sample from a packed row.
#[inline]
fn packed_sample(row: &[u8], x: usize, bits: usize) -> u8 {
    match bits {
        8 => row[x],
        1 | 2 | 4 => {
            let per_byte = 8 / bits;
            let byte = row[x / per_byte];
            let shift = 8 - bits * (x % per_byte + 1);
            (byte >> shift) & ((1u8 << bits) - 1)
        }
        _ => unreachable!("packed sample depth {}", bits),
    }
}

/// Scale a gray sample of `bits` depth to the 0..=255 range.
#[inline]
fn scale_gray(val: u8, bits: usize) -> u8 {
    match bits {
        1 => val * 255,
        2 => val * 85,
        4 => val * 17,
        _ => val,
    }
}

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<RgbImage> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;
    let palette = info.palette.as_ref().map(|p| p.to_vec());

    if color_type == ColorType::Indexed && palette.is_none() {
        return Err(IoError::InvalidData(
            "indexed PNG without palette".to_string(),
        ));
    }

    let bits = match bit_depth {
        BitDepth::One => 1,
        BitDepth::Two => 2,
        BitDepth::Four => 4,
        BitDepth::Eight => 8,
        BitDepth::Sixteen => 16,
    };

    // Read image data
    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut img = RgbImage::new(width, height)?;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    // Bytes per sample for byte-aligned depths; 16-bit keeps the high byte
    let step = if bits == 16 { 2 } else { 1 };

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let xi = x as usize;
            let (r, g, b) = match color_type {
                ColorType::Grayscale => {
                    let v = if bits == 16 {
                        row[xi * 2]
                    } else {
                        scale_gray(packed_sample(row, xi, bits), bits)
                    };
                    (v, v, v)
                }
                ColorType::GrayscaleAlpha => {
                    let v = row[xi * 2 * step];
                    (v, v, v)
                }
                ColorType::Rgb => {
                    let i = xi * 3 * step;
                    (row[i], row[i + step], row[i + 2 * step])
                }
                ColorType::Rgba => {
                    let i = xi * 4 * step;
                    (row[i], row[i + step], row[i + 2 * step])
                }
                ColorType::Indexed => {
                    let index = packed_sample(row, xi, bits) as usize * 3;
                    match palette.as_deref().and_then(|p| p.get(index..index + 3)) {
                        Some(entry) => (entry[0], entry[1], entry[2]),
                        None => {
                            return Err(IoError::InvalidData(format!(
                                "palette index {} out of range",
                                index / 3
                            )));
                        }
                    }
                }
            };
            img.set_rgb(x, y, r, g, b)?;
        }
    }

    log::debug!(
        "decoded PNG {}x{} ({:?}, {:?})",
        width,
        height,
        color_type,
        bit_depth
    );

    Ok(img)
}

/// Write a PNG image as 8-bit RGB
pub fn write_png<W: Write>(img: &RgbImage, writer: W) -> IoResult<()> {
    let width = img.width();
    let height = img.height();

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    // PNG rows are tightly packed; drop any stride padding
    let mut data = Vec::with_capacity(width as usize * 3 * height as usize);
    for y in 0..height {
        data.extend_from_slice(img.row(y));
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
