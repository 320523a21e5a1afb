//! PNG image format support
//!
//! Decoding accepts every PNG color type. Palettes and sub-byte depths are
//! expanded by the decoder, 16-bit samples keep their high byte, alpha is
//! ignored and color is reduced to luminance. Encoding always produces
//! 8-bit grayscale.

use crate::{IoError, IoResult};
use edgework_core::Raster;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Luminance of an RGB triple, rounded to the nearest gray level
#[inline]
fn luminance(r: u8, g: u8, b: u8) -> f64 {
    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64).round()
}

/// Read a PNG image as a grayscale raster
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();

    let channels = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };
    let bytes_per_sample = match bit_depth {
        BitDepth::Eight => 1,
        BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG bit depth after expansion: {:?}",
                other
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let stride = channels * bytes_per_sample;
    if bytes_per_row < width as usize * stride {
        return Err(IoError::InvalidData(format!(
            "PNG row of {} bytes is too short for width {}",
            bytes_per_row, width
        )));
    }

    let mut raster = Raster::new(width, height)?;
    for y in 0..height {
        let row = &buf[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        let out = raster.row_mut(y);
        for (x, v) in out.iter_mut().enumerate() {
            let px = &row[x * stride..(x + 1) * stride];
            // Big-endian 16-bit samples: the high byte comes first.
            let sample = |c: usize| px[c * bytes_per_sample];
            *v = if channels >= 3 {
                luminance(sample(0), sample(1), sample(2))
            } else {
                sample(0) as f64
            };
        }
    }

    Ok(raster)
}

/// Write a raster as an 8-bit grayscale PNG
///
/// Samples are truncated and clamped into `0..=255`.
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&raster.to_u8_clamped())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
