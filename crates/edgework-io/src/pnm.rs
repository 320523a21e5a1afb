//! PGM (binary portable graymap) support
//!
//! Only the P5 variant with `maxval <= 255` is handled. Header fields may be
//! separated by any whitespace and interleaved with `#` comments. Samples
//! are read as stored; they are not rescaled to 255.

use crate::{IoError, IoResult};
use edgework_core::Raster;
use std::io::{BufRead, Write};

/// Read one byte, `None` at end of input
fn next_byte<R: BufRead>(reader: &mut R) -> IoResult<Option<u8>> {
    let byte = reader.fill_buf()?.first().copied();
    if byte.is_some() {
        reader.consume(1);
    }
    Ok(byte)
}

/// Read the next whitespace-delimited header token, skipping comments.
///
/// Consumes the single whitespace byte that ends the token, which for the
/// last header field is the separator before the raster data.
fn header_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    loop {
        let Some(b) = next_byte(reader)? else {
            break;
        };
        match b {
            b'#' if token.is_empty() => {
                let mut comment = Vec::new();
                reader.read_until(b'\n', &mut comment)?;
            }
            b if b.is_ascii_whitespace() => {
                if !token.is_empty() {
                    break;
                }
            }
            b => token.push(b as char),
        }
    }
    if token.is_empty() {
        return Err(IoError::InvalidData("truncated PGM header".to_string()));
    }
    Ok(token)
}

fn header_value<R: BufRead>(reader: &mut R, field: &str) -> IoResult<u32> {
    let token = header_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("bad PGM {}: {:?}", field, token)))
}

/// Read a binary PGM (P5) image
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Raster> {
    let magic = header_token(&mut reader)?;
    if magic != "P5" {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM variant {} (only P5 is supported)",
            magic
        )));
    }

    let width = header_value(&mut reader, "width")?;
    let height = header_value(&mut reader, "height")?;
    let maxval = header_value(&mut reader, "maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PGM maxval {} (expected 1..=255)",
            maxval
        )));
    }

    let mut data = vec![0u8; width as usize * height as usize];
    reader.read_exact(&mut data).map_err(|e| {
        IoError::DecodeError(format!("PGM data for {}x{}: {}", width, height, e))
    })?;

    Ok(Raster::from_u8(width, height, &data)?)
}

/// Write a raster as a binary PGM (P5) image with maxval 255
///
/// Samples are truncated and clamped into `0..=255`.
pub fn write_pnm<W: Write>(raster: &Raster, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", raster.width(), raster.height())?;
    writer.write_all(&raster.to_u8_clamped())?;
    writer.flush()?;
    Ok(())
}
