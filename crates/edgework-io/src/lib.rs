//! edgework-io - Grayscale image I/O for edgework
//!
//! Loads PNG and binary PGM files into [`Raster`]s and writes rasters back
//! out as 8-bit grayscale. Colour input is reduced to luminance on load.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | gray, gray+alpha, RGB, RGBA, palette; 1-16 bit | 8-bit gray | `png-format` |
//! | PGM    | P5, maxval <= 255 | P5, maxval 255 | `pnm` |
//!
//! # Examples
//!
//! ```no_run
//! use edgework_io::{read_image, write_image};
//!
//! let raster = read_image("input.png").unwrap();
//! write_image(&raster, "copy.pgm").unwrap();
//! ```

pub mod error;
pub mod format;

#[cfg(feature = "png-format")]
pub mod png;

#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::ImageFormat;

use edgework_core::Raster;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Read a grayscale raster from a file.
///
/// The format comes from the file extension, or from the magic number when
/// the extension is missing or unrecognized.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);

    let format = match ImageFormat::from_path(path) {
        Some(format) => format,
        None => ImageFormat::from_magic(reader.fill_buf()?).ok_or_else(|| {
            IoError::UnsupportedFormat(format!("cannot identify {}", path.display()))
        })?,
    };

    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pgm => pnm::read_pnm(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{} support not enabled",
            other
        ))),
    }
}

/// Write a raster to a file as 8-bit grayscale.
///
/// The format is chosen from the file extension (`.png`, `.pgm` or `.pnm`).
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).ok_or_else(|| {
        IoError::UnsupportedFormat(format!("unknown extension: {}", path.display()))
    })?;
    write_image_format(raster, path, format)
}

/// Write a raster to a file in an explicit format, ignoring the extension
pub fn write_image_format<P: AsRef<Path>>(
    raster: &Raster,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(raster, &mut writer)?,
        #[cfg(feature = "pnm")]
        ImageFormat::Pgm => pnm::write_pnm(raster, &mut writer)?,
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "{} support not enabled",
                other
            )));
        }
    }
    writer.flush()?;
    Ok(())
}
