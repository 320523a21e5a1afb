//! Image format identification
//!
//! Formats are chosen from the file extension when writing. Reading falls
//! back to the magic number when the extension is missing or unknown.

use std::fmt;
use std::path::Path;

/// PNG signature: 89 50 4E 47 0D 0A 1A 0A
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Binary graymap signature
const PGM_MAGIC: &[u8] = b"P5";

/// Image formats understood by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// Binary portable graymap (P5)
    Pgm,
}

impl ImageFormat {
    /// Format for a file extension, case-insensitive
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "pgm" | "pnm" => Some(ImageFormat::Pgm),
            _ => None,
        }
    }

    /// Format implied by a path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Format identified by the leading bytes of an encoded image
    pub fn from_magic(header: &[u8]) -> Option<Self> {
        if header.starts_with(PNG_MAGIC) {
            Some(ImageFormat::Png)
        } else if header.starts_with(PGM_MAGIC) {
            Some(ImageFormat::Pgm)
        } else {
            None
        }
    }

    /// Canonical file extension
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Pgm => "pgm",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
