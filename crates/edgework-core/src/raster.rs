//! Raster - single-channel real-valued image
//!
//! `Raster` is a 2D array of `f64` samples and the common data carrier for
//! every algorithm in the library. Grayscale images conventionally arrive as
//! 0-255 integers widened to floating point; intermediate results (after
//! convolution, gradients, LoG) use the full real range.
//!
//! Binary rasters are a convention, not a type: samples are restricted to
//! [`BACKGROUND`] and [`FOREGROUND`], and any sample `> 0` counts as
//! foreground when a binary raster is consumed.
//!
//! # Examples
//!
//! ```
//! use edgework_core::Raster;
//!
//! let mut raster = Raster::new(100, 80).unwrap();
//! raster.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(raster.get_pixel(10, 20).unwrap(), 0.5);
//!
//! let (max_val, max_x, max_y) = raster.max();
//! assert_eq!((max_val, max_x, max_y), (0.5, 10, 20));
//! ```

use crate::error::{Error, Result};

/// Sample value marking foreground in a binary raster.
pub const FOREGROUND: f64 = 255.0;

/// Sample value marking background in a binary raster.
pub const BACKGROUND: f64 = 0.0;

/// Returns true if a sample of a binary raster is foreground.
#[inline]
pub fn is_foreground(value: f64) -> bool {
    value > 0.0
}

/// Single-channel floating-point raster
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The sample at (x, y)
/// (column x, row y) is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Sample data (row-major, no padding)
    data: Vec<f64>,
}

impl Raster {
    /// Create a new raster with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgework_core::Raster;
    ///
    /// let raster = Raster::new(640, 480).unwrap();
    /// assert_eq!(raster.width(), 640);
    /// assert_eq!(raster.height(), 480);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new raster with all samples set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(Raster {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a raster from row-major sample data
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` for a zero dimension and
    /// `Error::InvalidParameter` if the data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(Raster {
            width,
            height,
            data,
        })
    }

    /// Create a raster from 8-bit samples, widening each to `f64`
    pub fn from_u8(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        Self::from_data(width, height, data.iter().map(|&v| v as f64).collect())
    }

    /// Create a raster from a slice of equal-length rows
    ///
    /// Convenient for small hand-written fixtures.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.as_ref().len()) as u32;
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for row in rows {
            let row = row.as_ref();
            if row.len() as u32 != width {
                return Err(Error::InvalidParameter(format!(
                    "ragged rows: expected width {}, got {}",
                    width,
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Self::from_data(width, height, data)
    }

    /// Get the raster width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the raster height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the raster dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed raster; present for API symmetry
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the sample at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f64> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        Ok(self.data[self.index(x, y)])
    }

    /// Set the sample at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f64) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Get the sample at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f64 {
        self.data[self.index(x, y)]
    }

    /// Set the sample at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f64) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Sample at signed coordinates, `None` outside the raster
    #[inline]
    pub fn get_signed(&self, x: i64, y: i64) -> Option<f64> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get raw access to the sample data
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable access to the sample data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the raster and return its sample data
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Get a row of sample data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f64] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Get a mutable row of sample data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [f64] {
        let start = (y as usize) * (self.width as usize);
        let end = start + self.width as usize;
        &mut self.data[start..end]
    }

    /// Set all samples to the specified value
    pub fn set_all(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Create a zeroed raster with the same dimensions
    pub fn create_template(&self) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            data: vec![0.0; self.data.len()],
        }
    }

    /// Apply `f` to every sample, producing a new raster
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Check that two rasters have the same dimensions
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn check_same_size(&self, other: &Raster) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::IncompatibleSizes(
                self.width,
                self.height,
                other.width,
                other.height,
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Find the minimum value and its location
    ///
    /// Returns `(min_value, x, y)` for the first occurrence in row-major order.
    pub fn min(&self) -> (f64, u32, u32) {
        let mut min_val = f64::MAX;
        let mut min_idx = 0usize;
        for (idx, &v) in self.data.iter().enumerate() {
            if v < min_val {
                min_val = v;
                min_idx = idx;
            }
        }
        let w = self.width as usize;
        (min_val, (min_idx % w) as u32, (min_idx / w) as u32)
    }

    /// Find the maximum value and its location
    ///
    /// Returns `(max_value, x, y)` for the first occurrence in row-major order.
    pub fn max(&self) -> (f64, u32, u32) {
        let mut max_val = f64::MIN;
        let mut max_idx = 0usize;
        for (idx, &v) in self.data.iter().enumerate() {
            if v > max_val {
                max_val = v;
                max_idx = idx;
            }
        }
        let w = self.width as usize;
        (max_val, (max_idx % w) as u32, (max_idx / w) as u32)
    }

    /// Minimum sample value
    pub fn min_value(&self) -> f64 {
        self.min().0
    }

    /// Maximum sample value
    pub fn max_value(&self) -> f64 {
        self.max().0
    }

    /// Maximum absolute sample value
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0f64, |acc, &v| acc.max(v.abs()))
    }

    /// Sum of all samples
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Mean of all samples
    pub fn mean(&self) -> f64 {
        self.sum() / self.data.len() as f64
    }

    /// Population standard deviation of all samples
    pub fn std_dev(&self) -> f64 {
        let mean = self.mean();
        let var = self
            .data
            .iter()
            .map(|&v| (v - mean) * (v - mean))
            .sum::<f64>()
            / self.data.len() as f64;
        var.sqrt()
    }

    /// Number of distinct sample values
    pub fn unique_levels(&self) -> usize {
        let mut values = self.data.clone();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();
        values.len()
    }

    /// Number of foreground samples (value > 0)
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| is_foreground(v)).count()
    }

    /// True if every sample is either [`BACKGROUND`] or [`FOREGROUND`]
    pub fn is_binary(&self) -> bool {
        self.data
            .iter()
            .all(|&v| v == BACKGROUND || v == FOREGROUND)
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Convert to 8-bit samples
    ///
    /// Each sample is truncated toward zero and clamped to 0..=255; NaN
    /// becomes 0. This is the encode rule used when a raster leaves the
    /// library as an 8-bit image.
    pub fn to_u8_clamped(&self) -> Vec<u8> {
        self.data.iter().map(|&v| clamp_to_u8(v)).collect()
    }
}

/// Truncate a sample toward zero and clamp it into `0..=255`
#[inline]
pub fn clamp_to_u8(value: f64) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.trunc().clamp(0.0, 255.0) as u8
    }
}
