//! Marr-Hildreth edge detection
//!
//! Convolves the input with a Laplacian-of-Gaussian kernel and marks the
//! zero crossings of the response whose jump exceeds a threshold expressed
//! as a fraction of the strongest response.

use log::debug;

use crate::convolve::convolve;
use crate::kernel::size_for_sigma;
use crate::{FilterError, FilterResult, Kernel};
use edgework_core::{FOREGROUND, Raster};

/// Neighbors tested for a sign change, as `(drow, dcol)`.
///
/// Order matters: left, above, upper-left, upper-right. The first pair that
/// qualifies marks the pixel.
const CROSSING_NEIGHBORS: [(i64, i64); 4] = [(0, -1), (-1, 0), (-1, -1), (-1, 1)];

/// Options for [`marr_hildreth`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarrHildrethOptions {
    /// Gaussian scale; the LoG kernel side is the smallest odd integer > 6σ
    pub sigma: f64,
    /// Fraction of `max |LoG|` a crossing must exceed
    pub threshold: f64,
}

impl Default for MarrHildrethOptions {
    fn default() -> Self {
        Self {
            sigma: 1.5,
            threshold: 0.04,
        }
    }
}

impl MarrHildrethOptions {
    /// Create options with the default sigma and threshold
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Gaussian scale
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the threshold fraction
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Detect edges as thresholded zero crossings of the LoG response.
///
/// Returns a binary raster (255 = edge). Border pixels are never marked.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if `sigma` is not positive.
pub fn marr_hildreth(raster: &Raster, options: &MarrHildrethOptions) -> FilterResult<Raster> {
    let size = size_for_sigma(options.sigma)?;
    let kernel = Kernel::laplacian_of_gaussian(size, options.sigma)?;
    let response = convolve(raster, &kernel)?;

    let max_abs = response.max_abs();
    let threshold_abs = options.threshold * max_abs;
    debug!(
        "marr_hildreth: sigma={} kernel={}x{} max|LoG|={:.6} threshold={:.6}",
        options.sigma, size, size, max_abs, threshold_abs
    );

    Ok(zero_crossings(&response, threshold_abs))
}

/// Mark zero crossings of a continuous field.
///
/// An interior pixel is marked when, for the first qualifying neighbor in
/// the order left, above, upper-left, upper-right, the product with that
/// neighbor is negative and their absolute difference exceeds
/// `threshold_abs`.
pub fn zero_crossings(field: &Raster, threshold_abs: f64) -> Raster {
    let (w, h) = field.dimensions();
    let mut edges = field.create_template();
    if w < 3 || h < 3 {
        return edges;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let pixel = field.get_pixel_unchecked(x, y);
            let crossing = CROSSING_NEIGHBORS.iter().any(|&(dr, dc)| {
                let nb = field.get_pixel_unchecked((x as i64 + dc) as u32, (y as i64 + dr) as u32);
                pixel * nb < 0.0 && (pixel - nb).abs() > threshold_abs
            });
            if crossing {
                edges.set_pixel_unchecked(x, y, FOREGROUND);
            }
        }
    }

    edges
}

/// Validate options without running the detector.
pub(crate) fn check_options(options: &MarrHildrethOptions) -> FilterResult<()> {
    if !(options.sigma.is_finite() && options.sigma > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "marr_hildreth sigma must be > 0, got {}",
            options.sigma
        )));
    }
    Ok(())
}
