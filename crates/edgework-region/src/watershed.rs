//! Marker and gradient segmentation
//!
//! A simplified watershed-style segmentation: object markers come from an
//! Otsu binarization (or the caller), and strong gradients are painted on
//! top of them as boundaries. No flooding is performed.

use log::debug;

use crate::threshold::threshold_otsu;
use crate::{RegionError, RegionResult};
use edgework_core::Raster;
use edgework_filter::{GradientMethod, gaussian_blur, gradient};

/// Sample value marking boundary pixels in the output
pub const BOUNDARY_VALUE: f64 = 128.0;

/// Options for [`marker_segmentation`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSegmentationOptions {
    /// Smooth with a Gaussian before taking the gradient
    pub smoothing: bool,
    /// Gaussian scale used when `smoothing` is set
    pub sigma: f64,
    /// Gradient percentile (0..=100) above which pixels become boundary
    pub percentile: f64,
}

impl Default for MarkerSegmentationOptions {
    fn default() -> Self {
        Self {
            smoothing: true,
            sigma: 1.0,
            percentile: 85.0,
        }
    }
}

impl MarkerSegmentationOptions {
    /// Create options with the default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable pre-smoothing
    pub fn with_smoothing(mut self, smoothing: bool) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the smoothing scale
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the boundary percentile
    pub fn with_percentile(mut self, percentile: f64) -> Self {
        self.percentile = percentile;
        self
    }
}

/// Percentile of a set of samples with linear interpolation between the
/// two closest ranks.
///
/// `p` is in `0..=100`. Returns `None` for an empty slice.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Segment a raster into markers and gradient boundaries.
///
/// Markers are the Otsu binarization of the (optionally smoothed) raster
/// unless `markers` is given. Every pixel whose Sobel gradient magnitude is
/// strictly above the configured percentile is set to [`BOUNDARY_VALUE`]
/// in a copy of the markers.
///
/// # Errors
///
/// Returns `RegionError::InvalidParameters` for a percentile outside
/// `0..=100`, `RegionError::Filter` for a non-positive sigma and
/// `RegionError::Core` if `markers` differs in size from `raster`.
pub fn marker_segmentation(
    raster: &Raster,
    markers: Option<&Raster>,
    options: &MarkerSegmentationOptions,
) -> RegionResult<Raster> {
    if !(0.0..=100.0).contains(&options.percentile) {
        return Err(RegionError::InvalidParameters(format!(
            "percentile must be in 0..=100, got {}",
            options.percentile
        )));
    }
    if let Some(m) = markers {
        raster.check_same_size(m)?;
    }

    let smoothed;
    let source = if options.smoothing {
        smoothed = gaussian_blur(raster, options.sigma)?;
        &smoothed
    } else {
        raster
    };

    let field = gradient(source, GradientMethod::Sobel)?;
    let mut out = match markers {
        Some(m) => m.clone(),
        None => threshold_otsu(source).0,
    };

    // Rasters are never empty.
    let cutoff = percentile(field.magnitude.data(), options.percentile).unwrap_or(f64::INFINITY);
    let mut boundary = 0usize;
    for (v, &mag) in out.data_mut().iter_mut().zip(field.magnitude.data()) {
        if mag > cutoff {
            *v = BOUNDARY_VALUE;
            boundary += 1;
        }
    }

    debug!(
        "marker_segmentation: p{}={:.3} boundary pixels={}",
        options.percentile, cutoff, boundary
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_linear() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 0.0), Some(1.0));
        assert_eq!(percentile(&values, 100.0), Some(5.0));
        assert_eq!(percentile(&values, 50.0), Some(3.0));
        // rank 0.85 * 4 = 3.4
        assert!((percentile(&values, 85.0).unwrap() - 4.4).abs() < 1e-12);
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile(&[5.0, 1.0], 50.0), Some(3.0));
    }

    #[test]
    fn test_flat_image_has_no_boundary() {
        let raster = Raster::new_with_value(12, 12, 90.0).unwrap();
        let opts = MarkerSegmentationOptions::default().with_smoothing(false);
        let out = marker_segmentation(&raster, None, &opts).unwrap();
        // Only the zero-padded frame has gradient; the interior keeps markers.
        assert_eq!(out.get_pixel(6, 6).unwrap(), 255.0);
    }

    #[test]
    fn test_step_boundary_painted() {
        let mut raster = Raster::new(20, 10).unwrap();
        for y in 0..10 {
            for x in 10..20 {
                raster.set_pixel(x, y, 200.0).unwrap();
            }
        }
        // Most magnitudes are zero, so the median cutoff is zero too.
        let opts = MarkerSegmentationOptions::default()
            .with_smoothing(false)
            .with_percentile(50.0);
        let out = marker_segmentation(&raster, None, &opts).unwrap();
        assert_eq!(out.get_pixel(9, 5).unwrap(), BOUNDARY_VALUE);
        assert_eq!(out.get_pixel(10, 5).unwrap(), BOUNDARY_VALUE);
        assert_eq!(out.get_pixel(15, 5).unwrap(), 255.0);
    }

    #[test]
    fn test_given_markers_are_kept() {
        let raster = Raster::new_with_value(24, 24, 10.0).unwrap();
        let markers = Raster::new_with_value(24, 24, 7.0).unwrap();
        let opts = MarkerSegmentationOptions::default();
        let out = marker_segmentation(&raster, Some(&markers), &opts).unwrap();
        assert!(out.data().iter().all(|&v| v == 7.0 || v == BOUNDARY_VALUE));
        assert_eq!(out.get_pixel(12, 12).unwrap(), 7.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let raster = Raster::new(8, 8).unwrap();
        let opts = MarkerSegmentationOptions::default().with_percentile(120.0);
        assert!(matches!(
            marker_segmentation(&raster, None, &opts),
            Err(RegionError::InvalidParameters(_))
        ));

        let markers = Raster::new(4, 4).unwrap();
        assert!(matches!(
            marker_segmentation(&raster, Some(&markers), &MarkerSegmentationOptions::default()),
            Err(RegionError::Core(_))
        ));

        let opts = MarkerSegmentationOptions::default().with_sigma(0.0);
        assert!(matches!(
            marker_segmentation(&raster, None, &opts),
            Err(RegionError::Filter(_))
        ));
    }
}
