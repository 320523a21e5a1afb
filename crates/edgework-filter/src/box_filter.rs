//! Uniform box smoothing
//!
//! Averages every `size x size` neighborhood with zero padding and
//! truncates the result to 8-bit range.

use log::{debug, warn};

use crate::convolve::correlate;
use crate::{FilterError, FilterResult, Kernel};
use edgework_core::{Raster, clamp_to_u8};

/// Sizes used by [`box_filter_sizes`] when the caller has no preference.
pub const DEFAULT_BOX_SIZES: [u32; 4] = [2, 3, 5, 7];

/// Image side above which small boxes are flagged as ineffective.
const ADVISORY_DIMENSION: u32 = 1024;

/// Box size below which large images are flagged.
const ADVISORY_MIN_SIZE: u32 = 11;

/// Returns true when a box of `size` is likely too small for the image.
///
/// Purely advisory: [`box_filter`] logs a warning and proceeds.
pub fn box_filter_advisory(width: u32, height: u32, size: u32) -> bool {
    width.max(height) > ADVISORY_DIMENSION && size < ADVISORY_MIN_SIZE
}

/// Smooth a raster with a uniform `size x size` kernel.
///
/// Every output sample is truncated toward zero and clamped to `0..=255`.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if `size` is 0.
pub fn box_filter(raster: &Raster, size: u32) -> FilterResult<Raster> {
    if size == 0 {
        return Err(FilterError::InvalidParameters(
            "box size must be > 0".to_string(),
        ));
    }

    let (w, h) = raster.dimensions();
    if box_filter_advisory(w, h, size) {
        warn!(
            "box_filter: {}x{} image with {}x{} box, consider a size >= {}",
            w, h, size, size, ADVISORY_MIN_SIZE
        );
    }

    let kernel = Kernel::box_kernel(size)?;
    let mut out = correlate(raster, &kernel)?;
    for v in out.data_mut() {
        *v = clamp_to_u8(*v) as f64;
    }
    debug!("box_filter: size={} mean={:.3}", size, out.mean());
    Ok(out)
}

/// Apply [`box_filter`] once per size, in the given order.
pub fn box_filter_sizes(raster: &Raster, sizes: &[u32]) -> FilterResult<Vec<(u32, Raster)>> {
    sizes
        .iter()
        .map(|&size| Ok((size, box_filter(raster, size)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory() {
        assert!(box_filter_advisory(2048, 10, 3));
        assert!(box_filter_advisory(10, 1025, 10));
        assert!(!box_filter_advisory(1024, 1024, 3));
        assert!(!box_filter_advisory(4000, 4000, 11));
    }

    #[test]
    fn test_size_two_window() {
        // Even box: window spans (y-1..=y, x-1..=x) with weight 1/4.
        let raster = Raster::from_rows(&[[4.0, 8.0], [12.0, 16.0]]).unwrap();
        let out = box_filter(&raster, 2).unwrap();
        assert_eq!(out.row(0), &[1.0, 3.0]);
        assert_eq!(out.row(1), &[4.0, 10.0]);
    }

    #[test]
    fn test_truncates_and_clamps() {
        let raster = Raster::from_rows(&[[3.0, 0.0], [0.0, 0.0]]).unwrap();
        let out = box_filter(&raster, 2).unwrap();
        // 3/4 truncates to 0
        assert_eq!(out.get_pixel(0, 0).unwrap(), 0.0);

        let raster = Raster::new_with_value(3, 3, 1000.0).unwrap();
        let out = box_filter(&raster, 1).unwrap();
        assert!(out.data().iter().all(|&v| v == 255.0));

        let raster = Raster::new_with_value(3, 3, -40.0).unwrap();
        let out = box_filter(&raster, 3).unwrap();
        assert!(out.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_flat_interior_preserved() {
        let raster = Raster::new_with_value(9, 9, 100.0).unwrap();
        let out = box_filter(&raster, 3).unwrap();
        let center = out.get_pixel(4, 4).unwrap();
        // 9 * (100/9) may land just below 100 before truncation.
        assert!(center == 100.0 || center == 99.0);
        assert!(out.get_pixel(0, 0).unwrap() < 50.0);
    }

    #[test]
    fn test_zero_size_rejected() {
        let raster = Raster::new(4, 4).unwrap();
        assert!(matches!(
            box_filter(&raster, 0),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_oversized_box_rejected() {
        let raster = Raster::new(4, 4).unwrap();
        assert!(matches!(
            box_filter(&raster, 70_000),
            Err(FilterError::InvalidKernel(_))
        ));
        assert!(box_filter(&raster, u32::MAX).is_err());
    }

    #[test]
    fn test_multiple_sizes_in_order() {
        let raster = Raster::new_with_value(12, 12, 64.0).unwrap();
        let results = box_filter_sizes(&raster, &DEFAULT_BOX_SIZES).unwrap();
        let sizes: Vec<u32> = results.iter().map(|(s, _)| *s).collect();
        assert_eq!(sizes, vec![2, 3, 5, 7]);
        for (_, out) in &results {
            assert_eq!(out.dimensions(), (12, 12));
        }
        assert!(box_filter_sizes(&raster, &[3, 0]).is_err());
    }
}
