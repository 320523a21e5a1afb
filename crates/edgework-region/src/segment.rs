//! Intensity-band segmentation (posterization)
//!
//! Maps ranges of gray levels onto single representative values. Bands are
//! applied one after another to the evolving result, so a value written by
//! an earlier band can still be matched by a later one.

use log::debug;

use crate::{RegionError, RegionResult};
use edgework_core::Raster;

/// A closed intensity range mapped to one output value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityBand {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
    /// Replacement value
    pub value: f64,
}

impl IntensityBand {
    /// Create a band mapping `min..=max` to `value`
    pub const fn new(min: f64, max: f64, value: f64) -> Self {
        Self { min, max, value }
    }

    /// True if `v` falls inside the band
    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Five-level table covering 0..=255
pub const DEFAULT_BANDS: [IntensityBand; 5] = [
    IntensityBand::new(0.0, 50.0, 25.0),
    IntensityBand::new(51.0, 100.0, 75.0),
    IntensityBand::new(101.0, 150.0, 125.0),
    IntensityBand::new(151.0, 200.0, 175.0),
    IntensityBand::new(201.0, 255.0, 255.0),
];

/// Apply intensity bands in order.
///
/// Samples matched by no band are left unchanged.
///
/// # Errors
///
/// Returns `RegionError::InvalidParameters` if a band has `min > max`.
pub fn posterize(raster: &Raster, bands: &[IntensityBand]) -> RegionResult<Raster> {
    if let Some(band) = bands
        .iter()
        .find(|b| b.min > b.max || b.min.is_nan() || b.max.is_nan())
    {
        return Err(RegionError::InvalidParameters(format!(
            "band [{}, {}] is empty",
            band.min, band.max
        )));
    }

    let mut out = raster.clone();
    for band in bands {
        let mut changed = 0usize;
        for v in out.data_mut() {
            if band.contains(*v) {
                *v = band.value;
                changed += 1;
            }
        }
        debug!(
            "posterize: [{}-{}] -> {}: {} pixels",
            band.min, band.max, band.value, changed
        );
    }
    Ok(out)
}

/// Summary statistics of a raster's intensities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityStats {
    /// Minimum sample
    pub min: f64,
    /// Maximum sample
    pub max: f64,
    /// Mean sample
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Number of distinct sample values
    pub unique_levels: usize,
}

/// Compute [`IntensityStats`] for a raster
pub fn intensity_stats(raster: &Raster) -> IntensityStats {
    IntensityStats {
        min: raster.min_value(),
        max: raster.max_value(),
        mean: raster.mean(),
        std_dev: raster.std_dev(),
        unique_levels: raster.unique_levels(),
    }
}
