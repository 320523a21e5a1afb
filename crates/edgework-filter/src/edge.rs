//! Side-by-side edge detector comparison

use log::info;

use crate::canny::{CannyOptions, canny};
use crate::marr_hildreth::{MarrHildrethOptions, check_options, marr_hildreth};
use crate::FilterResult;
use edgework_core::Raster;

/// Output of both detectors on the same input
#[derive(Debug, Clone)]
pub struct DetectorComparison {
    /// Marr-Hildreth edge map
    pub marr_hildreth: Raster,
    /// Canny edge map
    pub canny: Raster,
}

impl DetectorComparison {
    /// Edge pixel counts as `(marr_hildreth, canny)`
    pub fn edge_counts(&self) -> (usize, usize) {
        (
            self.marr_hildreth.count_foreground(),
            self.canny.count_foreground(),
        )
    }
}

/// Run Marr-Hildreth and Canny on one raster.
///
/// Both option sets are validated before either detector runs.
pub fn compare_detectors(
    raster: &Raster,
    mh_options: &MarrHildrethOptions,
    canny_options: &CannyOptions,
) -> FilterResult<DetectorComparison> {
    check_options(mh_options)?;
    canny_options.check()?;

    let comparison = DetectorComparison {
        marr_hildreth: marr_hildreth(raster, mh_options)?,
        canny: canny(raster, canny_options)?,
    };
    let (mh, cn) = comparison.edge_counts();
    info!("compare_detectors: marr_hildreth={} canny={} edge pixels", mh, cn);
    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_detectors_run() {
        let mut raster = Raster::new(30, 30).unwrap();
        for y in 8..22 {
            for x in 8..22 {
                raster.set_pixel(x, y, 180.0).unwrap();
            }
        }
        let result =
            compare_detectors(&raster, &MarrHildrethOptions::default(), &CannyOptions::default())
                .unwrap();
        let (mh, cn) = result.edge_counts();
        assert!(mh > 0);
        assert!(cn > 0);
        assert_eq!(result.marr_hildreth.dimensions(), result.canny.dimensions());
    }

    #[test]
    fn test_invalid_options_rejected_up_front() {
        let raster = Raster::new(10, 10).unwrap();
        let bad = CannyOptions::default().with_sigma(0.0);
        assert!(compare_detectors(&raster, &MarrHildrethOptions::default(), &bad).is_err());
        let bad = MarrHildrethOptions::default().with_sigma(-2.0);
        assert!(compare_detectors(&raster, &bad, &CannyOptions::default()).is_err());
    }
}
