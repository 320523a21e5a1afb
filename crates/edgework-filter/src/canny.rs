//! Canny edge detection
//!
//! Pipeline:
//!
//! 1. Gaussian smoothing (kernel side = smallest odd integer > 6σ)
//! 2. Sobel gradient on the smoothed image
//! 3. Non-maximum suppression along the quantized gradient direction
//! 4. Double threshold relative to the strongest surviving magnitude
//! 5. Hysteresis: weak pixels join the result when 8-connected to it
//!
//! Stages 3 and 5 are public so intermediate results can be inspected.

use log::debug;

use crate::convolve::gaussian_blur;
use crate::gradient::{GradientField, GradientMethod, gradient};
use crate::{FilterError, FilterResult};
use edgework_core::{BACKGROUND, FOREGROUND, Raster};

/// Options for [`canny`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyOptions {
    /// Gaussian smoothing scale
    pub sigma: f64,
    /// Low threshold as a fraction of the maximum suppressed magnitude
    pub threshold_low: f64,
    /// High threshold as a fraction of the maximum suppressed magnitude
    pub threshold_high: f64,
}

impl Default for CannyOptions {
    fn default() -> Self {
        Self {
            sigma: 1.4,
            threshold_low: 0.04,
            threshold_high: 0.10,
        }
    }
}

impl CannyOptions {
    /// Create options with the default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smoothing scale
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set both threshold fractions
    pub fn with_thresholds(mut self, low: f64, high: f64) -> Self {
        self.threshold_low = low;
        self.threshold_high = high;
        self
    }

    pub(crate) fn check(&self) -> FilterResult<()> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(FilterError::InvalidParameters(format!(
                "canny sigma must be > 0, got {}",
                self.sigma
            )));
        }
        Ok(())
    }
}

/// Canny result with the derived thresholds
#[derive(Debug, Clone)]
pub struct CannyEdges {
    /// Binary edge map (255 = edge)
    pub edges: Raster,
    /// Absolute low threshold applied to the suppressed magnitude
    pub low_abs: f64,
    /// Absolute high threshold applied to the suppressed magnitude
    pub high_abs: f64,
    /// Number of strong pixels that seeded hysteresis
    pub strong_count: usize,
}

/// Detect edges with the Canny pipeline.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if `sigma` is not positive or
/// too large for a kernel size, and `FilterError::InvalidKernel` if the
/// smoothing kernel would exceed [`crate::kernel::MAX_KERNEL_ELEMENTS`].
pub fn canny(raster: &Raster, options: &CannyOptions) -> FilterResult<Raster> {
    Ok(canny_detailed(raster, options)?.edges)
}

/// Detect edges with the Canny pipeline, keeping the derived thresholds.
pub fn canny_detailed(raster: &Raster, options: &CannyOptions) -> FilterResult<CannyEdges> {
    options.check()?;
    let smoothed = gaussian_blur(raster, options.sigma)?;
    let field = gradient(&smoothed, GradientMethod::Sobel)?;
    let suppressed = non_maximum_suppression(&field);

    let max_mag = suppressed.max_value();
    if max_mag <= 0.0 {
        // Flat input: nothing survives, everything is background.
        debug!("canny: suppressed field is empty");
        return Ok(CannyEdges {
            edges: suppressed.create_template(),
            low_abs: 0.0,
            high_abs: 0.0,
            strong_count: 0,
        });
    }

    let low_abs = options.threshold_low * max_mag;
    let high_abs = options.threshold_high * max_mag;
    let strong_count = suppressed.data().iter().filter(|&&m| m >= high_abs).count();
    debug!(
        "canny: sigma={} max={:.6} low={:.6} high={:.6} strong={}",
        options.sigma, max_mag, low_abs, high_abs, strong_count
    );

    Ok(CannyEdges {
        edges: hysteresis(&suppressed, low_abs, high_abs),
        low_abs,
        high_abs,
        strong_count,
    })
}

/// Neighbor offsets `(dx, dy)` compared against along a gradient direction.
fn direction_neighbors(degrees: f64) -> [(i64, i64); 2] {
    if !(22.5..157.5).contains(&degrees) {
        // horizontal
        [(-1, 0), (1, 0)]
    } else if degrees < 67.5 {
        // upper-right / lower-left
        [(1, -1), (-1, 1)]
    } else if degrees < 112.5 {
        // vertical
        [(0, -1), (0, 1)]
    } else {
        // upper-left / lower-right
        [(-1, -1), (1, 1)]
    }
}

/// Thin a gradient magnitude field to its ridge lines.
///
/// The direction is converted to degrees and folded into `[0, 180)`; an
/// interior pixel keeps its magnitude when it is `>=` both neighbors along
/// the quantized direction. Border pixels are set to 0.
pub fn non_maximum_suppression(field: &GradientField) -> Raster {
    let magnitude = &field.magnitude;
    let (w, h) = magnitude.dimensions();
    let mut out = magnitude.create_template();
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mag = magnitude.get_pixel_unchecked(x, y);
            let degrees = field
                .direction
                .get_pixel_unchecked(x, y)
                .to_degrees()
                .rem_euclid(180.0);
            let keep = direction_neighbors(degrees).iter().all(|&(dx, dy)| {
                let nx = (x as i64 + dx) as u32;
                let ny = (y as i64 + dy) as u32;
                mag >= magnitude.get_pixel_unchecked(nx, ny)
            });
            if keep {
                out.set_pixel_unchecked(x, y, mag);
            }
        }
    }

    out
}

/// Double threshold followed by hysteresis linking.
///
/// Pixels `>= high_abs` are strong and seed the result. A weak pixel
/// (`low_abs <= m < high_abs`) in the interior joins the result when any
/// pixel in its 3x3 neighborhood is already in it. Propagation uses an
/// explicit worklist and reaches the same set as repeating full passes
/// until nothing changes.
pub fn hysteresis(suppressed: &Raster, low_abs: f64, high_abs: f64) -> Raster {
    let (w, h) = suppressed.dimensions();
    let mut out = suppressed.create_template();
    let mut stack: Vec<(u32, u32)> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            if suppressed.get_pixel_unchecked(x, y) >= high_abs {
                out.set_pixel_unchecked(x, y, FOREGROUND);
                stack.push((x, y));
            }
        }
    }

    let is_weak = |m: f64| m >= low_abs && m < high_abs;

    while let Some((x, y)) = stack.pop() {
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                // Only interior pixels can be promoted.
                if nx < 1 || ny < 1 || nx >= w as i64 - 1 || ny >= h as i64 - 1 {
                    continue;
                }
                let (nx, ny) = (nx as u32, ny as u32);
                if out.get_pixel_unchecked(nx, ny) == BACKGROUND
                    && is_weak(suppressed.get_pixel_unchecked(nx, ny))
                {
                    out.set_pixel_unchecked(nx, ny, FOREGROUND);
                    stack.push((nx, ny));
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// Reference: repeat full interior passes until nothing changes.
    fn naive_hysteresis(suppressed: &Raster, low: f64, high: f64) -> Raster {
        let (w, h) = suppressed.dimensions();
        let mut out = suppressed.map(|m| if m >= high { FOREGROUND } else { BACKGROUND });
        loop {
            let mut changed = false;
            for y in 1..h - 1 {
                for x in 1..w - 1 {
                    let m = suppressed.get_pixel_unchecked(x, y);
                    if out.get_pixel_unchecked(x, y) > 0.0 || !(m >= low && m < high) {
                        continue;
                    }
                    let linked = (y - 1..=y + 1)
                        .any(|ny| (x - 1..=x + 1).any(|nx| out.get_pixel_unchecked(nx, ny) > 0.0));
                    if linked {
                        out.set_pixel_unchecked(x, y, FOREGROUND);
                        changed = true;
                    }
                }
            }
            if !changed {
                return out;
            }
        }
    }

    fn pseudo_random(w: u32, h: u32, seed: u64) -> Raster {
        let mut state = seed;
        let mut raster = Raster::new(w, h).unwrap();
        for v in raster.data_mut() {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            *v = ((state >> 33) % 256) as f64;
        }
        raster
    }

    fn disk(size: u32, radius: f64) -> Raster {
        let c = size as f64 / 2.0;
        let mut raster = Raster::new(size, size).unwrap();
        for y in 0..size {
            for x in 0..size {
                let (dx, dy) = (x as f64 - c, y as f64 - c);
                if dx * dx + dy * dy <= radius * radius {
                    raster.set_pixel(x, y, 220.0).unwrap();
                }
            }
        }
        raster
    }

    fn field_with(magnitude: Raster, angle: f64) -> GradientField {
        let direction = magnitude.map(|_| angle);
        GradientField {
            gx: magnitude.create_template(),
            gy: magnitude.create_template(),
            magnitude,
            direction,
        }
    }

    #[test]
    fn test_defaults() {
        let opts = CannyOptions::default();
        assert_eq!((opts.sigma, opts.threshold_low, opts.threshold_high), (1.4, 0.04, 0.10));
        let opts = CannyOptions::new().with_sigma(2.0).with_thresholds(0.1, 0.3);
        assert_eq!((opts.sigma, opts.threshold_low, opts.threshold_high), (2.0, 0.1, 0.3));
    }

    #[test]
    fn test_nms_horizontal_direction() {
        let magnitude = Raster::from_rows(&[
            [0.0, 0.0, 0.0, 0.0],
            [1.0, 3.0, 2.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
        ])
        .unwrap();
        let out = non_maximum_suppression(&field_with(magnitude, 0.0));
        assert_eq!(out.get_pixel(1, 1).unwrap(), 3.0);
        assert_eq!(out.get_pixel(2, 1).unwrap(), 0.0);
        // Border is always cleared.
        assert_eq!(out.get_pixel(0, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_nms_folds_negative_angles() {
        // -90° folds to 90°: vertical neighbors are compared.
        let magnitude = Raster::from_rows(&[
            [0.0, 5.0, 0.0],
            [9.0, 4.0, 9.0],
            [0.0, 1.0, 0.0],
        ])
        .unwrap();
        let out = non_maximum_suppression(&field_with(magnitude.clone(), -PI / 2.0));
        assert_eq!(out.get_pixel(1, 1).unwrap(), 0.0);

        // 180° folds to 0°: horizontal neighbors (9 and 9) suppress it too.
        let out = non_maximum_suppression(&field_with(magnitude, PI));
        assert_eq!(out.get_pixel(1, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_nms_ties_survive() {
        let magnitude = Raster::new_with_value(3, 3, 2.0).unwrap();
        let out = non_maximum_suppression(&field_with(magnitude, PI / 4.0));
        assert_eq!(out.get_pixel(1, 1).unwrap(), 2.0);
    }

    #[test]
    fn test_hysteresis_links_weak_chain() {
        let suppressed = Raster::from_rows(&[
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 9.0, 5.0, 5.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 5.0, 0.0],
            [0.0, 5.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ])
        .unwrap();
        let out = hysteresis(&suppressed, 4.0, 8.0);
        assert_eq!(out.get_pixel(1, 1).unwrap(), FOREGROUND);
        assert_eq!(out.get_pixel(2, 1).unwrap(), FOREGROUND);
        assert_eq!(out.get_pixel(3, 1).unwrap(), FOREGROUND);
        assert_eq!(out.get_pixel(4, 2).unwrap(), FOREGROUND);
        // Isolated weak pixel stays out.
        assert_eq!(out.get_pixel(1, 3).unwrap(), BACKGROUND);
    }

    #[test]
    fn test_hysteresis_matches_fixed_point() {
        for seed in [1u64, 7, 42, 1234] {
            let suppressed = pseudo_random(17, 13, seed);
            for &(low, high) in &[(50.0, 200.0), (100.0, 250.0), (10.0, 30.0), (0.0, 255.0)] {
                assert_eq!(
                    hysteresis(&suppressed, low, high),
                    naive_hysteresis(&suppressed, low, high),
                    "seed={seed} low={low} high={high}"
                );
            }
        }
    }

    #[test]
    fn test_flat_image_is_background() {
        let raster = Raster::new_with_value(16, 16, 0.0).unwrap();
        let result = canny_detailed(&raster, &CannyOptions::default()).unwrap();
        assert_eq!(result.edges.count_foreground(), 0);
        assert_eq!(result.strong_count, 0);
    }

    #[test]
    fn test_disk_outline() {
        let raster = disk(40, 10.0);
        let result = canny_detailed(&raster, &CannyOptions::default()).unwrap();
        assert!(result.edges.is_binary());
        assert!(result.strong_count > 0);
        assert!(result.low_abs < result.high_abs);
        // Center of the disk is flat.
        assert_eq!(result.edges.get_pixel(20, 20).unwrap(), BACKGROUND);
        // Something near the rim at the disk's right edge is marked.
        let rim = (27..=33).any(|x| result.edges.get_pixel(x, 20).unwrap() > 0.0);
        assert!(rim);
    }

    #[test]
    fn test_strong_count_non_increasing_with_high_threshold() {
        let raster = disk(32, 9.0);
        let mut previous = usize::MAX;
        for high in [0.1, 0.2, 0.4, 0.6, 0.8, 1.0] {
            let opts = CannyOptions::default().with_thresholds(0.05, high);
            let result = canny_detailed(&raster, &opts).unwrap();
            assert!(result.strong_count <= previous, "high={high}");
            previous = result.strong_count;
        }
    }

    #[test]
    fn test_rejects_bad_sigma() {
        let raster = Raster::new(8, 8).unwrap();
        let opts = CannyOptions::default().with_sigma(-1.0);
        assert!(matches!(
            canny(&raster, &opts),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_huge_sigma_is_an_error() {
        let raster = Raster::new(8, 8).unwrap();
        let opts = CannyOptions::default().with_sigma(1e9);
        assert!(matches!(
            canny(&raster, &opts),
            Err(FilterError::InvalidParameters(_))
        ));
        let opts = CannyOptions::default().with_sigma(5000.0);
        assert!(matches!(
            canny(&raster, &opts),
            Err(FilterError::InvalidKernel(_))
        ));
    }
}
