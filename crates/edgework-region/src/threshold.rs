//! Otsu thresholding
//!
//! Picks the gray level that maximizes the between-class variance of the
//! 256-bin histogram and binarizes at it.

use log::debug;

use edgework_core::{BACKGROUND, FOREGROUND, Raster, clamp_to_u8};

/// 256-bin histogram of samples truncated into `0..=255`
pub fn histogram(raster: &Raster) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for &v in raster.data() {
        hist[clamp_to_u8(v) as usize] += 1;
    }
    hist
}

/// Compute the Otsu threshold of a raster.
///
/// Candidates are scanned in ascending order; levels with no background
/// yet are skipped and the scan stops once no foreground remains. Only a
/// strictly larger variance replaces the current best, so ties keep the
/// smallest level. A raster with a single level yields 0.
pub fn otsu_threshold(raster: &Raster) -> u8 {
    let hist = histogram(raster);
    let total = raster.len() as f64;
    let sum_all: f64 = hist
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut weight_bg = 0.0f64;
    let mut sum_bg = 0.0f64;
    let mut best_variance = 0.0f64;
    let mut best = 0u8;

    for (t, &count) in hist.iter().enumerate() {
        weight_bg += count as f64;
        if weight_bg == 0.0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0.0 {
            break;
        }

        sum_bg += t as f64 * count as f64;
        let mean_bg = sum_bg / weight_bg;
        let mean_fg = (sum_all - sum_bg) / weight_fg;
        let diff = mean_bg - mean_fg;
        let variance = (weight_bg / total) * (weight_fg / total) * diff * diff;

        if variance > best_variance {
            best_variance = variance;
            best = t as u8;
        }
    }

    debug!("otsu: threshold={} variance={:.3}", best, best_variance);
    best
}

/// Binarize with the Otsu threshold.
///
/// Returns the binary raster (255 where `sample >= threshold`) together
/// with the threshold.
pub fn threshold_otsu(raster: &Raster) -> (Raster, u8) {
    let t = otsu_threshold(raster);
    (binarize(raster, t as f64), t)
}

/// 255 where `sample >= threshold`, 0 elsewhere
pub fn binarize(raster: &Raster, threshold: f64) -> Raster {
    raster.map(|v| if v >= threshold { FOREGROUND } else { BACKGROUND })
}
