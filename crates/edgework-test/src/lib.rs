//! edgework-test - Regression test framework for edgework
//!
//! Provides [`RegParams`], which collects comparison failures for a whole
//! test and reports them on [`RegParams::cleanup`], plus builders for the
//! synthetic rasters the regression tests run on. No fixture files are
//! needed.
//!
//! # Usage
//!
//! ```ignore
//! use edgework_test::{RegParams, bimodal};
//!
//! let mut rp = RegParams::new("otsu");
//! let raster = bimodal(20, 10, 10.0, 240.0).unwrap();
//! rp.compare_values(10.0, raster.get_pixel(0, 0).unwrap(), 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: `compare` (default) or `display`. Display mode also
//!   writes result rasters as PGM files under `tests/regout`.

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use edgework_core::Raster;

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // edgework-test is at crates/edgework-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// All-zero raster
pub fn blank(width: u32, height: u32) -> TestResult<Raster> {
    Ok(Raster::new(width, height)?)
}

/// Zero raster with an axis-aligned rectangle set to `value`
///
/// The rectangle spans columns `x0..x0 + rect_w` and rows `y0..y0 + rect_h`,
/// clipped to the raster.
pub fn with_rect(
    width: u32,
    height: u32,
    (x0, y0, rect_w, rect_h): (u32, u32, u32, u32),
    value: f64,
) -> TestResult<Raster> {
    let mut raster = Raster::new(width, height)?;
    fill_rect(&mut raster, (x0, y0, rect_w, rect_h), value);
    Ok(raster)
}

/// Set an axis-aligned rectangle of an existing raster, clipped to it
pub fn fill_rect(raster: &mut Raster, (x0, y0, rect_w, rect_h): (u32, u32, u32, u32), value: f64) {
    let x1 = (x0 + rect_w).min(raster.width());
    let y1 = (y0 + rect_h).min(raster.height());
    for y in y0..y1 {
        for x in x0..x1 {
            raster.set_pixel_unchecked(x, y, value);
        }
    }
}

/// Vertical step edge: columns `< column` are `low`, the rest `high`
pub fn step_edge(width: u32, height: u32, column: u32, low: f64, high: f64) -> TestResult<Raster> {
    let mut raster = Raster::new_with_value(width, height, low)?;
    for y in 0..height {
        for v in raster.row_mut(y).iter_mut().skip(column as usize) {
            *v = high;
        }
    }
    Ok(raster)
}

/// Two equal clusters: the top half of the rows is `low`, the bottom `high`
///
/// With an even height both levels get exactly `width * height / 2`
/// samples.
pub fn bimodal(width: u32, height: u32, low: f64, high: f64) -> TestResult<Raster> {
    let mut raster = Raster::new_with_value(width, height, low)?;
    for y in height / 2..height {
        raster.row_mut(y).fill(high);
    }
    Ok(raster)
}

/// Zero raster with a filled disk of `value`
///
/// A pixel belongs to the disk when its center lies within `radius` of
/// `(cx, cy)`.
pub fn disk(width: u32, height: u32, (cx, cy): (f64, f64), radius: f64, value: f64) -> TestResult<Raster> {
    let mut raster = Raster::new(width, height)?;
    let r2 = radius * radius;
    for y in 0..height {
        for x in 0..width {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            if dx * dx + dy * dy <= r2 {
                raster.set_pixel_unchecked(x, y, value);
            }
        }
    }
    Ok(raster)
}
