//! Convolution operations
//!
//! Correlation and convolution with arbitrary kernels. Every operation here
//! uses zero padding: samples outside the raster contribute nothing. The
//! padding on each axis is the kernel's half-extent along that axis, so the
//! output always has the input's shape.

use crate::kernel::size_for_sigma;
use crate::{FilterError, FilterResult, Kernel};
use edgework_core::Raster;

/// Enlarge a raster by constant margins.
///
/// Adds `pad_height` rows above and below and `pad_width` columns left and
/// right, filled with `fill`; interior samples are copied verbatim.
pub fn pad(raster: &Raster, pad_height: u32, pad_width: u32, fill: f64) -> FilterResult<Raster> {
    let (w, h) = raster.dimensions();
    let out_w = pad_width
        .checked_mul(2)
        .and_then(|p| w.checked_add(p))
        .ok_or_else(|| FilterError::InvalidParameters("padded width overflow".into()))?;
    let out_h = pad_height
        .checked_mul(2)
        .and_then(|p| h.checked_add(p))
        .ok_or_else(|| FilterError::InvalidParameters("padded height overflow".into()))?;
    let mut out = Raster::new_with_value(out_w, out_h, fill)?;

    for y in 0..h {
        let dst_start = pad_width as usize;
        out.row_mut(y + pad_height)[dst_start..dst_start + w as usize]
            .copy_from_slice(raster.row(y));
    }

    Ok(out)
}

/// Correlate a raster with a kernel (no kernel flip).
///
/// Each output sample is the sum of the elementwise product of the kernel
/// with the equally-shaped window of the zero-padded input anchored at the
/// kernel origin.
pub fn correlate(raster: &Raster, kernel: &Kernel) -> FilterResult<Raster> {
    let (w, h) = raster.dimensions();
    let kw = kernel.width();
    let kh = kernel.height();
    let padded = pad(raster, kernel.center_y(), kernel.center_x(), 0.0)?;
    let kdata = kernel.data();

    let mut out = raster.create_template();
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0f64;
            for ky in 0..kh {
                let prow = padded.row(y + ky);
                let krow = &kdata[(ky * kw) as usize..((ky + 1) * kw) as usize];
                let window = &prow[x as usize..(x + kw) as usize];
                for (k, p) in krow.iter().zip(window) {
                    sum += k * p;
                }
            }
            out.set_pixel_unchecked(x, y, sum);
        }
    }

    Ok(out)
}

/// Convolve a raster with a kernel.
///
/// Identical to [`correlate`] with the kernel rotated by 180 degrees. The
/// two only differ for asymmetric kernels such as gradient masks.
pub fn convolve(raster: &Raster, kernel: &Kernel) -> FilterResult<Raster> {
    correlate(raster, &kernel.flipped())
}

/// Gaussian smoothing with a kernel sized from sigma.
///
/// The kernel side is the smallest odd integer strictly greater than `6σ`;
/// a sigma whose kernel would be oversized is an error.
pub fn gaussian_blur(raster: &Raster, sigma: f64) -> FilterResult<Raster> {
    let kernel = Kernel::gaussian(size_for_sigma(sigma)?, sigma)?;
    convolve(raster, &kernel)
}
