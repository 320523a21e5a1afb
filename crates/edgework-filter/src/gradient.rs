//! Gradient operators
//!
//! Convolves a raster with a fixed pair of derivative kernels and derives
//! the pointwise magnitude and direction:
//!
//! | Method    | Kernels         |
//! |-----------|-----------------|
//! | `Sobel`   | 3x3, weights 1-2-1 |
//! | `Prewitt` | 3x3, weights 1-1-1 |
//! | `Roberts` | 2x2 diagonal cross |

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::convolve::convolve;
use crate::{FilterError, FilterResult, Kernel};
use edgework_core::Raster;

/// Gradient kernel family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientMethod {
    /// Sobel 3x3
    #[default]
    Sobel,
    /// Prewitt 3x3
    Prewitt,
    /// Roberts cross 2x2
    Roberts,
}

impl GradientMethod {
    /// The (horizontal, vertical) kernel pair for this method
    pub fn kernels(self) -> (Kernel, Kernel) {
        match self {
            GradientMethod::Sobel => (Kernel::sobel_x(), Kernel::sobel_y()),
            GradientMethod::Prewitt => (Kernel::prewitt_x(), Kernel::prewitt_y()),
            GradientMethod::Roberts => (Kernel::roberts_x(), Kernel::roberts_y()),
        }
    }

    /// Lowercase tag accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            GradientMethod::Sobel => "sobel",
            GradientMethod::Prewitt => "prewitt",
            GradientMethod::Roberts => "roberts",
        }
    }
}

impl fmt::Display for GradientMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradientMethod {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sobel" => Ok(GradientMethod::Sobel),
            "prewitt" => Ok(GradientMethod::Prewitt),
            "roberts" => Ok(GradientMethod::Roberts),
            other => Err(FilterError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Gradient components, magnitude and direction of a raster
///
/// All four rasters share the source's dimensions. `direction` is in
/// radians in `(-π, π]`.
#[derive(Debug, Clone)]
pub struct GradientField {
    /// Horizontal derivative
    pub gx: Raster,
    /// Vertical derivative
    pub gy: Raster,
    /// `sqrt(gx² + gy²)`
    pub magnitude: Raster,
    /// `atan2(gy, gx)`
    pub direction: Raster,
}

/// Compute the gradient field of a raster.
pub fn gradient(raster: &Raster, method: GradientMethod) -> FilterResult<GradientField> {
    let (kx, ky) = method.kernels();
    let gx = convolve(raster, &kx)?;
    let gy = convolve(raster, &ky)?;

    let mut magnitude = raster.create_template();
    let mut direction = raster.create_template();
    for (i, (&dx, &dy)) in gx.data().iter().zip(gy.data()).enumerate() {
        magnitude.data_mut()[i] = (dx * dx + dy * dy).sqrt();
        let angle = dy.atan2(dx);
        direction.data_mut()[i] = if angle == -PI { PI } else { angle };
    }

    Ok(GradientField {
        gx,
        gy,
        magnitude,
        direction,
    })
}

/// Compute the gradient field for a method given by its tag.
///
/// # Errors
///
/// Returns `FilterError::UnsupportedMethod` for tags other than
/// `sobel`, `prewitt` or `roberts`.
pub fn gradient_by_name(raster: &Raster, method: &str) -> FilterResult<GradientField> {
    gradient(raster, method.parse()?)
}
