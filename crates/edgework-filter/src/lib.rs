//! edgework-filter - Convolution, gradients and edge detection
//!
//! This crate provides:
//!
//! - Zero-padded correlation and convolution with arbitrary kernels
//! - Gaussian, Laplacian-of-Gaussian and box kernel synthesis
//! - Sobel, Prewitt and Roberts gradient fields
//! - Marr-Hildreth (LoG zero-crossing) edge detection
//! - Canny edge detection with non-maximum suppression and hysteresis
//! - Uniform box smoothing

pub mod box_filter;
pub mod canny;
pub mod convolve;
pub mod edge;
mod error;
pub mod gradient;
pub mod kernel;
pub mod marr_hildreth;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use box_filter::{DEFAULT_BOX_SIZES, box_filter, box_filter_advisory, box_filter_sizes};
pub use canny::{CannyEdges, CannyOptions, canny, canny_detailed, hysteresis, non_maximum_suppression};
pub use convolve::{convolve, correlate, gaussian_blur, pad};
pub use edge::{DetectorComparison, compare_detectors};
pub use gradient::{GradientField, GradientMethod, gradient, gradient_by_name};
pub use marr_hildreth::{MarrHildrethOptions, marr_hildreth, zero_crossings};
