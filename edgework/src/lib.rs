//! Edgework - Classical grayscale image processing
//!
//! # Overview
//!
//! Edgework works on [`Raster`]s of `f64` samples and provides:
//!
//! - 2D convolution, Gaussian smoothing and box filtering
//! - Gradient operators (Sobel, Prewitt, Roberts)
//! - Marr-Hildreth and Canny edge detection
//! - Otsu thresholding and connected component labeling
//! - Freeman chain codes of object boundaries
//! - PNG and PGM loading and saving
//!
//! # Example
//!
//! ```
//! use edgework::Raster;
//! use edgework::region::{count_components, extract_chain};
//!
//! let mut binary = Raster::new(5, 5).unwrap();
//! binary.set_pixel(2, 2, 255.0).unwrap();
//!
//! assert_eq!(count_components(&binary), 1);
//! let chain = extract_chain(&binary).unwrap();
//! assert!(chain.code.is_empty());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use edgework_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use edgework_filter as filter;
pub use edgework_io as io;
pub use edgework_region as region;
