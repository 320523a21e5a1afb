//! edgework-region - Region processing for edgework
//!
//! This crate provides region-level analysis of grayscale and binary
//! rasters:
//!
//! - **Otsu thresholding** - Between-class variance maximization
//! - **Connected component labeling** - Stack-based flood fill
//! - **Freeman chain codes** - Boundary tracing and shape description
//! - **Intensity-band segmentation** - Posterization by level ranges
//! - **Marker segmentation** - Simplified watershed-style boundaries
//!
//! # Examples
//!
//! ## Counting objects
//!
//! ```
//! use edgework_core::Raster;
//! use edgework_region::count_components;
//!
//! let mut binary = Raster::new(10, 10).unwrap();
//! binary.set_pixel(1, 1, 255.0).unwrap();
//! binary.set_pixel(2, 2, 255.0).unwrap();
//! binary.set_pixel(7, 7, 255.0).unwrap();
//!
//! assert_eq!(count_components(&binary), 2);
//! ```
//!
//! ## Chain code of a square
//!
//! ```
//! use edgework_core::Raster;
//! use edgework_region::extract_chain;
//!
//! let mut binary = Raster::new(5, 5).unwrap();
//! for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
//!     binary.set_pixel(x, y, 255.0).unwrap();
//! }
//!
//! let chain = extract_chain(&binary).unwrap();
//! assert_eq!(chain.code, vec![6, 0, 2, 4]);
//! assert_eq!(chain.normalized, vec![0, 2, 4, 6]);
//! ```

pub mod chain;
pub mod error;
pub mod label;
pub mod segment;
pub mod threshold;
pub mod watershed;

// Re-export error types
pub use error::{RegionError, RegionResult};

pub use chain::{
    Contour, Direction, FreemanChain, chain_code, extract_chain, find_start, first_difference,
    normalize_chain_code, render_contour, trace_boundary,
};
pub use label::{ComponentStats, ConnectivityType, Labeling, count_components, label_components};
pub use segment::{DEFAULT_BANDS, IntensityBand, IntensityStats, intensity_stats, posterize};
pub use threshold::{binarize, histogram, otsu_threshold, threshold_otsu};
pub use watershed::{BOUNDARY_VALUE, MarkerSegmentationOptions, marker_segmentation, percentile};
