//! Edgework Core - Basic data structures for image processing
//!
//! This crate provides the data carriers shared by every algorithm in the
//! edgework library:
//!
//! - [`Raster`] - Single-channel `f64` image, continuous or binary
//! - [`Point`] - Signed `(row, col)` lattice point used by contours
//! - [`Error`] / [`Result`] - Core error type
//!
//! Binary rasters use [`FOREGROUND`] (255) and [`BACKGROUND`] (0); consumers
//! treat any positive sample as foreground.

pub mod error;
pub mod point;
pub mod raster;

pub use error::{Error, Result};
pub use point::Point;
pub use raster::{BACKGROUND, FOREGROUND, Raster, clamp_to_u8, is_foreground};
