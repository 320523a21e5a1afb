//! Integer lattice points
//!
//! Contours and chain codes address pixels as `(row, col)` pairs. Coordinates
//! are signed so that probes just outside the raster can be represented
//! while tracing a boundary.

/// A lattice point addressed by row and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point {
    /// Row index (y)
    pub row: i32,
    /// Column index (x)
    pub col: i32,
}

impl Point {
    /// Create a new point
    #[inline]
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Add a (row, col) offset
    #[inline]
    pub fn offset(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Displacement `other - self` as (drow, dcol)
    #[inline]
    pub fn delta_to(self, other: Point) -> (i32, i32) {
        (other.row - self.row, other.col - self.col)
    }

    /// True if `other` is one of the 8 neighbors of `self`
    #[inline]
    pub fn is_8_adjacent(self, other: Point) -> bool {
        let (dr, dc) = self.delta_to(other);
        dr.abs() <= 1 && dc.abs() <= 1 && (dr, dc) != (0, 0)
    }
}

impl From<(i32, i32)> for Point {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl From<(u32, u32)> for Point {
    fn from((row, col): (u32, u32)) -> Self {
        Self::new(row as i32, col as i32)
    }
}
