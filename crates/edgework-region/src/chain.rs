//! Boundary tracing and Freeman chain codes
//!
//! The outer boundary of the first object in a binary raster is followed
//! with a Moore-style tracer and described by 8-direction chain codes:
//!
//! ```text
//!   3  2  1
//!   4  *  0
//!   5  6  7
//! ```
//!
//! From the raw code two derived forms are provided: the rotation
//! normalized code (smallest cyclic rotation) and the first difference
//! (direction changes between consecutive steps).

use log::debug;

use edgework_core::{FOREGROUND, Point, Raster, is_foreground};

/// Freeman direction, numbered counter-clockwise from east
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// East (0, +1)
    East = 0,
    /// North-east (-1, +1)
    NorthEast = 1,
    /// North (-1, 0)
    North = 2,
    /// North-west (-1, -1)
    NorthWest = 3,
    /// West (0, -1)
    West = 4,
    /// South-west (+1, -1)
    SouthWest = 5,
    /// South (+1, 0)
    South = 6,
    /// South-east (+1, +1)
    SouthEast = 7,
}

/// Row offset for each direction
const ROWTAB: [i32; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

/// Column offset for each direction
const COLTAB: [i32; 8] = [1, 1, 0, -1, -1, -1, 0, 1];

/// Direction lookup: DIRTAB[1 + drow][1 + dcol]
const DIRTAB: [[i8; 3]; 3] = [[3, 2, 1], [4, -1, 0], [5, 6, 7]];

impl Direction {
    /// Row offset of a unit step
    #[inline]
    pub fn drow(self) -> i32 {
        ROWTAB[self as usize]
    }

    /// Column offset of a unit step
    #[inline]
    pub fn dcol(self) -> i32 {
        COLTAB[self as usize]
    }

    /// Chain code symbol (0..=7)
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Direction of a unit displacement, `None` if not 8-adjacent
    pub fn from_offset(drow: i32, dcol: i32) -> Option<Self> {
        if !(-1..=1).contains(&drow) || !(-1..=1).contains(&dcol) {
            return None;
        }
        let idx = DIRTAB[(1 + drow) as usize][(1 + dcol) as usize];
        if idx < 0 {
            None
        } else {
            Some(Self::from_index(idx as usize))
        }
    }

    /// Direction for an index taken modulo 8
    pub fn from_index(idx: usize) -> Self {
        match idx % 8 {
            0 => Direction::East,
            1 => Direction::NorthEast,
            2 => Direction::North,
            3 => Direction::NorthWest,
            4 => Direction::West,
            5 => Direction::SouthWest,
            6 => Direction::South,
            _ => Direction::SouthEast,
        }
    }

    /// Step `point` one pixel in this direction
    #[inline]
    pub fn step(self, point: Point) -> Point {
        point.offset(self.drow(), self.dcol())
    }
}

/// Traced boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    /// Boundary points in tracing order, starting at the start point
    pub points: Vec<Point>,
    /// True if the tracer returned to the start point
    pub closed: bool,
}

/// Full chain description of the first object in a binary raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreemanChain {
    /// First foreground pixel in row-major order
    pub start: Point,
    /// Traced boundary
    pub contour: Contour,
    /// Raw chain code
    pub code: Vec<u8>,
    /// Smallest cyclic rotation of `code`
    pub normalized: Vec<u8>,
    /// First difference of `code`
    pub first_difference: Vec<u8>,
}

fn foreground_at(binary: &Raster, p: Point) -> bool {
    binary
        .get_signed(p.col as i64, p.row as i64)
        .is_some_and(is_foreground)
}

/// First foreground pixel in row-major order (topmost, then leftmost).
pub fn find_start(binary: &Raster) -> Option<Point> {
    let w = binary.width() as usize;
    binary
        .data()
        .iter()
        .position(|&v| is_foreground(v))
        .map(|idx| Point::new((idx / w) as i32, (idx % w) as i32))
}

/// Follow the boundary of the object containing `start`.
///
/// The probe begins at the west neighbor of `start`. Each step scans the
/// neighbors of the current point in increasing direction order, beginning
/// with the probe's direction, and moves to the first foreground one; the
/// next probe is the neighbor one direction before the hit. Tracing stops
/// when the start is reached again with more than two points recorded, when
/// a point has no foreground neighbor, or after `width * height` steps.
/// Only the first case yields a closed contour.
pub fn trace_boundary(binary: &Raster, start: Point) -> Contour {
    let max_steps = binary.len();
    let mut points = vec![start];
    let mut current = start;
    let mut probe = Direction::West.step(start);

    for _ in 0..max_steps {
        let (dr, dc) = current.delta_to(probe);
        let probe_dir = Direction::from_offset(dr, dc).map_or(0, |d| d as usize);

        let hit = (0..8)
            .map(|off| Direction::from_index(probe_dir + off))
            .find(|d| foreground_at(binary, d.step(current)));
        let Some(dir) = hit else {
            break;
        };

        let next = dir.step(current);
        if points.len() > 2 && next == start {
            return Contour {
                points,
                closed: true,
            };
        }
        probe = Direction::from_index(dir as usize + 7).step(current);
        points.push(next);
        current = next;
    }

    Contour {
        points,
        closed: false,
    }
}

/// Chain code of a contour.
///
/// One symbol per consecutive pair of points. A closed contour also codes
/// the edge from its last point back to the start, so its code has one
/// symbol per point.
pub fn chain_code(contour: &Contour) -> Vec<u8> {
    let points = &contour.points;
    let closing = match (contour.closed, points.first(), points.last()) {
        (true, Some(&first), Some(&last)) if points.len() > 1 => Some((last, first)),
        _ => None,
    };

    points
        .windows(2)
        .map(|pair| (pair[0], pair[1]))
        .chain(closing)
        .filter_map(|(a, b)| {
            let (dr, dc) = a.delta_to(b);
            Direction::from_offset(dr, dc).map(Direction::code)
        })
        .collect()
}

/// Smallest cyclic rotation of a chain code.
///
/// Rotations are compared lexicographically; an empty code stays empty.
pub fn normalize_chain_code(code: &[u8]) -> Vec<u8> {
    let n = code.len();
    let mut best = code.to_vec();
    for shift in 1..n {
        let rotated: Vec<u8> = code[shift..].iter().chain(&code[..shift]).copied().collect();
        if rotated < best {
            best = rotated;
        }
    }
    best
}

/// First difference of a chain code.
///
/// Element `i` is `(code[(i + 1) % n] - code[i]) mod 8`. Codes shorter than
/// two symbols have no first difference.
pub fn first_difference(code: &[u8]) -> Vec<u8> {
    let n = code.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .map(|i| (code[(i + 1) % n] + 8 - code[i]) % 8)
        .collect()
}

/// Trace the first object of a binary raster and describe its boundary.
///
/// Returns `None` when the raster has no foreground pixel.
pub fn extract_chain(binary: &Raster) -> Option<FreemanChain> {
    let start = find_start(binary)?;
    let contour = trace_boundary(binary, start);
    let code = chain_code(&contour);
    let normalized = normalize_chain_code(&code);
    let first_difference = first_difference(&code);

    debug!(
        "extract_chain: start=({}, {}) points={} closed={} code_len={}",
        start.row,
        start.col,
        contour.points.len(),
        contour.closed,
        code.len()
    );

    Some(FreemanChain {
        start,
        contour,
        code,
        normalized,
        first_difference,
    })
}

/// Copy a raster and mark every in-bounds contour point with 255.
pub fn render_contour(raster: &Raster, points: &[Point]) -> Raster {
    let mut out = raster.clone();
    let (w, h) = out.dimensions();
    for p in points {
        if p.row >= 0 && p.col >= 0 && (p.col as u32) < w && (p.row as u32) < h {
            out.set_pixel_unchecked(p.col as u32, p.row as u32, FOREGROUND);
        }
    }
    out
}
