//! Pixel coordinates, raster bounds and neighbourhood enumeration
//!
//! Windows are square with side `2 * radius + 1` and are always walked in the
//! same order: column offset in the outer loop, row offset in the inner loop,
//! both from `-radius` to `+radius`. Region growth is breadth-first, so a fixed
//! enumeration order makes discovery order, and therefore output, reproducible.

use crate::io::error::{Result, invalid_parameter};
use ndarray::ArrayView2;
use std::fmt;

/// Pixel coordinate addressed as (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Row index, `0 <= row < height`
    pub row: usize,
    /// Column index, `0 <= col < width`
    pub col: usize,
}

impl Coordinate {
    /// Create a coordinate from row and column indices
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parse a seed supplied as a small integer array `[row, col]`
    ///
    /// # Errors
    ///
    /// Returns an error if the array does not hold exactly two elements
    /// or if either element is negative
    pub fn from_seed_array(values: &[i64]) -> Result<Self> {
        let [row, col] = values else {
            return Err(invalid_parameter(
                "seed",
                &format!("{values:?}"),
                &"expected exactly two elements [row, col]",
            ));
        };

        let row = usize::try_from(*row).map_err(|_| {
            invalid_parameter("seed", &format!("{values:?}"), &"row must be non-negative")
        })?;
        let col = usize::try_from(*col).map_err(|_| {
            invalid_parameter("seed", &format!("{values:?}"), &"col must be non-negative")
        })?;

        Ok(Self { row, col })
    }

    /// Shift by a signed offset, `None` if either axis would go negative
    pub const fn offset(self, row_offset: isize, col_offset: isize) -> Option<Self> {
        let Some(row) = self.row.checked_add_signed(row_offset) else {
            return None;
        };
        let Some(col) = self.col.checked_add_signed(col_offset) else {
            return None;
        };
        Some(Self { row, col })
    }

    /// True when `other` is exactly one step away along a single axis
    pub const fn is_axis_adjacent(&self, other: &Self) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<[usize; 2]> for Coordinate {
    fn from([row, col]: [usize; 2]) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Adjacency rule used when growing a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connectivity {
    /// Only candidates sharing the source row or column
    Four,
    /// Every candidate in the window
    Eight,
}

impl Connectivity {
    /// Whether `candidate` counts as a neighbour of `center` under this rule
    ///
    /// The centre itself is never its own neighbour.
    pub const fn admits(self, center: Coordinate, candidate: Coordinate) -> bool {
        if center.row == candidate.row && center.col == candidate.col {
            return false;
        }
        match self {
            Self::Eight => true,
            Self::Four => center.row == candidate.row || center.col == candidate.col,
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Four => write!(f, "4-connected"),
            Self::Eight => write!(f, "8-connected"),
        }
    }
}

/// Raster extents used for bounds checks and linear indexing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterBounds {
    rows: usize,
    cols: usize,
}

impl RasterBounds {
    /// Create bounds for a raster of `rows` x `cols`
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Bounds of an existing raster view
    pub fn of<T>(raster: &ArrayView2<'_, T>) -> Self {
        let (rows, cols) = raster.dim();
        Self { rows, cols }
    }

    /// Number of rows (height)
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (width)
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Extents as (rows, cols)
    pub const fn extents(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of pixels
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// True for a raster with no pixels
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Strict bounds check, `row < rows && col < cols`
    pub const fn contains(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Row-major linear index, `None` outside the raster
    pub const fn index_of(&self, coord: Coordinate) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.row * self.cols + coord.col)
        } else {
            None
        }
    }

    /// Whether the full window of `radius` around `center` lies inside the raster
    pub const fn window_fits(&self, center: Coordinate, radius: usize) -> bool {
        center.row >= radius
            && center.col >= radius
            && center.row + radius < self.rows
            && center.col + radius < self.cols
    }
}

fn window_offsets(radius: usize) -> impl Iterator<Item = (isize, isize)> {
    let reach = radius as isize;
    (-reach..=reach).flat_map(move |col_offset| {
        (-reach..=reach).map(move |row_offset| (row_offset, col_offset))
    })
}

/// Enumerate every coordinate of the window around `center`, centre included
///
/// No bounds filtering is applied beyond dropping negative positions; callers
/// check `RasterBounds::window_fits` first.
pub fn window_coordinates(center: Coordinate, radius: usize) -> impl Iterator<Item = Coordinate> {
    window_offsets(radius)
        .filter_map(move |(row_offset, col_offset)| center.offset(row_offset, col_offset))
}

/// Enumerate in-bounds neighbour candidates of `center` under `connectivity`
pub fn neighbors(
    bounds: RasterBounds,
    center: Coordinate,
    radius: usize,
    connectivity: Connectivity,
) -> impl Iterator<Item = Coordinate> {
    window_coordinates(center, radius).filter(move |&candidate| {
        bounds.contains(candidate) && connectivity.admits(center, candidate)
    })
}
