use crate::spatial::grid::{Coordinate, RasterBounds};
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over the pixels of one raster
///
/// Coordinates are packed as `row * cols + col`, giving O(1) membership
/// testing without hashing. Each pass owns its own sets, so nothing is
/// shared between passes or between concurrent segmentations.
#[derive(Clone, Debug)]
pub struct CoordinateSet {
    bits: BitVec,
    bounds: RasterBounds,
    len: usize,
}

impl CoordinateSet {
    /// Create an empty set covering every pixel of `bounds`
    pub fn new(bounds: RasterBounds) -> Self {
        Self {
            bits: bitvec![0; bounds.len()],
            bounds,
            len: 0,
        }
    }

    /// Insert a coordinate
    ///
    /// Returns `true` if the coordinate was newly added. Out-of-bounds
    /// coordinates are never stored.
    pub fn insert(&mut self, coord: Coordinate) -> bool {
        let Some(index) = self.bounds.index_of(coord) else {
            return false;
        };
        if self.bits.get(index).as_deref() == Some(&true) {
            return false;
        }
        self.bits.set(index, true);
        self.len += 1;
        true
    }

    /// Test coordinate membership
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.bounds
            .index_of(coord)
            .and_then(|index| self.bits.get(index).as_deref().copied())
            .unwrap_or(false)
    }

    /// Number of coordinates in the set
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Test if no coordinates are present
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for CoordinateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CoordinateSet({} of {} pixels)",
            self.len,
            self.bounds.len()
        )
    }
}
