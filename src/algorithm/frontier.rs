use crate::{
    algorithm::coordinate_set::CoordinateSet,
    algorithm::threshold::ThresholdInterval,
    spatial::grid::{Connectivity, Coordinate, RasterBounds, neighbors},
    spatial::raster::{Intensity, intensity_at},
};
use ndarray::ArrayView2;
use std::collections::VecDeque;

/// FIFO queue of coordinates awaiting classification
///
/// Remembers every coordinate it has ever accepted, so a coordinate is queued
/// at most once per pass.
#[derive(Debug, Clone)]
pub struct Frontier {
    queue: VecDeque<Coordinate>,
    enqueued: CoordinateSet,
}

impl Frontier {
    /// Create an empty frontier for a raster of `bounds`
    pub fn new(bounds: RasterBounds) -> Self {
        Self {
            queue: VecDeque::new(),
            enqueued: CoordinateSet::new(bounds),
        }
    }

    /// Create a frontier pre-filled in iteration order
    pub fn seeded(bounds: RasterBounds, coords: impl IntoIterator<Item = Coordinate>) -> Self {
        let mut frontier = Self::new(bounds);
        for coord in coords {
            frontier.push(coord);
        }
        frontier
    }

    /// Append to the back unless the coordinate was queued before
    ///
    /// Returns `true` if the coordinate was queued. Out-of-bounds coordinates
    /// are rejected.
    pub fn push(&mut self, coord: Coordinate) -> bool {
        if self.enqueued.insert(coord) {
            self.queue.push_back(coord);
            true
        } else {
            false
        }
    }

    /// Take the oldest queued coordinate
    pub fn pop(&mut self) -> Option<Coordinate> {
        self.queue.pop_front()
    }

    /// Whether the coordinate has been queued during this pass
    pub fn was_enqueued(&self, coord: Coordinate) -> bool {
        self.enqueued.contains(coord)
    }

    /// Number of coordinates still waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Test if nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Lifecycle of a single expansion pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionState {
    /// Created, nothing popped yet
    Idle,
    /// Frontier is being drained
    Running,
    /// Frontier is empty, region and visited set are final
    Done,
}

/// Result of a finished expansion pass
#[derive(Debug, Clone)]
pub struct PassOutcome {
    /// Accepted coordinates in discovery order
    pub region: Vec<Coordinate>,
    /// Number of coordinates classified during the pass
    pub visited: usize,
}

/// Breadth-first flood fill bounded by a threshold interval
///
/// Owns all per-pass state. Nothing survives into the next pass except the
/// region returned by `finish`.
pub struct FloodFill<'a, T: Intensity> {
    raster: ArrayView2<'a, T>,
    bounds: RasterBounds,
    thresholds: ThresholdInterval,
    connectivity: Connectivity,
    radius: usize,
    frontier: Frontier,
    visited: CoordinateSet,
    in_region: CoordinateSet,
    region: Vec<Coordinate>,
    state: ExpansionState,
}

impl<'a, T: Intensity> FloodFill<'a, T> {
    /// Prepare a pass over `raster` starting from `frontier`
    pub fn new(
        raster: ArrayView2<'a, T>,
        frontier: Frontier,
        thresholds: ThresholdInterval,
        connectivity: Connectivity,
        radius: usize,
    ) -> Self {
        let bounds = RasterBounds::of(&raster);
        Self {
            raster,
            bounds,
            thresholds,
            connectivity,
            radius,
            frontier,
            visited: CoordinateSet::new(bounds),
            in_region: CoordinateSet::new(bounds),
            region: Vec::new(),
            state: ExpansionState::Idle,
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> ExpansionState {
        self.state
    }

    /// Region accepted so far
    pub fn region(&self) -> &[Coordinate] {
        &self.region
    }

    /// Classify the next frontier coordinate
    ///
    /// Already-visited coordinates are discarded. An accepted coordinate joins
    /// the region and queues its unvisited neighbours that are not yet in the
    /// region.
    pub fn step(&mut self) -> ExpansionState {
        if self.state == ExpansionState::Done {
            return self.state;
        }
        self.state = ExpansionState::Running;

        let Some(coord) = self.frontier.pop() else {
            self.state = ExpansionState::Done;
            return self.state;
        };

        if !self.visited.insert(coord) {
            return self.state;
        }

        let accepted = self.bounds.contains(coord)
            && intensity_at(&self.raster, coord)
                .is_some_and(|intensity| self.thresholds.contains(intensity));

        if accepted {
            self.region.push(coord);
            self.in_region.insert(coord);
            for neighbor in neighbors(self.bounds, coord, self.radius, self.connectivity) {
                if !self.visited.contains(neighbor) && !self.in_region.contains(neighbor) {
                    self.frontier.push(neighbor);
                }
            }
        }

        self.state
    }

    /// Drain the frontier and hand back the region
    pub fn finish(mut self) -> PassOutcome {
        while self.step() != ExpansionState::Done {}
        PassOutcome {
            region: self.region,
            visited: self.visited.len(),
        }
    }
}

/// Run one complete expansion pass
pub fn expand_region<T: Intensity>(
    raster: ArrayView2<'_, T>,
    frontier: Frontier,
    thresholds: ThresholdInterval,
    connectivity: Connectivity,
    radius: usize,
) -> PassOutcome {
    FloodFill::new(raster, frontier, thresholds, connectivity, radius).finish()
}
