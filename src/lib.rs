//! Confidence-connected region growing for 2-D rasters
//!
//! Starting from a seed pixel, the region grows breadth-first over neighbouring
//! pixels whose intensity falls inside a confidence interval derived from the
//! seed neighbourhood. Optional refinement passes re-derive the interval from
//! the region's own statistics and regrow it with 4-connectivity.

#![forbid(unsafe_code)]

/// Region growing passes, thresholds and coordinate bookkeeping
pub mod algorithm;
/// Intensity statistics over windows and coordinate collections
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Coordinates, connectivity and raster rendering
pub mod spatial;

pub use algorithm::executor::{ConfidenceConnected, SegmentationConfig, segment, segment_into};
pub use io::error::{Result, SegmentationError};
pub use spatial::grid::{Connectivity, Coordinate};
pub use spatial::raster::Intensity;
