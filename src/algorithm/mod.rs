/// Bitset over raster pixels for region and visited bookkeeping
pub mod coordinate_set;
/// Pass driver running the first pass and refinement passes
pub mod executor;
/// Breadth-first frontier expansion within a threshold interval
pub mod frontier;
/// Confidence interval derivation with seed inclusion
pub mod threshold;
