//! Spatial primitives for raster traversal
//!
//! This module contains spatial-related functionality including:
//! - Pixel coordinates, raster bounds and connectivity rules
//! - Window enumeration around a centre pixel
//! - Rendering an accepted region as a binary mask

/// Coordinates, bounds, connectivity and window enumeration
pub mod grid;
/// Intensity element trait and region rasterization
pub mod raster;

pub use grid::{Connectivity, Coordinate, RasterBounds};
