//! Mean and sample standard deviation of pixel intensities
//!
//! Two sources are supported: the full square window around a centre pixel
//! (seed statistics) and an explicit coordinate collection (region statistics
//! for refinement passes). Both use the same formulas, with the squared
//! deviations divided by `count - 1`.

use crate::io::error::{Result, SegmentationError, invalid_parameter, invalid_seed};
use crate::spatial::grid::{Coordinate, RasterBounds, window_coordinates};
use crate::spatial::raster::{Intensity, intensity_at};
use ndarray::ArrayView2;

/// Summary statistics over a set of intensities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStatistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Bessel-corrected standard deviation
    pub stddev: f64,
    /// Number of samples the statistics were taken over
    pub count: usize,
}

impl RegionStatistics {
    /// Compute statistics over raw intensity samples
    ///
    /// # Errors
    ///
    /// Returns `DegenerateStatistics` when fewer than two samples are given
    pub fn from_values(values: &[f64]) -> Result<Self> {
        let count = values.len();
        if count < 2 {
            return Err(SegmentationError::DegenerateStatistics { count });
        }

        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let squared_deviation: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
        let stddev = (squared_deviation / (n - 1.0)).sqrt();

        Ok(Self {
            mean,
            stddev,
            count,
        })
    }

    /// Statistics for a single known intensity with no spread
    pub const fn zero_variance(mean: f64) -> Self {
        Self {
            mean,
            stddev: 0.0,
            count: 1,
        }
    }

    /// Statistics over every pixel of the window of `radius` around `center`
    ///
    /// # Errors
    ///
    /// Returns `InvalidSeed` if the window extends past the raster, or
    /// `DegenerateStatistics` for a zero radius
    pub fn over_window<T: Intensity>(
        raster: &ArrayView2<'_, T>,
        center: Coordinate,
        radius: usize,
    ) -> Result<Self> {
        let bounds = RasterBounds::of(raster);
        if !bounds.window_fits(center, radius) {
            return Err(invalid_seed(
                (center.row, center.col),
                radius,
                bounds.extents(),
                &"statistics window extends outside the raster",
            ));
        }

        let values: Vec<f64> = window_coordinates(center, radius)
            .filter_map(|coord| intensity_at(raster, coord))
            .collect();
        Self::from_values(&values)
    }

    /// Statistics over an explicit coordinate collection
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if any coordinate lies outside the raster,
    /// or `DegenerateStatistics` when fewer than two coordinates are given
    pub fn over_coordinates<T: Intensity>(
        raster: &ArrayView2<'_, T>,
        coords: &[Coordinate],
    ) -> Result<Self> {
        let values = coords
            .iter()
            .map(|&coord| {
                intensity_at(raster, coord).ok_or_else(|| {
                    invalid_parameter(
                        "coordinates",
                        &coord,
                        &"coordinate lies outside the raster",
                    )
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        Self::from_values(&values)
    }
}
