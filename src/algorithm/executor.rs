use crate::{
    algorithm::frontier::{Frontier, expand_region},
    algorithm::threshold::ThresholdInterval,
    analysis::statistics::RegionStatistics,
    io::configuration::{
        DEFAULT_ITERATIONS, DEFAULT_MULTIPLIER, DEFAULT_RADIUS, MAX_RASTER_DIMENSION,
        MIN_RASTER_DIMENSION, PASS_FRAME_DELAY_MS,
    },
    io::error::{Result, SegmentationError, invalid_parameter, invalid_seed},
    io::visualization::PassCapture,
    spatial::grid::{Connectivity, Coordinate, RasterBounds, window_coordinates},
    spatial::raster::{Intensity, intensity_at, rasterize, rasterize_into},
};
use log::{debug, warn};
use ndarray::{Array2, ArrayView2};
use std::path::Path;

/// Parameters controlling region growth
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentationConfig {
    /// Half-width of the seed statistics window and of the neighbour search window
    pub radius: usize,
    /// Standard deviations on each side of the mean admitted by the interval
    pub multiplier: u32,
    /// Total passes, the first 8-connected pass included
    pub iterations: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            multiplier: DEFAULT_MULTIPLIER,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl SegmentationConfig {
    /// Check parameter ranges independent of any raster
    ///
    /// # Errors
    ///
    /// Returns an error if `iterations` or `radius` is zero
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(invalid_parameter(
                "iterations",
                &self.iterations,
                &"at least one pass is required",
            ));
        }
        if self.radius == 0 {
            return Err(invalid_parameter(
                "radius",
                &self.radius,
                &"a zero radius leaves a single-sample window",
            ));
        }
        Ok(())
    }
}

/// Summary of one completed pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassReport {
    /// Pass number, starting at 1
    pub pass: usize,
    /// Adjacency rule used for the pass
    pub connectivity: Connectivity,
    /// Statistics the interval was derived from
    pub statistics: RegionStatistics,
    /// Interval used to accept pixels
    pub thresholds: ThresholdInterval,
    /// Coordinates classified during the pass
    pub visited: usize,
    /// Size of the region the pass produced
    pub region_size: usize,
}

/// Confidence-connected segmentation of one raster from one seed
///
/// Runs a first 8-connected pass seeded from the whole seed window, then
/// `iterations - 1` refinement passes. Each refinement pass derives its
/// interval from the previous region's statistics and the fixed seed
/// intensity, and regrows the region with 4-connectivity from the seed and
/// its axis-adjacent previous members. The previous region is replaced
/// wholesale after every pass.
pub struct ConfidenceConnected<'a, T: Intensity> {
    raster: ArrayView2<'a, T>,
    bounds: RasterBounds,
    seed: Coordinate,
    seed_intensity: f64,
    seed_statistics: RegionStatistics,
    config: SegmentationConfig,
    region: Vec<Coordinate>,
    reports: Vec<PassReport>,
    /// Optional per-pass capture for GIF export
    pub visualization: Option<PassCapture>,
}

impl<'a, T: Intensity> ConfidenceConnected<'a, T> {
    /// Validate the request and compute seed statistics
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `iterations` or `radius` is zero
    /// - The raster is smaller than 2x2 or exceeds the size limit
    /// - The seed lies outside the raster
    /// - The seed window extends outside the raster
    pub fn new(
        raster: ArrayView2<'a, T>,
        seed: Coordinate,
        config: SegmentationConfig,
    ) -> Result<Self> {
        config.validate().inspect_err(|e| warn!("{e}"))?;

        let bounds = RasterBounds::of(&raster);
        let (rows, cols) = bounds.extents();
        if rows.min(cols) < MIN_RASTER_DIMENSION || rows.max(cols) > MAX_RASTER_DIMENSION {
            let err = invalid_parameter(
                "raster",
                &format!("{rows}x{cols}"),
                &format!(
                    "each dimension must lie in {MIN_RASTER_DIMENSION}..={MAX_RASTER_DIMENSION}"
                ),
            );
            warn!("{err}");
            return Err(err);
        }

        let seed_intensity = intensity_at(&raster, seed).ok_or_else(|| {
            invalid_seed(
                (seed.row, seed.col),
                config.radius,
                bounds.extents(),
                &"seed lies outside the raster",
            )
        })
        .inspect_err(|e| warn!("{e}"))?;
        if !bounds.window_fits(seed, config.radius) {
            let err = invalid_seed(
                (seed.row, seed.col),
                config.radius,
                bounds.extents(),
                &"seed window extends outside the raster",
            );
            warn!("{err}");
            return Err(err);
        }

        let seed_statistics = RegionStatistics::over_window(&raster, seed, config.radius)?;

        Ok(Self {
            raster,
            bounds,
            seed,
            seed_intensity,
            seed_statistics,
            config,
            region: Vec::new(),
            reports: Vec::new(),
            visualization: None,
        })
    }

    /// Intensity of the seed pixel, fixed for every pass
    pub const fn seed_intensity(&self) -> f64 {
        self.seed_intensity
    }

    /// Statistics of the seed window
    pub const fn seed_statistics(&self) -> &RegionStatistics {
        &self.seed_statistics
    }

    /// Parameters of this run
    pub const fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Region produced by the most recent pass, in discovery order
    pub fn region(&self) -> &[Coordinate] {
        &self.region
    }

    /// Reports of all completed passes
    pub fn reports(&self) -> &[PassReport] {
        &self.reports
    }

    /// Number of completed passes
    pub fn passes_completed(&self) -> usize {
        self.reports.len()
    }

    /// Whether every configured pass has run
    pub fn is_complete(&self) -> bool {
        self.passes_completed() >= self.config.iterations
    }

    /// Record the region after every pass for GIF export
    pub fn enable_visualization(&mut self) {
        self.visualization = Some(PassCapture::from_raster(&self.raster));
    }

    /// Export visualization as GIF if enabled
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Visualization was not enabled
    /// - GIF export fails
    pub fn export_visualization(&self, output_path: &Path) -> Result<()> {
        self.visualization.as_ref().map_or_else(
            || {
                Err(invalid_parameter(
                    "visualization",
                    &"disabled",
                    &"Visualization was not enabled for this run",
                ))
            },
            |capture| capture.export_gif(output_path, PASS_FRAME_DELAY_MS),
        )
    }

    /// Run the next pass
    ///
    /// Returns `true` while further passes remain. Once all passes have run
    /// this is a no-op returning `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if region statistics cannot be computed
    pub fn run_pass(&mut self) -> Result<bool> {
        if self.is_complete() {
            return Ok(false);
        }

        let pass = self.passes_completed() + 1;
        let (statistics, frontier, connectivity) = if pass == 1 {
            self.first_pass_setup()
        } else {
            self.refinement_setup()?
        };
        let thresholds =
            ThresholdInterval::derive(self.seed_intensity, &statistics, self.config.multiplier);

        debug!(
            "pass {pass}: {connectivity}, mean {:.3}, stddev {:.3}, interval {thresholds}, {} queued",
            statistics.mean,
            statistics.stddev,
            frontier.len()
        );

        let outcome = expand_region(
            self.raster,
            frontier,
            thresholds,
            connectivity,
            self.config.radius,
        );

        debug!(
            "pass {pass}: accepted {} of {} visited",
            outcome.region.len(),
            outcome.visited
        );

        self.reports.push(PassReport {
            pass,
            connectivity,
            statistics,
            thresholds,
            visited: outcome.visited,
            region_size: outcome.region.len(),
        });
        self.region = outcome.region;

        if let Some(capture) = self.visualization.as_mut() {
            capture.record_pass(&self.region);
        }

        Ok(!self.is_complete())
    }

    /// Run every remaining pass
    ///
    /// # Errors
    ///
    /// Returns an error if any pass fails
    pub fn run_to_completion(&mut self) -> Result<()> {
        while self.run_pass()? {}
        Ok(())
    }

    /// Run remaining passes and render the final region as a new mask
    ///
    /// # Errors
    ///
    /// Returns an error if any pass fails
    pub fn finish(mut self) -> Result<Array2<T>> {
        self.run_to_completion()?;
        Ok(rasterize(self.bounds, &self.region))
    }

    /// Run remaining passes and render the final region into `out`
    ///
    /// # Errors
    ///
    /// Returns `MismatchedExtents` before any pass runs if `out` differs in
    /// extents from the input raster, or any pass error
    pub fn finish_into(mut self, out: &mut Array2<T>) -> Result<()> {
        if out.dim() != self.bounds.extents() {
            return Err(SegmentationError::MismatchedExtents {
                expected: self.bounds.extents(),
                actual: out.dim(),
            });
        }
        self.run_to_completion()?;
        rasterize_into(self.bounds, &self.region, out)
    }

    // The whole seed window is queued up front, column by column
    fn first_pass_setup(&self) -> (RegionStatistics, Frontier, Connectivity) {
        let frontier = Frontier::seeded(
            self.bounds,
            window_coordinates(self.seed, self.config.radius),
        );
        (self.seed_statistics, frontier, Connectivity::Eight)
    }

    fn refinement_setup(&self) -> Result<(RegionStatistics, Frontier, Connectivity)> {
        let statistics = if self.region.len() < 2 {
            let mean = self
                .region
                .first()
                .and_then(|&coord| intensity_at(&self.raster, coord))
                .unwrap_or(self.seed_intensity);
            RegionStatistics::zero_variance(mean)
        } else {
            RegionStatistics::over_coordinates(&self.raster, &self.region)?
        };

        let seed = self.seed;
        let adjacent = self
            .region
            .iter()
            .copied()
            .filter(|coord| seed.is_axis_adjacent(coord));
        let frontier = Frontier::seeded(self.bounds, std::iter::once(seed).chain(adjacent));

        Ok((statistics, frontier, Connectivity::Four))
    }
}

/// Segment `raster` from `seed` and return a binary mask of the same extents
///
/// # Errors
///
/// Returns an error if the parameters or seed are invalid, see
/// `ConfidenceConnected::new`
pub fn segment<T: Intensity>(
    raster: ArrayView2<'_, T>,
    seed: Coordinate,
    config: &SegmentationConfig,
) -> Result<Array2<T>> {
    ConfidenceConnected::new(raster, seed, *config)?.finish()
}

/// Segment `raster` from `seed` into a caller-supplied mask buffer
///
/// # Errors
///
/// Returns `MismatchedExtents` before any other check if `out` differs in
/// extents from `raster`, otherwise the errors of `segment`
pub fn segment_into<T: Intensity>(
    raster: ArrayView2<'_, T>,
    seed: Coordinate,
    config: &SegmentationConfig,
    out: &mut Array2<T>,
) -> Result<()> {
    if out.dim() != raster.dim() {
        return Err(SegmentationError::MismatchedExtents {
            expected: raster.dim(),
            actual: out.dim(),
        });
    }
    ConfidenceConnected::new(raster, seed, *config)?.finish_into(out)
}
