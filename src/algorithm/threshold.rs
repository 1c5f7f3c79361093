//! Confidence interval derived from intensity statistics

use crate::analysis::statistics::RegionStatistics;
use std::fmt;

/// Inclusive intensity range a pixel must fall in to join the region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdInterval {
    /// Lowest accepted intensity
    pub lower: f64,
    /// Highest accepted intensity
    pub upper: f64,
}

impl ThresholdInterval {
    /// Derive `mean ± multiplier * stddev`, widened to admit the seed
    ///
    /// If the lower bound sits above the seed it is pulled down to the seed;
    /// otherwise, if the upper bound sits below the seed, it is raised to it.
    /// Only one of the two adjustments ever applies.
    pub fn derive(seed_intensity: f64, statistics: &RegionStatistics, multiplier: u32) -> Self {
        let half_width = f64::from(multiplier) * statistics.stddev;
        let mut lower = statistics.mean - half_width;
        let mut upper = statistics.mean + half_width;

        if lower > seed_intensity {
            lower = seed_intensity;
        } else if upper < seed_intensity {
            upper = seed_intensity;
        }

        Self { lower, upper }
    }

    /// Inclusive membership test
    ///
    /// NaN intensities are never contained.
    pub const fn contains(&self, intensity: f64) -> bool {
        intensity >= self.lower && intensity <= self.upper
    }

    /// Distance between the bounds
    pub const fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl fmt::Display for ThresholdInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}, {:.3}]", self.lower, self.upper)
    }
}
