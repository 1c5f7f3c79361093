//! Algorithm constants and runtime configuration defaults

// Default values for configurable parameters
/// Half-width of the seed statistics window and the neighbour search window
pub const DEFAULT_RADIUS: usize = 1;

/// Number of standard deviations on each side of the mean
pub const DEFAULT_MULTIPLIER: u32 = 2;

/// Total passes including the initial 8-connected pass
pub const DEFAULT_ITERATIONS: usize = 1;

// Seed windows this small have too few samples for a sample deviation
/// Smallest accepted raster extent along either axis
pub const MIN_RASTER_DIMENSION: usize = 2;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed raster dimension
pub const MAX_RASTER_DIMENSION: usize = 65_536;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to mask filenames
pub const OUTPUT_SUFFIX: &str = "_mask";
/// Suffix added to per-pass visualization filenames
pub const VISUALIZATION_SUFFIX: &str = "_passes";
/// Delay between GIF animation frames, one frame per pass
pub const PASS_FRAME_DELAY_MS: u32 = 400;
/// Overlay colour for region pixels in visualization frames
pub const REGION_OVERLAY_COLOR: [u8; 4] = [255, 64, 64, 255];
