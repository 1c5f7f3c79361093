//! Tests for segmentation defaults and output naming constants

#[cfg(test)]
mod tests {
    use regiongrow::io::configuration::{
        DEFAULT_ITERATIONS, DEFAULT_MULTIPLIER, DEFAULT_RADIUS, MAX_INDIVIDUAL_PROGRESS_BARS,
        MAX_RASTER_DIMENSION, MIN_RASTER_DIMENSION, OUTPUT_SUFFIX, PASS_FRAME_DELAY_MS,
        REGION_OVERLAY_COLOR, VISUALIZATION_SUFFIX,
    };

    // Tests the default request is a single pass over a 3x3 window at two sigma
    // Verified by changing the default multiplier
    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_RADIUS, 1);
        assert_eq!(DEFAULT_MULTIPLIER, 2);
        assert_eq!(DEFAULT_ITERATIONS, 1);
    }

    // Tests raster size limits bracket a usable range
    // Verified by setting the minimum above the maximum
    #[test]
    fn test_raster_limits() {
        assert_eq!(MIN_RASTER_DIMENSION, 2);
        assert_eq!(MAX_RASTER_DIMENSION, 65_536);
        assert!(2 * DEFAULT_RADIUS < MAX_RASTER_DIMENSION);
    }

    // Tests output suffixes are distinct so masks are never mistaken for GIFs
    // Verified by giving both the same suffix
    #[test]
    fn test_output_suffixes() {
        assert_eq!(OUTPUT_SUFFIX, "_mask");
        assert_eq!(VISUALIZATION_SUFFIX, "_passes");
        assert_ne!(OUTPUT_SUFFIX, VISUALIZATION_SUFFIX);
    }

    // Tests display settings
    // Verified by changing the progress bar limit
    #[test]
    fn test_display_settings() {
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
        assert_eq!(PASS_FRAME_DELAY_MS, 400);
        assert_eq!(REGION_OVERLAY_COLOR.last(), Some(&255));
    }
}
