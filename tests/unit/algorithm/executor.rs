//! Tests for the pass driver, parameter validation and mask output

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use regiongrow::algorithm::executor::{ConfidenceConnected, SegmentationConfig, segment_into};
    use regiongrow::{Connectivity, Coordinate, SegmentationError};

    fn mixed_raster() -> Array2<u8> {
        array![
            [10, 10, 10, 50, 50],
            [10, 12, 14, 50, 50],
            [10, 12, 11, 13, 90],
            [90, 90, 12, 10, 90],
            [10, 90, 90, 90, 11]
        ]
    }

    fn config(radius: usize, multiplier: u32, iterations: usize) -> SegmentationConfig {
        SegmentationConfig {
            radius,
            multiplier,
            iterations,
        }
    }

    fn sorted(region: &[Coordinate]) -> Vec<(usize, usize)> {
        let mut pairs: Vec<_> = region.iter().map(|c| (c.row, c.col)).collect();
        pairs.sort_unstable();
        pairs
    }

    // Tests default parameters are radius 1, multiplier 2, one pass
    // Verified by changing the default iteration count
    #[test]
    fn test_default_config() {
        let config = SegmentationConfig::default();
        assert_eq!(config, self::config(1, 2, 1));
        assert!(config.validate().is_ok());
    }

    // Tests zero iterations and zero radius are rejected
    // Verified by removing the iteration check
    #[test]
    fn test_config_validation() {
        let raster = mixed_raster();
        let seed = Coordinate::new(2, 2);

        let result = ConfidenceConnected::new(raster.view(), seed, config(1, 1, 0));
        assert!(matches!(
            result,
            Err(SegmentationError::InvalidParameter {
                parameter: "iterations",
                ..
            })
        ));

        let result = ConfidenceConnected::new(raster.view(), seed, config(0, 1, 1));
        assert!(matches!(
            result,
            Err(SegmentationError::InvalidParameter {
                parameter: "radius",
                ..
            })
        ));
    }

    // Tests seeds whose window leaves the raster are rejected
    // Verified by checking only the seed pixel against the bounds
    #[test]
    fn test_seed_window_validation() {
        let raster = mixed_raster();
        for (row, col) in [(0, 2), (2, 0), (4, 2), (2, 4), (7, 7)] {
            let result =
                ConfidenceConnected::new(raster.view(), Coordinate::new(row, col), config(1, 1, 1));
            assert!(
                matches!(result, Err(SegmentationError::InvalidSeed { .. })),
                "seed ({row}, {col}) should be rejected"
            );
        }

        let result = ConfidenceConnected::new(raster.view(), Coordinate::new(2, 2), config(3, 1, 1));
        assert!(matches!(result, Err(SegmentationError::InvalidSeed { .. })));
    }

    // Tests a seed outside the raster is reported as such rather than as a window failure
    // Verified by checking the window before the seed pixel
    #[test]
    fn test_seed_outside_raster() {
        let raster = mixed_raster();
        let result =
            ConfidenceConnected::new(raster.view(), Coordinate::new(5, 2), config(1, 1, 1));
        let Err(SegmentationError::InvalidSeed { seed, reason, .. }) = result else {
            panic!("expected an invalid seed error");
        };
        assert_eq!(seed, (5, 2));
        assert!(reason.contains("outside the raster"));
    }

    // Tests a huge pass count is accepted without reserving per-pass storage up front
    // Verified by reserving report capacity for every configured pass
    #[test]
    fn test_large_iteration_count() {
        let raster = mixed_raster();
        let mut driver = ConfidenceConnected::new(
            raster.view(),
            Coordinate::new(2, 2),
            config(1, 1, 1 << 40),
        )
        .expect("valid request");
        assert!(driver.run_pass().expect("pass runs"));
        assert_eq!(driver.passes_completed(), 1);
        assert!(!driver.is_complete());
    }

    // Tests rasters below the minimum extent are rejected
    // Verified by lowering the minimum dimension to one
    #[test]
    fn test_raster_too_small() {
        let raster = Array2::<u8>::zeros((1, 5));
        let result = ConfidenceConnected::new(raster.view(), Coordinate::new(0, 2), config(1, 1, 1));
        assert!(matches!(
            result,
            Err(SegmentationError::InvalidParameter {
                parameter: "raster",
                ..
            })
        ));
    }

    // Tests seed statistics come from the full window and the interval from them
    // Verified by dividing by n instead of n - 1
    #[test]
    fn test_first_pass_report() {
        let raster = mixed_raster();
        let mut driver =
            ConfidenceConnected::new(raster.view(), Coordinate::new(2, 2), config(1, 1, 2))
                .expect("valid request");

        assert!((driver.seed_intensity() - 11.0).abs() < f64::EPSILON);
        assert_eq!(driver.seed_statistics().count, 9);
        assert!((driver.seed_statistics().mean - 24.888_888_888).abs() < 1e-6);
        assert!((driver.seed_statistics().stddev - 27.483_833_632).abs() < 1e-6);

        assert!(driver.run_pass().expect("pass runs"));
        let report = driver.reports().first().copied().expect("one report");
        assert_eq!(report.pass, 1);
        assert_eq!(report.connectivity, Connectivity::Eight);
        assert!((report.thresholds.lower + 2.594_944_743).abs() < 1e-6);
        assert!((report.thresholds.upper - 52.372_722_521).abs() < 1e-6);
        assert_eq!(report.region_size, 17);
        assert_eq!(driver.region().len(), 17);
        // Window is queued column by column so the top-left window pixel is found first
        assert_eq!(driver.region().first(), Some(&Coordinate::new(1, 1)));
    }

    // Tests refinement uses region statistics, the fixed seed and 4-connectivity
    // Verified by recomputing the interval from the seed window on every pass
    #[test]
    fn test_refinement_pass() {
        let raster = mixed_raster();
        let mut driver =
            ConfidenceConnected::new(raster.view(), Coordinate::new(2, 2), config(1, 1, 2))
                .expect("valid request");
        driver.run_to_completion().expect("passes run");

        assert!(driver.is_complete());
        assert_eq!(driver.passes_completed(), 2);
        let report = driver.reports().get(1).copied().expect("second report");
        assert_eq!(report.connectivity, Connectivity::Four);
        assert_eq!(report.statistics.count, 17);
        assert!((report.statistics.mean - 20.294_117_647).abs() < 1e-6);
        assert!((report.thresholds.lower - 3.269_265_570).abs() < 1e-6);
        assert!((report.thresholds.upper - 37.318_969_724).abs() < 1e-6);

        assert_eq!(driver.region().first(), Some(&Coordinate::new(2, 2)));
        assert_eq!(
            sorted(driver.region()),
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 0),
                (1, 1),
                (1, 2),
                (2, 0),
                (2, 1),
                (2, 2),
                (2, 3),
                (3, 2),
                (3, 3)
            ]
        );
    }

    // Tests run_pass is a no-op once every pass has run
    // Verified by letting run_pass run an extra pass
    #[test]
    fn test_run_pass_after_completion() {
        let raster = mixed_raster();
        let mut driver =
            ConfidenceConnected::new(raster.view(), Coordinate::new(2, 2), config(1, 1, 1))
                .expect("valid request");
        assert!(!driver.run_pass().expect("pass runs"));
        assert!(!driver.run_pass().expect("no-op"));
        assert_eq!(driver.passes_completed(), 1);
    }

    // Tests a single-pixel region refines with zero spread instead of failing
    // Verified by calling the sample statistics on a one-element region
    #[test]
    fn test_single_pixel_refinement() {
        let raster = array![
            [0u8, 0, 0, 0],
            [0, 100, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0]
        ];
        let mut driver =
            ConfidenceConnected::new(raster.view(), Coordinate::new(1, 1), config(1, 0, 2))
                .expect("valid request");
        driver.run_to_completion().expect("passes run");

        assert_eq!(driver.region(), &[Coordinate::new(1, 1)]);
        let report = driver.reports().get(1).copied().expect("second report");
        assert!((report.statistics.mean - 100.0).abs() < f64::EPSILON);
        assert!(report.statistics.stddev.abs() < f64::EPSILON);
    }

    // Tests finish writes integer foreground as the type maximum
    // Verified by writing one instead of the maximum
    #[test]
    fn test_finish_mask_values() {
        let raster = mixed_raster();
        let driver =
            ConfidenceConnected::new(raster.view(), Coordinate::new(2, 2), config(1, 1, 2))
                .expect("valid request");
        let mask = driver.finish().expect("mask");
        assert_eq!(mask.dim(), (5, 5));
        assert_eq!(mask.get([2, 2]), Some(&u8::MAX));
        assert_eq!(mask.get([4, 4]), Some(&0));
        assert_eq!(mask.iter().filter(|&&v| v == u8::MAX).count(), 12);
        assert!(mask.iter().all(|&v| v == 0 || v == u8::MAX));
    }

    // Tests a mismatched output buffer is rejected and left untouched
    // Verified by checking extents after the seed validation
    #[test]
    fn test_segment_into_mismatched_extents() {
        let raster = mixed_raster();
        let mut out = Array2::<u8>::from_elem((4, 5), 7);
        // Invalid seed as well; the extents check wins
        let result = segment_into(
            raster.view(),
            Coordinate::new(0, 0),
            &config(1, 1, 1),
            &mut out,
        );
        assert!(matches!(
            result,
            Err(SegmentationError::MismatchedExtents {
                expected: (5, 5),
                actual: (4, 5)
            })
        ));
        assert!(out.iter().all(|&v| v == 7));
    }

    // Tests segment_into clears stale content before painting
    // Verified by skipping the background fill
    #[test]
    fn test_segment_into_overwrites() {
        let raster = mixed_raster();
        let mut out = Array2::<u8>::from_elem((5, 5), 3);
        segment_into(
            raster.view(),
            Coordinate::new(2, 2),
            &config(1, 1, 1),
            &mut out,
        )
        .expect("segmentation succeeds");
        assert_eq!(out.iter().filter(|&&v| v == u8::MAX).count(), 17);
        assert_eq!(out.iter().filter(|&&v| v == 0).count(), 8);
    }

    // Tests export without enabling capture is an error
    // Verified by silently returning Ok when disabled
    #[test]
    fn test_visualization_disabled() {
        let raster = mixed_raster();
        let driver =
            ConfidenceConnected::new(raster.view(), Coordinate::new(2, 2), config(1, 1, 1))
                .expect("valid request");
        let dir = tempfile::tempdir().expect("temp dir");
        let result = driver.export_visualization(&dir.path().join("passes.gif"));
        assert!(matches!(
            result,
            Err(SegmentationError::InvalidParameter {
                parameter: "visualization",
                ..
            })
        ));
    }

    // Tests capture records one region per pass
    // Verified by recording only the final pass
    #[test]
    fn test_visualization_records_passes() {
        let raster = mixed_raster();
        let mut driver =
            ConfidenceConnected::new(raster.view(), Coordinate::new(2, 2), config(1, 1, 3))
                .expect("valid request");
        driver.enable_visualization();
        driver.run_to_completion().expect("passes run");

        let capture = driver.visualization.as_ref().expect("capture enabled");
        assert_eq!(capture.pass_count(), 3);
        let sizes: Vec<usize> = capture.passes().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![17, 12, 10]);
    }
}
