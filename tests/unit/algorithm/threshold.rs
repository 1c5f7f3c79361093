//! Tests for threshold interval derivation and seed inclusion

#[cfg(test)]
mod tests {
    use regiongrow::algorithm::threshold::ThresholdInterval;
    use regiongrow::analysis::statistics::RegionStatistics;

    fn stats(mean: f64, stddev: f64) -> RegionStatistics {
        RegionStatistics {
            mean,
            stddev,
            count: 9,
        }
    }

    // Tests nominal interval is mean ± multiplier * stddev
    // Verified by dropping the multiplier from the half width
    #[test]
    fn test_nominal_interval() {
        let interval = ThresholdInterval::derive(10.0, &stats(10.0, 2.0), 3);
        assert!((interval.lower - 4.0).abs() < 1e-12);
        assert!((interval.upper - 16.0).abs() < 1e-12);
        assert!((interval.width() - 12.0).abs() < 1e-12);
    }

    // Tests lower bound is pulled down to a seed below the interval
    // Verified by clamping the upper bound instead
    #[test]
    fn test_lower_clamped_to_seed() {
        let interval = ThresholdInterval::derive(2.0, &stats(10.0, 1.0), 2);
        assert!((interval.lower - 2.0).abs() < f64::EPSILON);
        assert!((interval.upper - 12.0).abs() < f64::EPSILON);
        assert!(interval.contains(2.0));
    }

    // Tests upper bound is raised to a seed above the interval
    // Verified by removing the else branch
    #[test]
    fn test_upper_clamped_to_seed() {
        let interval = ThresholdInterval::derive(30.0, &stats(10.0, 1.0), 2);
        assert!((interval.lower - 8.0).abs() < f64::EPSILON);
        assert!((interval.upper - 30.0).abs() < f64::EPSILON);
        assert!(interval.contains(30.0));
    }

    // Tests zero multiplier collapses the interval onto the mean and seed
    // Verified by using a fixed half width of one
    #[test]
    fn test_zero_multiplier() {
        let interval = ThresholdInterval::derive(5.0, &stats(5.0, 4.0), 0);
        assert!(interval.contains(5.0));
        assert!(!interval.contains(5.5));
        assert!(!interval.contains(4.5));
    }

    // Tests containment is inclusive and rejects NaN
    // Verified by switching to strict comparisons
    #[test]
    fn test_contains_inclusive() {
        let interval = ThresholdInterval {
            lower: 1.0,
            upper: 3.0,
        };
        assert!(interval.contains(1.0));
        assert!(interval.contains(3.0));
        assert!(!interval.contains(3.0001));
        assert!(!interval.contains(f64::NAN));
        assert_eq!(interval.to_string(), "[1.000, 3.000]");
    }

    // Tests the seed is always inside the derived interval
    // Verified by deleting both clamps
    #[test]
    fn test_seed_always_included() {
        for seed in [-50.0, 0.0, 7.5, 10.0, 12.5, 1_000.0] {
            for multiplier in 0..4 {
                let interval = ThresholdInterval::derive(seed, &stats(10.0, 1.5), multiplier);
                assert!(interval.contains(seed), "seed {seed} outside {interval}");
            }
        }
    }

    // Tests membership and width are usable in constant contexts
    // Verified by dropping const from contains
    #[test]
    fn test_const_evaluation() {
        const UNIT: ThresholdInterval = ThresholdInterval {
            lower: 0.0,
            upper: 1.0,
        };
        const MIDPOINT_INSIDE: bool = UNIT.contains(0.5);
        const WIDTH: f64 = UNIT.width();
        assert!(MIDPOINT_INSIDE);
        assert!((WIDTH - 1.0).abs() < f64::EPSILON);
    }
}
