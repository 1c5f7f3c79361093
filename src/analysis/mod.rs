//! Intensity statistics feeding the threshold policy

/// Mean and sample standard deviation over windows and coordinate collections
pub mod statistics;
