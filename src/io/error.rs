//! Error types for segmentation requests and the file tooling around them

use std::fmt;
use std::path::PathBuf;

/// Main error type for all segmentation operations
///
/// Every variant is raised before any traversal starts or instead of
/// producing a mask. There is no partial output on failure.
#[derive(Debug)]
pub enum SegmentationError {
    /// Seed lies outside the raster or its window does not fit
    InvalidSeed {
        /// Seed as supplied (row, col)
        seed: (usize, usize),
        /// Window radius requested for the initial statistics
        radius: usize,
        /// Raster extents (rows, cols)
        extents: (usize, usize),
        /// Explanation of the failed check
        reason: String,
    },

    /// Algorithm parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Output raster extents differ from the input raster
    MismatchedExtents {
        /// Extents of the input raster (rows, cols)
        expected: (usize, usize),
        /// Extents of the supplied output raster (rows, cols)
        actual: (usize, usize),
    },

    /// Statistics requested over fewer than two samples
    DegenerateStatistics {
        /// Number of samples supplied
        count: usize,
    },

    /// Decoded image has a pixel layout the segmenter does not accept
    UnsupportedElementType {
        /// Colour type reported by the decoder
        color_type: String,
    },

    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save mask or visualization to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SegmentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSeed {
                seed,
                radius,
                extents,
                reason,
            } => {
                write!(
                    f,
                    "Invalid seed ({}, {}) with radius {radius} for {}x{} raster: {reason}",
                    seed.0, seed.1, extents.0, extents.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MismatchedExtents { expected, actual } => {
                write!(
                    f,
                    "Output extents {}x{} do not match input extents {}x{}",
                    actual.0, actual.1, expected.0, expected.1
                )
            }
            Self::DegenerateStatistics { count } => {
                write!(
                    f,
                    "Cannot compute sample standard deviation over {count} sample(s)"
                )
            }
            Self::UnsupportedElementType { color_type } => {
                write!(f, "Unsupported element type: {color_type}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SegmentationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for segmentation results
pub type Result<T> = std::result::Result<T, SegmentationError>;

impl From<image::ImageError> for SegmentationError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SegmentationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SegmentationError {
    SegmentationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid seed error
pub fn invalid_seed(
    seed: (usize, usize),
    radius: usize,
    extents: (usize, usize),
    reason: &impl ToString,
) -> SegmentationError {
    SegmentationError::InvalidSeed {
        seed,
        radius,
        extents,
        reason: reason.to_string(),
    }
}
