//! Error types, configuration and file-level tooling around the segmentation core

/// Command-line interface and batch file processing
pub mod cli;
/// Default parameters and output naming constants
pub mod configuration;
/// Error types for validation and I/O failures
pub mod error;
/// PNG loading with element type dispatch and mask export
pub mod image;
/// Progress bars for batch runs
pub mod progress;
/// Per-pass GIF capture of region growth
pub mod visualization;
