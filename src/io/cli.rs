//! Command-line interface for batch segmentation of PNG files

use crate::algorithm::executor::{ConfidenceConnected, SegmentationConfig};
use crate::io::configuration::{
    DEFAULT_ITERATIONS, DEFAULT_MULTIPLIER, DEFAULT_RADIUS, OUTPUT_SUFFIX, VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, SegmentationError};
use crate::io::image::{GrayRaster, export_mask_png, load_grayscale};
use crate::io::progress::ProgressManager;
use crate::spatial::grid::Coordinate;
use crate::spatial::raster::Intensity;
use clap::Parser;
use log::info;
use ndarray::ArrayView2;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "regiongrow")]
#[command(
    author,
    version,
    about = "Segment PNG rasters by confidence-connected region growing"
)]
/// Command-line arguments for the segmentation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Seed pixel as ROW,COL
    #[arg(
        short,
        long,
        value_delimiter = ',',
        num_args = 1..,
        required = true,
        allow_negative_numbers = true
    )]
    pub seed: Vec<i64>,

    /// Half-width of the statistics and neighbour search windows
    #[arg(short, long, default_value_t = DEFAULT_RADIUS)]
    pub radius: usize,

    /// Standard deviations admitted on each side of the mean
    #[arg(short, long, default_value_t = DEFAULT_MULTIPLIER)]
    pub multiplier: u32,

    /// Total passes including the initial 8-connected pass
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Write an animated GIF with one frame per pass
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Convert colour images to 8-bit luma instead of rejecting them
    #[arg(short, long)]
    pub luma: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Segmentation parameters from the parsed flags
    pub const fn config(&self) -> SegmentationConfig {
        SegmentationConfig {
            radius: self.radius,
            multiplier: self.multiplier,
            iterations: self.iterations,
        }
    }

    /// Seed coordinate from the parsed flags
    ///
    /// # Errors
    ///
    /// Returns an error if the seed is not two non-negative integers
    pub fn seed_coordinate(&self) -> Result<Coordinate> {
        Coordinate::from_seed_array(&self.seed)
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, target validation or file
    /// processing fails
    pub fn process(&mut self) -> Result<()> {
        let seed = self.cli.seed_coordinate()?;
        self.cli.config().validate()?;

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, seed)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Collect PNG inputs from the target, skipping ones with existing output
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a PNG file nor a readable
    /// directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(target_error(&self.cli.target, "Target file must be a PNG image"))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            let entries =
                std::fs::read_dir(&self.cli.target).map_err(|e| SegmentationError::FileSystem {
                    path: self.cli.target.clone(),
                    operation: "read directory",
                    source: e,
                })?;
            for entry in entries {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && !is_generated_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(target_error(
                &self.cli.target,
                "Target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize, seed: Coordinate) -> Result<()> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, self.cli.iterations);
        }

        let raster = load_grayscale(input_path, self.cli.luma)?;
        let region_size = match &raster {
            GrayRaster::Luma8(data) => self.segment_raster(data.view(), seed, input_path, index)?,
            GrayRaster::Luma16(data) => self.segment_raster(data.view(), seed, input_path, index)?,
            GrayRaster::Luma32F(data) => {
                self.segment_raster(data.view(), seed, input_path, index)?
            }
        };

        let (rows, cols) = raster.dim();
        info!(
            "{}: {} raster {rows}x{cols}, region of {region_size} pixels in {:?}",
            input_path.display(),
            raster.element_type(),
            start_time.elapsed()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(())
    }

    fn segment_raster<T: Intensity>(
        &mut self,
        raster: ArrayView2<'_, T>,
        seed: Coordinate,
        input_path: &Path,
        index: usize,
    ) -> Result<usize> {
        let mut executor = ConfidenceConnected::new(raster, seed, self.cli.config())?;

        if self.cli.visualize {
            executor.enable_visualization();
        }

        loop {
            let more = executor.run_pass()?;
            if let (Some(pm), Some(report)) =
                (self.progress_manager.as_mut(), executor.reports().last())
            {
                pm.record_pass(index, report);
            }
            if !more {
                break;
            }
        }

        if self.cli.visualize {
            executor.export_visualization(&Self::get_visualization_path(input_path))?;
        }

        let region_size = executor.region().len();
        let mask = executor.finish()?;
        export_mask_png(&mask.view(), &Self::get_output_path(input_path))?;

        Ok(region_size)
    }

    /// Mask path for an input, `<stem>_mask.<ext>` beside the input
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    /// Visualization path for an input, `<stem>_passes.gif` beside the input
    pub fn get_visualization_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let viz_name = format!("{}{VISUALIZATION_SUFFIX}.gif", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}

fn target_error(target: &Path, reason: &str) -> SegmentationError {
    SegmentationError::InvalidParameter {
        parameter: "target",
        value: target.display().to_string(),
        reason: reason.to_string(),
    }
}

// Masks written by earlier runs sit beside their inputs
fn is_generated_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
