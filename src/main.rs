//! CLI entry point for confidence-connected segmentation of PNG rasters

use clap::Parser;
use regiongrow::io::cli::{Cli, FileProcessor};

fn main() -> regiongrow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
