//! Per-file pass progress, showing how each pass reshaped the region

use crate::algorithm::executor::PassReport;
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static PASS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>24} [{bar:20.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Progress of one input file through its passes
#[derive(Debug, Clone, Default)]
pub struct FileProgress {
    name: String,
    total_passes: usize,
    last_pass: Option<PassReport>,
    elapsed: Option<Duration>,
}

impl FileProgress {
    /// Track `total_passes` passes over the file at `path`
    pub fn new(path: &Path, total_passes: usize) -> Self {
        Self {
            name: path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned(),
            total_passes,
            last_pass: None,
            elapsed: None,
        }
    }

    /// Display name of the file
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Passes finished so far
    pub fn passes_done(&self) -> usize {
        self.last_pass.map_or(0, |report| report.pass)
    }

    /// Remember the outcome of the latest pass
    pub const fn record(&mut self, report: PassReport) {
        self.last_pass = Some(report);
    }

    /// Mark the file finished
    pub const fn complete(&mut self, elapsed: Duration) {
        self.elapsed = Some(elapsed);
    }

    /// Whether the file has been marked finished
    pub const fn is_complete(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Status line for the bar
    ///
    /// Shows the pass counter and, once a pass has run, the region size
    /// against the number of pixels that pass classified.
    pub fn message(&self) -> String {
        let width = self.total_passes.to_string().len();
        let mut message = format!(
            "pass {:>width$}/{}",
            self.passes_done(),
            self.total_passes
        );
        if let Some(report) = self.last_pass {
            message.push_str(&format!(
                ", {} {} of {} visited",
                report.connectivity, report.region_size, report.visited
            ));
        }
        if let Some(elapsed) = self.elapsed {
            message.push_str(&format!(", done in {elapsed:.2?}"));
        }
        message
    }
}

/// Progress display for a batch of files
///
/// Up to `MAX_INDIVIDUAL_PROGRESS_BARS` files get their own bar, showing the
/// most recently started ones. Larger batches add a file counter bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    files: Vec<FileProgress>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with no bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Create bars for a batch of `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(PASS_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Files tracked so far, indexed as passed to `start_file`
    pub fn files(&self) -> &[FileProgress] {
        &self.files
    }

    /// Begin tracking the file at `index`
    pub fn start_file(&mut self, index: usize, path: &Path, passes: usize) {
        if index >= self.files.len() {
            self.files.resize_with(index + 1, FileProgress::default);
        }
        if let Some(file) = self.files.get_mut(index) {
            *file = FileProgress::new(path, passes);
        }
        self.redraw();
    }

    /// Record a finished pass of the file at `index`
    pub fn record_pass(&mut self, index: usize, report: &PassReport) {
        if let Some(file) = self.files.get_mut(index) {
            file.record(*report);
        }
        self.redraw();
    }

    /// Mark the file at `index` finished
    pub fn complete_file(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(file) = self.files.get_mut(index) {
            file.complete(elapsed);
        }
        self.redraw();
    }

    /// Clear all bars
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    // Bars show the most recently started files, oldest first
    fn redraw(&self) {
        let started: Vec<&FileProgress> = self
            .files
            .iter()
            .filter(|file| !file.name().is_empty())
            .collect();
        let skip = started.len().saturating_sub(self.file_bars.len());

        for (slot, bar) in self.file_bars.iter().enumerate() {
            match started.get(skip + slot) {
                Some(file) => {
                    bar.set_length(file.total_passes as u64);
                    bar.set_position(file.passes_done() as u64);
                    bar.set_prefix(file.name().to_string());
                    bar.set_message(file.message());
                }
                None => {
                    bar.set_length(0);
                    bar.set_position(0);
                    bar.set_prefix(String::new());
                    bar.set_message(String::new());
                }
            }
        }
    }
}
