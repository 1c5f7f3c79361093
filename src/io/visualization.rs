//! Frame capture and GIF generation showing region growth pass by pass

use crate::io::configuration::REGION_OVERLAY_COLOR;
use crate::io::error::{Result, SegmentationError, invalid_parameter};
use crate::spatial::grid::Coordinate;
use crate::spatial::raster::{Intensity, normalized_luma};
use image::{Frame, Rgba, RgbaImage};
use ndarray::{Array2, ArrayView2};
use std::path::Path;

/// Captures the region after each pass for visualization
///
/// Frames draw the region over a grey rendering of the source raster.
pub struct PassCapture {
    background: Array2<u8>,
    pub(crate) passes: Vec<Vec<Coordinate>>,
    overlay_color: [u8; 4],
}

impl PassCapture {
    /// Create a capture drawing over an 8-bit background
    pub const fn new(background: Array2<u8>) -> Self {
        Self {
            background,
            passes: Vec::new(),
            overlay_color: REGION_OVERLAY_COLOR,
        }
    }

    /// Create a capture whose background is the min/max normalised raster
    pub fn from_raster<T: Intensity>(raster: &ArrayView2<'_, T>) -> Self {
        Self::new(normalized_luma(raster))
    }

    /// Records the region produced by a pass
    pub fn record_pass(&mut self, region: &[Coordinate]) {
        self.passes.push(region.to_vec());
    }

    /// Returns all recorded regions, one per pass
    pub fn passes(&self) -> &[Vec<Coordinate>] {
        &self.passes
    }

    /// Returns the number of recorded passes
    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    /// Export the captured passes as an animated GIF
    ///
    /// The first frame shows the bare raster, followed by one frame per pass.
    /// The final frame is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No passes were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.passes.is_empty() {
            return Err(invalid_parameter(
                "visualization",
                &0,
                &"No passes captured for visualization",
            ));
        }

        let mut frames = Vec::with_capacity(self.passes.len() + 2);
        frames.push(self.render_frame(&[], frame_delay_ms));
        for region in &self.passes {
            frames.push(self.render_frame(region, frame_delay_ms));
        }

        // Final frame displays longer for better visibility
        if let Some(last_frame_img) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last_frame_img,
                0,
                0,
                image::Delay::from_numer_denom_ms(frame_delay_ms * 5, 1),
            ));
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SegmentationError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file =
            std::fs::File::create(output_path).map_err(|e| SegmentationError::FileSystem {
                path: output_path.to_path_buf(),
                operation: "create file",
                source: e,
            })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| SegmentationError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn render_frame(&self, region: &[Coordinate], delay_ms: u32) -> Frame {
        let (rows, cols) = self.background.dim();
        let mut img = RgbaImage::from_fn(cols as u32, rows as u32, |x, y| {
            let grey = self
                .background
                .get([y as usize, x as usize])
                .copied()
                .unwrap_or(0);
            Rgba([grey, grey, grey, 255])
        });

        for coord in region {
            if let Some(pixel) = img.get_pixel_mut_checked(coord.col as u32, coord.row as u32) {
                *pixel = Rgba(self.overlay_color);
            }
        }

        Frame::from_parts(img, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
    }
}
