//! PNG loading with element type dispatch, and mask export

use crate::io::error::{Result, SegmentationError};
use crate::spatial::raster::Intensity;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Pixel, Primitive};
use ndarray::{Array2, ArrayView2};
use std::path::Path;

/// Single-channel raster decoded from an image file
///
/// The variant records the element type the segmenter will run over.
#[derive(Debug, Clone)]
pub enum GrayRaster {
    /// 8-bit grey
    Luma8(Array2<u8>),
    /// 16-bit grey
    Luma16(Array2<u16>),
    /// 32-bit float luma
    Luma32F(Array2<f32>),
}

impl GrayRaster {
    /// Extents as (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        match self {
            Self::Luma8(data) => data.dim(),
            Self::Luma16(data) => data.dim(),
            Self::Luma32F(data) => data.dim(),
        }
    }

    /// Name of the element type
    pub const fn element_type(&self) -> &'static str {
        match self {
            Self::Luma8(_) => "u8",
            Self::Luma16(_) => "u16",
            Self::Luma32F(_) => "f32",
        }
    }
}

// Row-major copy of the first channel; ImageBuffer stores rows contiguously
fn first_channel<P>(img: &ImageBuffer<P, Vec<P::Subpixel>>) -> Array2<P::Subpixel>
where
    P: Pixel,
{
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
        img.get_pixel(col as u32, row as u32)
            .channels()
            .first()
            .copied()
            .unwrap_or(<P::Subpixel as Primitive>::DEFAULT_MIN_VALUE)
    })
}

/// Decode an image and dispatch on its pixel layout
///
/// Grey images map to their native element type and alpha is dropped.
/// Float images are reduced to luma. Colour integer images are rejected
/// unless `convert_color` is set, in which case they are converted to 8-bit
/// luma.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image is in colour and `convert_color` is false
pub fn load_grayscale(path: &Path, convert_color: bool) -> Result<GrayRaster> {
    let img = image::open(path).map_err(|e| SegmentationError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    let raster = match img {
        DynamicImage::ImageLuma8(buffer) => GrayRaster::Luma8(first_channel(&buffer)),
        DynamicImage::ImageLumaA8(buffer) => GrayRaster::Luma8(first_channel(&buffer)),
        DynamicImage::ImageLuma16(buffer) => GrayRaster::Luma16(first_channel(&buffer)),
        DynamicImage::ImageLumaA16(buffer) => GrayRaster::Luma16(first_channel(&buffer)),
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            GrayRaster::Luma32F(first_channel(&img.to_luma32f()))
        }
        other if convert_color => GrayRaster::Luma8(first_channel(&other.to_luma8())),
        other => {
            return Err(SegmentationError::UnsupportedElementType {
                color_type: format!("{:?}", other.color()),
            });
        }
    };

    Ok(raster)
}

/// Save a mask as an 8-bit PNG, foreground 255 and background 0
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_mask_png<T: Intensity>(mask: &ArrayView2<'_, T>, output_path: &Path) -> Result<()> {
    let (rows, cols) = mask.dim();
    let img = GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        let foreground = mask
            .get([y as usize, x as usize])
            .is_some_and(|&value| value != T::zero());
        Luma([if foreground { u8::MAX } else { 0 }])
    });

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SegmentationError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| SegmentationError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
