//! Intensity element types and binary mask rendering

use crate::io::error::{Result, SegmentationError};
use crate::spatial::grid::{Coordinate, RasterBounds};
use ndarray::{Array2, ArrayView2};
use num_traits::{ToPrimitive, Zero};
use std::fmt::Debug;

/// Numeric pixel type the segmenter can grow regions over
///
/// Statistics and thresholds are evaluated in `f64`. The mask written for
/// a region uses `zero()` as background and `foreground()` as foreground.
pub trait Intensity: Copy + PartialOrd + ToPrimitive + Zero + Debug {
    /// Value written for pixels inside the region
    fn foreground() -> Self;

    /// Intensity as `f64`, NaN when the value has no numeric meaning
    fn intensity(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

macro_rules! integer_intensity {
    ($($t:ty),*) => {
        $(
            impl Intensity for $t {
                fn foreground() -> Self {
                    <$t>::MAX
                }
            }
        )*
    };
}

integer_intensity!(u8, u16, u32, i8, i16, i32);

impl Intensity for f32 {
    fn foreground() -> Self {
        1.0
    }
}

impl Intensity for f64 {
    fn foreground() -> Self {
        1.0
    }
}

/// Read the intensity at `coord`, `None` outside the raster
pub fn intensity_at<T: Intensity>(raster: &ArrayView2<'_, T>, coord: Coordinate) -> Option<f64> {
    raster
        .get([coord.row, coord.col])
        .copied()
        .map(Intensity::intensity)
}

/// Render a region as a zero-initialised binary mask
pub fn rasterize<T: Intensity>(bounds: RasterBounds, region: &[Coordinate]) -> Array2<T> {
    let mut mask = Array2::zeros(bounds.extents());
    paint_region(&mut mask, region);
    mask
}

/// Render a region into a caller-supplied buffer
///
/// Every pixel is reset to background before the region is painted.
///
/// # Errors
///
/// Returns `MismatchedExtents` without touching `out` if its extents differ
/// from `bounds`
pub fn rasterize_into<T: Intensity>(
    bounds: RasterBounds,
    region: &[Coordinate],
    out: &mut Array2<T>,
) -> Result<()> {
    if out.dim() != bounds.extents() {
        return Err(SegmentationError::MismatchedExtents {
            expected: bounds.extents(),
            actual: out.dim(),
        });
    }

    out.fill(T::zero());
    paint_region(out, region);
    Ok(())
}

fn paint_region<T: Intensity>(mask: &mut Array2<T>, region: &[Coordinate]) {
    for coord in region {
        if let Some(pixel) = mask.get_mut([coord.row, coord.col]) {
            *pixel = T::foreground();
        }
    }
}

/// Count foreground pixels in a mask
pub fn foreground_count<T: Intensity>(mask: &ArrayView2<'_, T>) -> usize {
    mask.iter().filter(|value| !value.is_zero()).count()
}

/// Rescale a raster to 8-bit luma using its own min/max range
///
/// A constant raster maps to mid-grey.
pub fn normalized_luma<T: Intensity>(raster: &ArrayView2<'_, T>) -> Array2<u8> {
    let (min, max) = raster
        .iter()
        .map(|value| value.intensity())
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        });

    let span = max - min;
    raster.mapv(|value| {
        let value = value.intensity();
        if !value.is_finite() || !span.is_finite() {
            0
        } else if span <= 0.0 {
            128
        } else {
            ((value - min) / span * 255.0).round().clamp(0.0, 255.0) as u8
        }
    })
}
