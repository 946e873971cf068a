//! Raster array types and conversions
//!
//! Images move through the pipeline as `(height, width, channels)` ndarray
//! arrays: `u8` straight out of the decoder, `f32` in [0, 1] for the model.

use image::RgbImage;
use ndarray::{Array3, ArrayView3};

use crate::errors::{SrError, SrResult};

/// 8-bit RGB raster, `(height, width, 3)`
pub type RgbArray = Array3<u8>;

/// Floating-point raster, `(height, width, channels)`
pub type FloatArray = Array3<f32>;

/// Convert a decoded RGB image into an array
pub fn rgb_image_to_array(image: RgbImage) -> SrResult<RgbArray> {
    let (width, height) = image.dimensions();
    Array3::from_shape_vec((height as usize, width as usize, 3), image.into_raw())
        .map_err(|e| SrError::GenericError(format!("Cannot shape {}x{} image: {}", width, height, e)))
}

/// Scale 8-bit values into [0, 1]
pub fn normalize(array: &RgbArray) -> FloatArray {
    array.mapv(|v| f32::from(v) / 255.0)
}

/// Clip to [0, 1] and quantize to 8 bits
///
/// Values are truncated, not rounded, after scaling by 255. NaN maps to 0.
pub fn quantize(array: ArrayView3<'_, f32>) -> Array3<u8> {
    array.mapv(|v| {
        let clipped = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        (clipped * 255.0) as u8
    })
}
