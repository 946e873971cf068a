//! PNG encoding of model output

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage, RgbaImage};
use ndarray::ArrayView3;

use super::array::quantize;
use crate::errors::{SrError, SrResult};

/// MIME type of encoded results
pub const PNG_MIME_TYPE: &str = "image/png";

/// Encode a `(height, width, channels)` float array in [0, 1] as PNG
///
/// Values outside [0, 1] are clipped. One, three and four channels map to
/// grayscale, RGB and RGBA respectively.
pub fn encode_png(array: ArrayView3<'_, f32>) -> SrResult<Vec<u8>> {
    let (height, width, channels) = array.dim();
    if height == 0 || width == 0 {
        return Err(SrError::Encode(format!("cannot encode empty {}x{} array", width, height)));
    }

    // as_standard_layout guarantees row-major order for into_raw_vec
    let pixels = quantize(array).as_standard_layout().to_owned().into_raw_vec();
    let (w, h) = (width as u32, height as u32);
    let shape_error = || SrError::Encode(format!("buffer does not match {}x{}x{}", width, height, channels));

    let image = match channels {
        1 => DynamicImage::ImageLuma8(GrayImage::from_raw(w, h, pixels).ok_or_else(shape_error)?),
        3 => DynamicImage::ImageRgb8(RgbImage::from_raw(w, h, pixels).ok_or_else(shape_error)?),
        4 => DynamicImage::ImageRgba8(RgbaImage::from_raw(w, h, pixels).ok_or_else(shape_error)?),
        other => return Err(SrError::Encode(format!("unsupported channel count {}", other))),
    };

    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
