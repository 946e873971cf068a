//! Raster handling: loading inputs, encoding outputs, georeferencing

mod array;
mod loader;
mod encoder;
mod georef;
#[cfg(test)]
mod tests;

pub use self::array::{normalize, quantize, rgb_image_to_array, FloatArray, RgbArray};
pub use self::loader::{decode_image, HttpImageLoader, ImageSource, DEFAULT_TIMEOUT_SECS};
pub use self::encoder::{encode_png, PNG_MIME_TYPE};
pub use self::georef::{world_file, OverlayInput, OverlayManifest};
