//! Downloading and normalizing thumbnail images
//!
//! Every image handed to the model must be exactly `size x size` RGB. The
//! loader guarantees that by converting the color mode and resampling with
//! a Lanczos filter whenever the source has other dimensions.

use std::time::Duration;

use image::imageops::FilterType;
use log::{debug, info};
use reqwest::blocking::Client;

use super::array::{rgb_image_to_array, RgbArray};
use crate::errors::{SrError, SrResult};

/// Default download timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Anything that can turn a URL into a normalized RGB array
pub trait ImageSource {
    fn load(&self, url: &str) -> SrResult<RgbArray>;
}

/// Blocking HTTP image loader
pub struct HttpImageLoader {
    client: Client,
    size: u32,
}

impl HttpImageLoader {
    /// Create a loader producing `size x size` images
    pub fn new(size: u32, timeout_secs: u64) -> SrResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SrError::GenericError(format!("Cannot build HTTP client: {}", e)))?;
        Ok(HttpImageLoader { client, size })
    }

    fn fetch_bytes(&self, url: &str) -> SrResult<Vec<u8>> {
        let load_error = |reason: String| SrError::Load { url: url.to_string(), reason };

        let response = self.client.get(url)
            .send()
            .map_err(|e| load_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(load_error(format!("HTTP status {}", status)));
        }

        let bytes = response.bytes().map_err(|e| load_error(e.to_string()))?;
        debug!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

impl ImageSource for HttpImageLoader {
    fn load(&self, url: &str) -> SrResult<RgbArray> {
        info!("Loading image from {}", url);
        let bytes = self.fetch_bytes(url)?;
        decode_image(&bytes, self.size, url)
    }
}

/// Decode image bytes into a `size x size` RGB array
///
/// Alpha is dropped and grayscale expanded. `source` names where the bytes
/// came from and is reported in the `Load` error on failure.
pub fn decode_image(bytes: &[u8], size: u32, source: &str) -> SrResult<RgbArray> {
    let load_error = |reason: String| SrError::Load { url: source.to_string(), reason };
    let decoded = image::load_from_memory(bytes).map_err(|e| load_error(format!("cannot decode image: {}", e)))?;
    let mut rgb = decoded.to_rgb8();

    if rgb.dimensions() != (size, size) {
        debug!("Resampling {}x{} image to {}x{}", rgb.width(), rgb.height(), size, size);
        rgb = image::imageops::resize(&rgb, size, size, FilterType::Lanczos3);
    }

    rgb_image_to_array(rgb).map_err(|e| load_error(e.to_string()))
}
