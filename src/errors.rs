//! Error types for the super-resolution pipeline
//!
//! Every pipeline step reports failures through [`SrError`]. The variants
//! follow the stage that produced them so callers can tell an admission
//! rejection apart from a download or inference failure.

use std::io;
use thiserror::Error;

/// Pipeline error types
#[derive(Debug, Error)]
pub enum SrError {
    /// Region area exceeds the admission limit
    #[error("ROI is too large: {area:.2} hectares (limit is {limit:.0} hectares)")]
    RegionTooLarge { area: f64, limit: f64 },

    /// Region area could not be computed
    #[error("Could not compute ROI area: {0}")]
    UnknownArea(String),

    /// Malformed region geometry
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    /// Start date after end date, or date outside the supported range
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// Catalog query or thumbnail rendering failed, or too few scenes
    #[error("{0}")]
    Acquisition(String),

    /// Image download or decode failed
    #[error("Failed to load image from URL {url}: {reason}")]
    Load { url: String, reason: String },

    /// Input array shape rejected by the inference boundary
    #[error("Input image has unexpected shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        actual: (usize, usize, usize),
        expected: (usize, usize, usize),
    },

    /// Model invocation failed
    #[error("Error during super-resolution: {0}")]
    Inference(String),

    /// Result array could not be turned into an image
    #[error("Failed to convert array to bytes: {0}")]
    Encode(String),

    /// Model artifact missing or unusable
    #[error("Error loading model at '{path}': {reason}")]
    ModelLoad { path: String, reason: String },

    /// Configuration file problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with message
    #[error("{0}")]
    GenericError(String),
}

impl SrError {
    /// Errors that must stop the whole process rather than one request
    pub fn is_fatal(&self) -> bool {
        matches!(self, SrError::ModelLoad { .. })
    }

    /// Name of the step that raises this kind of error
    pub fn stage(&self) -> &'static str {
        match self {
            SrError::RegionTooLarge { .. }
            | SrError::UnknownArea(_)
            | SrError::InvalidRegion(_)
            | SrError::InvalidDateRange(_) => "validation",
            SrError::Acquisition(_) => "acquisition",
            SrError::Load { .. } => "loading",
            SrError::ShapeMismatch { .. } | SrError::Inference(_) => "inference",
            SrError::Encode(_) => "encoding",
            SrError::ModelLoad { .. } => "startup",
            SrError::Config(_) | SrError::Io(_) | SrError::GenericError(_) => "general",
        }
    }

    /// Errors raised before any network call is made
    pub fn is_admission(&self) -> bool {
        matches!(
            self,
            SrError::RegionTooLarge { .. }
                | SrError::UnknownArea(_)
                | SrError::InvalidRegion(_)
                | SrError::InvalidDateRange(_)
        )
    }
}

impl From<image::ImageError> for SrError {
    fn from(error: image::ImageError) -> Self {
        SrError::Encode(error.to_string())
    }
}

/// Result type for pipeline operations
pub type SrResult<T> = Result<T, SrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_too_large_message() {
        let err = SrError::RegionTooLarge { area: 15000.004, limit: 10000.0 };
        assert_eq!(err.to_string(), "ROI is too large: 15000.00 hectares (limit is 10000 hectares)");
        assert!(err.is_admission());
        assert_eq!(err.stage(), "validation");
    }

    #[test]
    fn test_only_model_load_is_fatal() {
        let fatal = SrError::ModelLoad { path: "m.onnx".to_string(), reason: "missing".to_string() };
        assert!(fatal.is_fatal());
        assert!(!SrError::Inference("boom".to_string()).is_fatal());
        assert!(!SrError::Acquisition("none".to_string()).is_admission());
    }
}
