//! Application configuration
//!
//! Settings are read from a TOML file. Every field has a default, so an empty
//! file (or no file at all) yields a working configuration pointed at the
//! public Planetary Computer endpoints.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::coordinate::DEFAULT_MAX_AREA_HECTARES;
use crate::errors::{SrError, SrResult};
use crate::model::ShapePolicy;
use crate::raster::DEFAULT_TIMEOUT_SECS;

/// Default configuration file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "satres.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub admission: AdmissionConfig,
    pub catalog: CatalogConfig,
    pub loader: LoaderConfig,
    pub output: OutputConfig,
}

/// Model artifact and input handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the ONNX export of the generator network
    pub path: PathBuf,
    /// Side length in pixels of each model input
    pub input_size: u32,
    /// What to do when an input array is not `input_size` square
    pub shape_policy: ShapePolicy,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            path: PathBuf::from("models/sr_generator.onnx"),
            input_size: 64,
            shape_policy: ShapePolicy::Coerce,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionConfig {
    pub max_area_hectares: f64,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        AdmissionConfig { max_area_hectares: DEFAULT_MAX_AREA_HECTARES }
    }
}

/// Imagery catalog endpoints and scene selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// STAC API root
    pub stac_url: String,
    /// Tiler (data API) root used for thumbnails and map tiles
    pub data_url: String,
    pub collection: String,
    /// Red, green, blue asset names
    pub bands: Vec<String>,
    pub scale_min: f64,
    pub scale_max: f64,
    /// First-pass cloud cover limit, in percent (exclusive)
    pub strict_cloud_threshold: f64,
    /// Fallback cloud cover limit, in percent (exclusive)
    pub relaxed_cloud_threshold: f64,
    /// Maximum number of scenes requested per search page
    pub search_limit: usize,
    pub request_timeout_secs: u64,
    /// Minimum days between the two selected captures; 0 keeps plain
    /// cloud-cover order
    pub min_separation_days: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            stac_url: "https://planetarycomputer.microsoft.com/api/stac/v1".to_string(),
            data_url: "https://planetarycomputer.microsoft.com/api/data/v1".to_string(),
            collection: "sentinel-2-l2a".to_string(),
            bands: vec!["B04".to_string(), "B03".to_string(), "B02".to_string()],
            scale_min: 0.0,
            scale_max: 3000.0,
            strict_cloud_threshold: 20.0,
            relaxed_cloud_threshold: 50.0,
            search_limit: 100,
            request_timeout_secs: 60,
            min_separation_days: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub timeout_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig { timeout_secs: DEFAULT_TIMEOUT_SECS }
    }
}

/// Where and how results are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Write a `.pgw` world file next to the PNG
    pub write_world_file: bool,
    /// Write a JSON overlay manifest next to the PNG
    pub write_manifest: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            directory: PathBuf::from("."),
            write_world_file: true,
            write_manifest: true,
        }
    }
}

impl Config {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> SrResult<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| SrError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SrResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| SrError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Load the given file, or the default file if present, or defaults
    pub fn load(path: Option<&Path>) -> SrResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Config::default()),
        }
    }

    fn validate(&self) -> SrResult<()> {
        let catalog = &self.catalog;
        if catalog.bands.len() != 3 {
            return Err(SrError::Config(format!(
                "catalog.bands must name exactly 3 assets (red, green, blue), got {}",
                catalog.bands.len()
            )));
        }
        if catalog.scale_max <= catalog.scale_min {
            return Err(SrError::Config("catalog.scale_max must exceed catalog.scale_min".to_string()));
        }
        if catalog.relaxed_cloud_threshold < catalog.strict_cloud_threshold {
            return Err(SrError::Config(
                "catalog.relaxed_cloud_threshold must not be below strict_cloud_threshold".to_string(),
            ));
        }
        if self.model.input_size == 0 {
            return Err(SrError::Config("model.input_size must be positive".to_string()));
        }
        if !(self.admission.max_area_hectares > 0.0) {
            return Err(SrError::Config("admission.max_area_hectares must be positive".to_string()));
        }
        Ok(())
    }
}
