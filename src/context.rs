//! Process-wide application context
//!
//! Built once at startup and passed by reference to every pipeline run. It
//! owns the loaded model, which is the only shared state between runs.

use log::info;

use crate::acquisition::{ImageryCatalog, MapTileProvider, PlanetaryComputerCatalog};
use crate::config::Config;
use crate::errors::SrResult;
use crate::model::{OnnxModel, SuperResolutionModel};
use crate::raster::{HttpImageLoader, ImageSource};

/// Long-lived collaborators of the pipeline
pub struct AppContext {
    config: Config,
    model: Box<dyn SuperResolutionModel>,
    catalog: Box<dyn ImageryCatalog>,
    images: Box<dyn ImageSource>,
    tiles: Option<Box<dyn MapTileProvider>>,
}

impl AppContext {
    /// Assemble a context from explicit collaborators
    pub fn new(
        config: Config,
        model: Box<dyn SuperResolutionModel>,
        catalog: Box<dyn ImageryCatalog>,
        images: Box<dyn ImageSource>,
    ) -> Self {
        AppContext { config, model, catalog, images, tiles: None }
    }

    /// Attach a map tile provider for overlay manifests
    pub fn with_tiles(mut self, tiles: Box<dyn MapTileProvider>) -> Self {
        self.tiles = Some(tiles);
        self
    }

    /// Build the production context: ONNX model, Planetary Computer
    /// catalog and HTTP loader
    ///
    /// A model that fails to load is returned as a fatal error; nothing else
    /// in the pipeline is usable without it.
    pub fn from_config(config: Config) -> SrResult<Self> {
        let size = config.model.input_size;
        let model = OnnxModel::load(&config.model.path, size as usize)?;
        let catalog = PlanetaryComputerCatalog::new(&config.catalog)?;
        let tiles = catalog.clone();
        let images = HttpImageLoader::new(size, config.loader.timeout_secs)?;

        info!("Application context ready (model input {}x{})", size, size);

        Ok(AppContext::new(config, Box::new(model), Box::new(catalog), Box::new(images))
            .with_tiles(Box::new(tiles)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn model(&self) -> &dyn SuperResolutionModel {
        self.model.as_ref()
    }

    pub fn catalog(&self) -> &dyn ImageryCatalog {
        self.catalog.as_ref()
    }

    pub fn images(&self) -> &dyn ImageSource {
        self.images.as_ref()
    }

    pub fn tiles(&self) -> Option<&dyn MapTileProvider> {
        self.tiles.as_deref()
    }
}
