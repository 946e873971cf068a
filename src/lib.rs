pub mod errors;
pub mod config;
pub mod coordinate;
pub mod acquisition;
pub mod raster;
pub mod model;
pub mod context;
pub mod pipeline;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::{Generated, SuperResolver};

pub use errors::{SrError, SrResult};
pub use config::Config;
pub use context::AppContext;
pub use coordinate::{area_hectares, GeometryValidator, RegionOfInterest};
pub use acquisition::{ImageFetcher, ImageryCatalog};
pub use model::{InferenceRunner, SuperResolutionModel};
pub use pipeline::{Orchestrator, PipelineStage, ResultState};
