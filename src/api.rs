use chrono::{Datelike, NaiveDate};
use log::info;

use crate::acquisition::{composite_tile_url_or_warn, DateRange, FetchOutcome, FetchPolicy, ImageFetcher};
use crate::config::Config;
use crate::context::AppContext;
use crate::coordinate::{area_hectares, AdmittedRegion, CornerBounds, GeometryValidator};
use crate::errors::{SrError, SrResult};
use crate::pipeline::{Orchestrator, OutputWriter, ResultState, SavedOutput};

/// Main interface to the satres library
pub struct SuperResolver {
    context: AppContext,
    show_progress: bool,
}

/// A finished generation: the result buffer and the files written for it
#[derive(Debug)]
pub struct Generated {
    pub state: ResultState,
    pub saved: SavedOutput,
}

impl SuperResolver {
    /// Create a resolver with the production model, catalog and loader
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// A SuperResolver, or a fatal `ModelLoad` error if the model is unusable
    pub fn new(config: Config) -> SrResult<Self> {
        Ok(Self::with_context(AppContext::from_config(config)?))
    }

    /// Create a resolver around an existing context
    pub fn with_context(context: AppContext) -> Self {
        SuperResolver { context, show_progress: false }
    }

    /// Show step spinners on the terminal while generating
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Area of a region in hectares
    ///
    /// # Returns
    /// The area, or `UnknownArea` when it cannot be computed
    pub fn area(&self, bounds: &CornerBounds) -> SrResult<f64> {
        area_hectares(bounds)
            .ok_or_else(|| SrError::UnknownArea(format!("bounds {:?} are outside the valid domain", bounds)))
    }

    /// Apply the admission rules to a region
    pub fn admit(&self, bounds: &CornerBounds) -> SrResult<AdmittedRegion> {
        GeometryValidator::new(self.context.config().admission.max_area_hectares).admit(bounds)
    }

    /// Look for an image pair without loading or running the model
    ///
    /// # Arguments
    /// * `bounds` - Region corners as `[[lat, lon], [lat, lon]]`
    /// * `target_date` - Centre of the search window
    /// * `window_days` - Total window length in days
    pub fn search(&self, bounds: &CornerBounds, target_date: NaiveDate, window_days: u32) -> SrResult<FetchOutcome> {
        let admitted = self.admit(bounds)?;
        let dates = DateRange::around(target_date, window_days)?;
        let config = self.context.config();
        let policy = FetchPolicy::from_config(&config.catalog, config.model.input_size);

        Ok(ImageFetcher::new(self.context.catalog(), policy).fetch_pair(&admitted.region, &dates))
    }

    /// Run the whole pipeline and write the result to the output directory
    ///
    /// # Arguments
    /// * `bounds` - Region corners as `[[lat, lon], [lat, lon]]`
    /// * `target_date` - Centre of the search window
    /// * `window_days` - Total window length in days
    ///
    /// # Returns
    /// The result buffer and the written paths, or the first error raised
    pub fn generate(&self, bounds: CornerBounds, target_date: NaiveDate, window_days: u32) -> SrResult<Generated> {
        let mut orchestrator = Orchestrator::new(&self.context).with_progress(self.show_progress);
        orchestrator.select_region(bounds);
        orchestrator.run(target_date, window_days)?;
        let state = orchestrator.take_state();

        let tile_url = match (self.context.tiles(), state.region) {
            (Some(tiles), Some(region)) => composite_tile_url_or_warn(tiles, &region.bbox(), target_date.year()),
            _ => None,
        };

        let saved = OutputWriter::new(&self.context.config().output).save(&state, tile_url)?;
        info!("Super-resolved image saved to {}", saved.image.display());

        Ok(Generated { state, saved })
    }
}
