//! Sequential driver for one generation request
//!
//! Stages run strictly in order: validate, fetch, load, infer, encode. The
//! first failure moves the orchestrator to the error stage, records the
//! message and stops; later stages never see partial results.

use chrono::NaiveDate;
use log::{error, info};

use super::state::{PipelineStage, ResultState};
use crate::acquisition::{DateRange, FetchPolicy, ImageFetcher};
use crate::context::AppContext;
use crate::coordinate::{CornerBounds, GeometryValidator};
use crate::errors::{SrError, SrResult};
use crate::model::InferenceRunner;
use crate::raster::{encode_png, normalize};
use crate::utils::progress::StepProgress;

const TOTAL_STEPS: u32 = 3;

/// Drives the pipeline for a single session
pub struct Orchestrator<'a> {
    context: &'a AppContext,
    stage: PipelineStage,
    state: ResultState,
    show_progress: bool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(context: &'a AppContext) -> Self {
        Orchestrator {
            context,
            stage: PipelineStage::Idle,
            state: ResultState::default(),
            show_progress: false,
        }
    }

    /// Show spinners for the long-running steps
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn stage(&self) -> &PipelineStage {
        &self.stage
    }

    pub fn state(&self) -> &ResultState {
        &self.state
    }

    /// Take the results of the last run, leaving an empty buffer behind
    pub fn take_state(&mut self) -> ResultState {
        std::mem::take(&mut self.state)
    }

    /// Start over with a newly drawn region, discarding all earlier results
    pub fn select_region(&mut self, bounds: CornerBounds) {
        self.state.reset();
        self.state.bounds = Some(bounds);
        self.stage = PipelineStage::RegionSelected;
        info!("Region selected: {:?}", bounds);
    }

    /// Re-run on the current region, discarding earlier results
    pub fn regenerate(&mut self, target_date: NaiveDate, window_days: u32) -> SrResult<&ResultState> {
        let bounds = self.state.bounds
            .ok_or_else(|| SrError::InvalidRegion("no region has been selected".to_string()))?;
        self.select_region(bounds);
        self.run(target_date, window_days)
    }

    /// Run every stage for the selected region
    ///
    /// Requires a prior `select_region`. Any earlier results for the region
    /// are cleared first.
    pub fn run(&mut self, target_date: NaiveDate, window_days: u32) -> SrResult<&ResultState> {
        let bounds = match (&self.stage, self.state.bounds) {
            (PipelineStage::Idle, _) | (_, None) => {
                return Err(SrError::InvalidRegion("no region has been selected".to_string()));
            }
            (_, Some(bounds)) => bounds,
        };

        if self.stage != PipelineStage::RegionSelected {
            self.select_region(bounds);
        }

        match self.execute(bounds, target_date, window_days) {
            Ok(()) => {
                self.stage = PipelineStage::Done;
                info!("Super-Resolution Complete!");
                Ok(&self.state)
            }
            Err(e) => {
                error!("Pipeline stopped while {}: {}", self.stage, e);
                self.stage = PipelineStage::Error {
                    failed_at: Box::new(self.stage.clone()),
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    fn execute(&mut self, bounds: CornerBounds, target_date: NaiveDate, window_days: u32) -> SrResult<()> {
        let context = self.context;
        let config = context.config();

        // Admission: nothing below this line runs for a rejected region
        let admitted = GeometryValidator::new(config.admission.max_area_hectares).admit(&bounds)?;
        let dates = DateRange::around(target_date, window_days)?;
        self.state.region = Some(admitted.region);
        self.state.area_hectares = Some(admitted.area_hectares);
        self.state.target_date = Some(target_date);
        self.state.dates = Some(dates);
        self.stage = PipelineStage::Validated;
        info!("Searching for images between {} and {} ({} days)", dates.start(), dates.end(), dates.days());

        self.stage = PipelineStage::Fetching;
        let progress = self.step(1, "Fetching low-resolution satellite images...");
        let policy = FetchPolicy::from_config(&config.catalog, config.model.input_size);
        let outcome = ImageFetcher::new(context.catalog(), policy)
            .fetch_pair(&admitted.region, &dates);
        info!("{}", outcome.message);
        self.state.fetch_message = Some(outcome.message.clone());
        let pair = match outcome.pair {
            Some(pair) => pair,
            None => {
                progress.abandon(&outcome.message);
                return Err(SrError::Acquisition(outcome.message));
            }
        };
        progress.finish(&outcome.message);
        self.state.urls = Some(pair.clone());
        self.stage = PipelineStage::Fetched;

        self.stage = PipelineStage::Loading;
        let progress = self.step(2, "Running super-resolution model...");
        let images = context.images();
        let (first_url, second_url) = pair.urls();
        let loaded = images.load(first_url)
            .and_then(|first| images.load(second_url).map(|second| (first, second)));
        let (first, second) = match loaded {
            Ok((a, b)) => (normalize(&a), normalize(&b)),
            Err(e) => {
                progress.abandon(&e.to_string());
                return Err(e);
            }
        };

        self.stage = PipelineStage::Inferring;
        let runner = InferenceRunner::new(config.model.input_size as usize, config.model.shape_policy);
        let output = match runner.run(context.model(), &first, &second) {
            Ok(output) => output,
            Err(e) => {
                progress.abandon(&e.to_string());
                return Err(e);
            }
        };
        progress.finish("Super-resolution model finished");
        self.state.inputs = Some((first, second));

        self.stage = PipelineStage::Encoding;
        let progress = self.step(3, "Preparing final output...");
        let png = match encode_png(output.view()) {
            Ok(png) => png,
            Err(e) => {
                progress.abandon(&e.to_string());
                return Err(e);
            }
        };
        progress.finish("Final output ready");
        self.state.output = Some(output);
        self.state.png = Some(png);

        Ok(())
    }

    fn step(&self, step: u32, description: &str) -> StepProgress {
        info!("Step {}/{}: {}", step, TOTAL_STEPS, description);
        StepProgress::start(step, TOTAL_STEPS, description, self.show_progress)
    }
}
