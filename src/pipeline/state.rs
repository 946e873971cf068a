//! Pipeline stages and the per-session result buffer

use std::fmt;

use chrono::NaiveDate;

use crate::acquisition::{DateRange, ScenePair};
use crate::coordinate::{CornerBounds, RegionOfInterest};
use crate::raster::FloatArray;

/// Where a pipeline run currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineStage {
    Idle,
    RegionSelected,
    Validated,
    Fetching,
    Fetched,
    Loading,
    Inferring,
    Encoding,
    Done,
    /// A step failed; nothing after it ran
    Error {
        failed_at: Box<PipelineStage>,
        message: String,
    },
}

impl PipelineStage {
    pub fn is_error(&self) -> bool {
        matches!(self, PipelineStage::Error { .. })
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Idle => write!(f, "idle"),
            PipelineStage::RegionSelected => write!(f, "region selected"),
            PipelineStage::Validated => write!(f, "validated"),
            PipelineStage::Fetching => write!(f, "fetching"),
            PipelineStage::Fetched => write!(f, "fetched"),
            PipelineStage::Loading => write!(f, "loading"),
            PipelineStage::Inferring => write!(f, "inferring"),
            PipelineStage::Encoding => write!(f, "encoding"),
            PipelineStage::Done => write!(f, "done"),
            PipelineStage::Error { failed_at, message } => write!(f, "error while {}: {}", failed_at, message),
        }
    }
}

/// Everything one run produces
///
/// Fields fill in as the run advances. `reset` clears all of them at once
/// so a new run never sees a previous run's data.
#[derive(Debug, Clone, Default)]
pub struct ResultState {
    pub bounds: Option<CornerBounds>,
    pub region: Option<RegionOfInterest>,
    pub area_hectares: Option<f64>,
    pub target_date: Option<NaiveDate>,
    pub dates: Option<DateRange>,
    pub urls: Option<ScenePair>,
    pub fetch_message: Option<String>,
    /// Normalized model inputs
    pub inputs: Option<(FloatArray, FloatArray)>,
    pub output: Option<FloatArray>,
    pub png: Option<Vec<u8>>,
}

impl ResultState {
    /// Clear every field
    pub fn reset(&mut self) {
        *self = ResultState::default();
    }

    /// Whether the run produced an encoded image
    pub fn is_complete(&self) -> bool {
        self.png.is_some()
    }
}
