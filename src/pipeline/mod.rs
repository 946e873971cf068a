//! Pipeline orchestration
//!
//! Runs the steps of a generation request in order and keeps the results of
//! the current session.

mod state;
mod orchestrator;
mod output;

pub use self::state::{PipelineStage, ResultState};
pub use self::orchestrator::Orchestrator;
pub use self::output::{output_file_name, OutputWriter, SavedOutput};
