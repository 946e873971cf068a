//! Super-resolution generation command
//!
//! Loads the model, runs the full pipeline for one region and writes the
//! result image with its sidecars.

use chrono::NaiveDate;
use clap::ArgMatches;
use log::{debug, info};

use crate::api::SuperResolver;
use crate::commands::args::{bounds_from, config_from, target_date_from, window_from};
use crate::commands::command_traits::Command;
use crate::config::Config;
use crate::coordinate::CornerBounds;
use crate::errors::SrResult;
use crate::utils::logger::Logger;

/// Command that produces a super-resolved image for a region
pub struct GenerateCommand<'a> {
    config: Config,
    bounds: CornerBounds,
    target_date: NaiveDate,
    window_days: u32,
    /// Whether to draw step spinners
    progress: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> GenerateCommand<'a> {
    /// Create a new generate command
    ///
    /// Region, date and window are validated here so that bad input is
    /// reported before the model is loaded.
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SrResult<Self> {
        let config = config_from(args)?;
        let bounds = bounds_from(args)?;
        let target_date = target_date_from(args)?;
        let window_days = window_from(args)?;
        let progress = !args.get_flag("no-progress");

        debug!("generate: bounds={:?} date={} window={}", bounds, target_date, window_days);

        Ok(GenerateCommand { config, bounds, target_date, window_days, progress, logger })
    }
}

impl<'a> Command for GenerateCommand<'a> {
    fn execute(&self) -> SrResult<()> {
        info!("Generating super-resolved image for {} (±{} days)", self.target_date, self.window_days / 2);

        let resolver = SuperResolver::new(self.config.clone())?.with_progress(self.progress);
        let generated = resolver.generate(self.bounds, self.target_date, self.window_days)?;

        if let Some(pair) = &generated.state.urls {
            info!("Input 1: {} ({:.1}% cloud)", pair.first.scene.id, pair.first.scene.cloud_cover);
            info!("Input 2: {} ({:.1}% cloud)", pair.second.scene.id, pair.second.scene.cloud_cover);
        }
        info!("Output image: {}", generated.saved.image.display());
        if let Some(path) = &generated.saved.world_file {
            info!("World file: {}", path.display());
        }
        if let Some(path) = &generated.saved.manifest {
            info!("Overlay manifest: {}", path.display());
        }

        self.logger.write_line(&format!("Generated {}", generated.saved.image.display()))?;
        Ok(())
    }
}
