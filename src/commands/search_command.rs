//! Scene search command
//!
//! Runs the two-scene acquisition against the catalog and prints the
//! selected thumbnails. The model is not loaded.

use chrono::NaiveDate;
use clap::ArgMatches;
use log::info;

use crate::acquisition::{DateRange, FetchPolicy, ImageFetcher, PlanetaryComputerCatalog};
use crate::commands::args::{bounds_from, config_from, target_date_from, window_from};
use crate::commands::command_traits::Command;
use crate::config::Config;
use crate::coordinate::{CornerBounds, GeometryValidator};
use crate::errors::{SrError, SrResult};
use crate::utils::logger::Logger;

pub struct SearchCommand<'a> {
    config: Config,
    bounds: CornerBounds,
    target_date: NaiveDate,
    window_days: u32,
    logger: &'a Logger,
}

impl<'a> SearchCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SrResult<Self> {
        Ok(SearchCommand {
            config: config_from(args)?,
            bounds: bounds_from(args)?,
            target_date: target_date_from(args)?,
            window_days: window_from(args)?,
            logger,
        })
    }
}

impl<'a> Command for SearchCommand<'a> {
    fn execute(&self) -> SrResult<()> {
        let admitted = GeometryValidator::new(self.config.admission.max_area_hectares).admit(&self.bounds)?;
        let dates = DateRange::around(self.target_date, self.window_days)?;
        info!("Searching for images between {} and {}", dates.start(), dates.end());

        let catalog = PlanetaryComputerCatalog::new(&self.config.catalog)?;
        let policy = FetchPolicy::from_config(&self.config.catalog, self.config.model.input_size);
        let outcome = ImageFetcher::new(&catalog, policy).fetch_pair(&admitted.region, &dates);

        let pair = outcome.pair.ok_or_else(|| SrError::Acquisition(outcome.message.clone()))?;
        info!("{}", outcome.message);
        for (i, thumb) in [&pair.first, &pair.second].iter().enumerate() {
            let acquired = thumb.scene.acquired
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "unknown date".to_string());
            info!("Image {}: {} ({}, {:.1}% cloud)", i + 1, thumb.scene.id, acquired, thumb.scene.cloud_cover);
            info!("  {}", thumb.url);
        }

        self.logger.write_line(&format!("Search found {} scenes", outcome.found))?;
        Ok(())
    }
}
