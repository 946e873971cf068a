//! Map tile command
//!
//! Prints an XYZ tile template for the yearly median composite over a
//! region, for use as a basemap under results.

use chrono::Datelike;
use clap::ArgMatches;
use log::info;

use crate::acquisition::{MapTileProvider, PlanetaryComputerCatalog};
use crate::commands::args::{bounds_from, config_from, target_date_from};
use crate::commands::command_traits::Command;
use crate::config::Config;
use crate::coordinate::{CornerBounds, RegionOfInterest};
use crate::errors::SrResult;
use crate::utils::logger::Logger;

pub struct TilesCommand<'a> {
    config: Config,
    bounds: CornerBounds,
    year: i32,
    logger: &'a Logger,
}

impl<'a> TilesCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SrResult<Self> {
        Ok(TilesCommand {
            config: config_from(args)?,
            bounds: bounds_from(args)?,
            year: target_date_from(args)?.year(),
            logger,
        })
    }
}

impl<'a> Command for TilesCommand<'a> {
    fn execute(&self) -> SrResult<()> {
        let region = RegionOfInterest::from_bounds(self.bounds)?;
        let catalog = PlanetaryComputerCatalog::new(&self.config.catalog)?;

        // Unlike a generation run, failing to get tiles is this command's error
        let url = catalog.composite_tile_url(&region.bbox(), self.year)?;
        info!("Tile template for {}: {}", self.year, url);
        println!("{}", url);

        self.logger.write_line(&format!("Tiles for {}: {}", self.year, url))?;
        Ok(())
    }
}
