//! Region area command
//!
//! Reports the area of a region and whether it would be admitted, without
//! touching the network or the model.

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::args::{bounds_from, config_from};
use crate::commands::command_traits::Command;
use crate::coordinate::{area_hectares, CornerBounds, GeometryValidator};
use crate::errors::{SrError, SrResult};
use crate::utils::logger::Logger;

pub struct AreaCommand<'a> {
    bounds: CornerBounds,
    max_area_hectares: f64,
    logger: &'a Logger,
}

impl<'a> AreaCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SrResult<Self> {
        let config = config_from(args)?;
        let bounds = bounds_from(args)?;
        Ok(AreaCommand { bounds, max_area_hectares: config.admission.max_area_hectares, logger })
    }
}

impl<'a> Command for AreaCommand<'a> {
    fn execute(&self) -> SrResult<()> {
        let area = area_hectares(&self.bounds)
            .ok_or_else(|| SrError::UnknownArea(format!("bounds {:?} are outside the valid domain", self.bounds)))?;
        info!("Bounds: {:?}", self.bounds);
        info!("Area: {:.2} hectares", area);

        match GeometryValidator::new(self.max_area_hectares).admit(&self.bounds) {
            Ok(_) => info!("Region is within the {:.0} hectare limit", self.max_area_hectares),
            Err(e) => warn!("Region would be rejected: {}", e),
        }

        self.logger.write_line(&format!("Area of {:?}: {:.2} ha", self.bounds, area))?;
        Ok(())
    }
}
