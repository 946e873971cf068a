//! Argument parsing shared by the subcommands

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::ArgMatches;
use log::debug;

use crate::acquisition::{parse_date, validate_target_date, validate_window, DEFAULT_WINDOW_DAYS};
use crate::config::Config;
use crate::coordinate::{parse_bounds, region_from_geojson, CornerBounds};
use crate::errors::{SrError, SrResult};

/// Target date used when `--date` is not given
pub const DEFAULT_TARGET_DATE: &str = "2023-07-01";

/// Load the configuration named by `--config`, or the default file
pub fn config_from(args: &ArgMatches) -> SrResult<Config> {
    let path = args.try_get_one::<String>("config").ok().flatten();
    let mut config = Config::load(path.map(Path::new))?;

    if let Some(dir) = args.try_get_one::<String>("output-dir").ok().flatten() {
        config.output.directory = dir.into();
    }
    Ok(config)
}

/// Region corners from `--bounds` or `--geojson`
pub fn bounds_from(args: &ArgMatches) -> SrResult<CornerBounds> {
    if let Some(bounds) = args.get_one::<String>("bounds") {
        debug!("Region from --bounds: {}", bounds);
        return parse_bounds(bounds);
    }

    if let Some(path) = args.get_one::<String>("geojson") {
        debug!("Region from GeoJSON file: {}", path);
        let text = fs::read_to_string(path)
            .map_err(|e| SrError::InvalidRegion(format!("cannot read {}: {}", path, e)))?;
        return Ok(region_from_geojson(&text)?.bounds());
    }

    Err(SrError::InvalidRegion("either --bounds or --geojson is required".to_string()))
}

/// Validated `--date`, defaulting to [`DEFAULT_TARGET_DATE`]
pub fn target_date_from(args: &ArgMatches) -> SrResult<NaiveDate> {
    let value = args.get_one::<String>("date").map(String::as_str).unwrap_or(DEFAULT_TARGET_DATE);
    validate_target_date(parse_date(value)?, Local::now().date_naive())
}

/// Validated `--window`, defaulting to [`DEFAULT_WINDOW_DAYS`]
pub fn window_from(args: &ArgMatches) -> SrResult<u32> {
    let window = match args.get_one::<String>("window") {
        Some(value) => value.trim().parse::<u32>()
            .map_err(|_| SrError::InvalidDateRange(format!("window '{}' is not a number of days", value)))?,
        None => DEFAULT_WINDOW_DAYS,
    };
    validate_window(window)
}
