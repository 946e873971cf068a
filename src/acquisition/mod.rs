//! Satellite scene acquisition
//!
//! This module holds the catalog abstraction, the scene pair fetcher with
//! its cloud cover fallback, the date window type and the concrete
//! Planetary Computer client.

mod catalog;
mod date_range;
mod fetcher;
mod planetary;
mod tiles;
#[cfg(test)]
mod tests;

pub use self::catalog::{ImageryCatalog, SceneCollection, SceneQuery, SceneRef, ThumbnailSpec};
pub use self::date_range::{
    parse_date, validate_target_date, validate_window, DateRange, DEFAULT_WINDOW_DAYS,
    EARLIEST_TARGET_DATE, MAX_WINDOW_DAYS, MIN_WINDOW_DAYS,
};
pub use self::fetcher::{FetchOutcome, FetchPolicy, ImageFetcher, ScenePair, SceneThumbnail};
pub use self::planetary::PlanetaryComputerCatalog;
pub use self::tiles::{composite_tile_url_or_warn, MapTileProvider};
