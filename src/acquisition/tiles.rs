//! Map tile templates for displaying results in context

use log::warn;

use crate::coordinate::BoundingBox;
use crate::errors::SrResult;

/// Source of XYZ tile templates for a yearly composite
pub trait MapTileProvider {
    /// Tile URL template (`{z}/{x}/{y}`) for a median composite over `bbox`
    /// during calendar year `year`
    fn composite_tile_url(&self, bbox: &BoundingBox, year: i32) -> SrResult<String>;
}

/// Look up a tile template, downgrading failure to a warning
///
/// Tiles are only used for display, so a failure here must never abort a run.
pub fn composite_tile_url_or_warn(provider: &dyn MapTileProvider, bbox: &BoundingBox, year: i32) -> Option<String> {
    match provider.composite_tile_url(bbox, year) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Could not get map tiles: {}", e);
            None
        }
    }
}
