//! Georeferencing sidecars for result images
//!
//! A world file places the PNG on the map in EPSG:4326; the overlay manifest
//! carries what a viewer needs to draw the result over a basemap.

use serde::Serialize;

use crate::coordinate::{BoundingBox, CornerBounds};

/// Six-line ESRI world file content for an image covering `bbox`
pub fn world_file(bbox: &BoundingBox, width: usize, height: usize) -> String {
    let pixel_x = bbox.width() / width.max(1) as f64;
    let pixel_y = bbox.height() / height.max(1) as f64;

    // Coordinates refer to the centre of the upper-left pixel
    format!(
        "{:.12}\n0.0\n0.0\n{:.12}\n{:.12}\n{:.12}\n",
        pixel_x,
        -pixel_y,
        bbox.min_lon + pixel_x / 2.0,
        bbox.max_lat - pixel_y / 2.0
    )
}

/// Everything needed to display a result over a map
#[derive(Debug, Clone, Serialize)]
pub struct OverlayManifest {
    pub image: String,
    pub mime_type: String,
    pub target_date: String,
    /// Corners in `[[lat, lon], [lat, lon]]` order
    pub bounds: CornerBounds,
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub width: usize,
    pub height: usize,
    pub area_hectares: f64,
    /// XYZ template for a basemap composite, when one could be obtained
    pub tile_url: Option<String>,
    pub inputs: Vec<OverlayInput>,
    pub message: String,
}

/// One low-resolution input
#[derive(Debug, Clone, Serialize)]
pub struct OverlayInput {
    pub scene_id: String,
    pub cloud_cover: f64,
    pub acquired: Option<String>,
    pub url: String,
}
