//! Imagery catalog interface
//!
//! The fetcher only needs a narrow slice of a catalog: filtered, sorted
//! search with a total count, and a way to turn a scene into a thumbnail
//! URL. Both the live client and test doubles implement [`ImageryCatalog`].

use chrono::{DateTime, Utc};

use super::date_range::DateRange;
use crate::coordinate::BoundingBox;
use crate::errors::SrResult;

/// Search filter for one catalog query
#[derive(Debug, Clone)]
pub struct SceneQuery {
    pub bbox: BoundingBox,
    pub dates: DateRange,
    /// Only scenes with cloud cover strictly below this percentage
    pub max_cloud_cover: f64,
    /// Maximum number of scenes returned in `SceneCollection::scenes`
    pub limit: usize,
}

/// Reference to one catalog scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRef {
    pub id: String,
    pub collection: String,
    pub cloud_cover: f64,
    pub acquired: Option<DateTime<Utc>>,
}

/// Scenes matching a query, clearest first
#[derive(Debug, Clone, Default)]
pub struct SceneCollection {
    /// Up to `limit` scenes sorted by ascending cloud cover
    pub scenes: Vec<SceneRef>,
    /// Total number of matching scenes in the catalog
    pub total: usize,
}

impl SceneCollection {
    /// Number of matching scenes
    pub fn count(&self) -> usize {
        self.total.max(self.scenes.len())
    }
}

/// Visualization of a scene as a small RGB preview
#[derive(Debug, Clone)]
pub struct ThumbnailSpec {
    /// Red, green and blue band names
    pub bands: Vec<String>,
    /// Value mapped to black
    pub min: f64,
    /// Value mapped to white
    pub max: f64,
    pub width: u32,
    pub height: u32,
    /// Output format extension, e.g. `png`
    pub format: String,
    /// Crop region
    pub region: BoundingBox,
}

/// Catalog operations used by the fetcher
pub trait ImageryCatalog {
    /// Find scenes matching the query, sorted by ascending cloud cover
    fn search(&self, query: &SceneQuery) -> SrResult<SceneCollection>;

    /// URL that renders the scene as a thumbnail
    fn thumbnail_url(&self, scene: &SceneRef, spec: &ThumbnailSpec) -> SrResult<String>;
}
