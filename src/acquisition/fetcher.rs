//! Two-scene acquisition with a cloud cover fallback
//!
//! Searches first with a strict cloud cover limit and, if that leaves fewer
//! than two scenes, once more with a relaxed limit. The two clearest scenes
//! are rendered as thumbnails cropped to the region.

use chrono::Duration;
use log::{debug, info, warn};

use super::catalog::{ImageryCatalog, SceneCollection, SceneQuery, SceneRef, ThumbnailSpec};
use super::date_range::DateRange;
use crate::config::CatalogConfig;
use crate::coordinate::RegionOfInterest;
use crate::errors::SrResult;

/// Scene selection settings
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    pub strict_cloud_threshold: f64,
    pub relaxed_cloud_threshold: f64,
    pub search_limit: usize,
    pub min_separation_days: i64,
    pub bands: Vec<String>,
    pub scale_min: f64,
    pub scale_max: f64,
    /// Thumbnail side length in pixels
    pub thumbnail_size: u32,
}

impl FetchPolicy {
    /// Policy from catalog settings and the model's input size
    pub fn from_config(catalog: &CatalogConfig, thumbnail_size: u32) -> Self {
        FetchPolicy {
            strict_cloud_threshold: catalog.strict_cloud_threshold,
            relaxed_cloud_threshold: catalog.relaxed_cloud_threshold,
            search_limit: catalog.search_limit.max(2),
            min_separation_days: catalog.min_separation_days,
            bands: catalog.bands.clone(),
            scale_min: catalog.scale_min,
            scale_max: catalog.scale_max,
            thumbnail_size,
        }
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        FetchPolicy::from_config(&CatalogConfig::default(), 64)
    }
}

/// A selected scene and its rendered thumbnail URL
#[derive(Debug, Clone, PartialEq)]
pub struct SceneThumbnail {
    pub scene: SceneRef,
    pub url: String,
}

/// The two scenes fed to the model
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePair {
    pub first: SceneThumbnail,
    pub second: SceneThumbnail,
}

impl ScenePair {
    pub fn urls(&self) -> (&str, &str) {
        (&self.first.url, &self.second.url)
    }
}

/// Result of a fetch attempt
///
/// `pair` is `None` whenever the fetch failed; `message` is always suitable
/// for showing to the user.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub pair: Option<ScenePair>,
    pub message: String,
    /// Matching scenes at the threshold that was finally used
    pub found: usize,
}

impl FetchOutcome {
    fn failure(message: String, found: usize) -> Self {
        FetchOutcome { pair: None, message, found }
    }

    pub fn is_success(&self) -> bool {
        self.pair.is_some()
    }

    /// The outcome as `(url1, url2, message)`
    pub fn into_parts(self) -> (Option<String>, Option<String>, String) {
        match self.pair {
            Some(pair) => (Some(pair.first.url), Some(pair.second.url), self.message),
            None => (None, None, self.message),
        }
    }
}

/// Fetches the clearest scene pair for a region
pub struct ImageFetcher<'a> {
    catalog: &'a dyn ImageryCatalog,
    policy: FetchPolicy,
}

impl<'a> ImageFetcher<'a> {
    pub fn new(catalog: &'a dyn ImageryCatalog, policy: FetchPolicy) -> Self {
        ImageFetcher { catalog, policy }
    }

    /// Find and render the two clearest scenes
    ///
    /// Never returns an error: catalog failures are folded into a failed
    /// outcome carrying the cause in its message.
    pub fn fetch_pair(&self, region: &RegionOfInterest, dates: &DateRange) -> FetchOutcome {
        match self.try_fetch_pair(region, dates) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Scene fetch failed: {}", e);
                FetchOutcome::failure(format!("Error fetching satellite images: {}", e), 0)
            }
        }
    }

    fn try_fetch_pair(&self, region: &RegionOfInterest, dates: &DateRange) -> SrResult<FetchOutcome> {
        let mut collection = self.search(region, dates, self.policy.strict_cloud_threshold)?;

        if collection.count() < 2 {
            info!(
                "Only {} scenes below {}% cloud cover, retrying below {}%",
                collection.count(),
                self.policy.strict_cloud_threshold,
                self.policy.relaxed_cloud_threshold
            );
            collection = self.search(region, dates, self.policy.relaxed_cloud_threshold)?;
        }

        let count = collection.count();
        if count < 2 || collection.scenes.len() < 2 {
            return Ok(FetchOutcome::failure(
                format!(
                    "Could not find two images for the selected period. Found {} images. \
                     Please try a wider date range or different location.",
                    count
                ),
                count,
            ));
        }

        let (first, second) = self.select(&collection);
        let spec = self.thumbnail_spec(region);

        let pair = ScenePair {
            first: SceneThumbnail { url: self.catalog.thumbnail_url(first, &spec)?, scene: first.clone() },
            second: SceneThumbnail { url: self.catalog.thumbnail_url(second, &spec)?, scene: second.clone() },
        };

        info!("Selected scenes {} ({:.1}%) and {} ({:.1}%)",
              first.id, first.cloud_cover, second.id, second.cloud_cover);

        Ok(FetchOutcome {
            pair: Some(pair),
            message: format!("Successfully found {} images. Using the two clearest.", count),
            found: count,
        })
    }

    fn search(&self, region: &RegionOfInterest, dates: &DateRange, threshold: f64) -> SrResult<SceneCollection> {
        let query = SceneQuery {
            bbox: region.bbox(),
            dates: *dates,
            max_cloud_cover: threshold,
            limit: self.policy.search_limit,
        };
        debug!("Searching catalog: {:?}", query);
        self.catalog.search(&query)
    }

    /// Pick the clearest scene and a partner for it
    fn select<'c>(&self, collection: &'c SceneCollection) -> (&'c SceneRef, &'c SceneRef) {
        let first = &collection.scenes[0];
        let mut second = &collection.scenes[1];

        if self.policy.min_separation_days > 0 {
            let min_gap = Duration::days(self.policy.min_separation_days);
            let separated = collection.scenes[1..].iter()
                .find(|s| gap(first, s).map_or(false, |g| g >= min_gap));
            match separated {
                Some(scene) => second = scene,
                None => warn!(
                    "No scene at least {} days from {}; using the second clearest",
                    self.policy.min_separation_days, first.id
                ),
            }
        }

        if gap(first, second).map_or(false, |g| g < Duration::days(1)) {
            warn!("Selected scenes {} and {} were captured less than a day apart", first.id, second.id);
        }

        (first, second)
    }

    fn thumbnail_spec(&self, region: &RegionOfInterest) -> ThumbnailSpec {
        ThumbnailSpec {
            bands: self.policy.bands.clone(),
            min: self.policy.scale_min,
            max: self.policy.scale_max,
            width: self.policy.thumbnail_size,
            height: self.policy.thumbnail_size,
            format: "png".to_string(),
            region: region.bbox(),
        }
    }
}

fn gap(a: &SceneRef, b: &SceneRef) -> Option<Duration> {
    match (a.acquired, b.acquired) {
        (Some(x), Some(y)) => {
            let d = x - y;
            Some(if d < Duration::zero() { -d } else { d })
        }
        _ => None,
    }
}
