//! STAC catalog client for the Planetary Computer
//!
//! Scene search goes through the STAC API `/search` endpoint. Thumbnails and
//! map tiles are served by the data API (a titiler deployment), so rendering
//! a thumbnail only needs a URL to be built, not a request.

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use super::catalog::{ImageryCatalog, SceneCollection, SceneQuery, SceneRef, ThumbnailSpec};
use super::tiles::MapTileProvider;
use crate::config::CatalogConfig;
use crate::coordinate::BoundingBox;
use crate::errors::{SrError, SrResult};

/// Blocking client for a STAC API plus its tiler
///
/// Clones share the underlying HTTP connection pool.
#[derive(Clone)]
pub struct PlanetaryComputerCatalog {
    client: Client,
    stac_url: String,
    data_url: String,
    collection: String,
    bands: Vec<String>,
    scale: (f64, f64),
    tile_cloud_threshold: f64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    features: Vec<Feature>,
    #[serde(rename = "numberMatched")]
    number_matched: Option<usize>,
    context: Option<SearchContext>,
}

#[derive(Debug, Deserialize)]
struct SearchContext {
    matched: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    id: String,
    collection: Option<String>,
    #[serde(default)]
    properties: FeatureProperties,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureProperties {
    #[serde(rename = "eo:cloud_cover")]
    cloud_cover: Option<f64>,
    datetime: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    searchid: String,
}

impl PlanetaryComputerCatalog {
    /// Create a client from catalog settings
    pub fn new(config: &CatalogConfig) -> SrResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SrError::Acquisition(format!("cannot build HTTP client: {}", e)))?;

        Ok(PlanetaryComputerCatalog {
            client,
            stac_url: config.stac_url.trim_end_matches('/').to_string(),
            data_url: config.data_url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            bands: config.bands.clone(),
            scale: (config.scale_min, config.scale_max),
            tile_cloud_threshold: config.strict_cloud_threshold,
        })
    }

    /// Body of a STAC `/search` request
    fn search_body(&self, query: &SceneQuery) -> serde_json::Value {
        json!({
            "collections": [self.collection],
            "bbox": query.bbox.to_wsen(),
            "datetime": query.dates.to_interval(),
            "query": { "eo:cloud_cover": { "lt": query.max_cloud_cover } },
            "sortby": [{ "field": "properties.eo:cloud_cover", "direction": "asc" }],
            "limit": query.limit,
        })
    }

    fn post_json<T: for<'de> Deserialize<'de>>(&self, url: &str, body: &serde_json::Value) -> SrResult<T> {
        debug!("POST {} {}", url, body);
        let response = self.client.post(url)
            .json(body)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| SrError::Acquisition(format!("request to {} failed: {}", url, e)))?;

        response.json::<T>()
            .map_err(|e| SrError::Acquisition(format!("unexpected response from {}: {}", url, e)))
    }

    fn asset_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("collection", self.collection.clone())];
        for band in &self.bands {
            params.push(("assets", band.clone()));
        }
        params
    }
}

impl ImageryCatalog for PlanetaryComputerCatalog {
    fn search(&self, query: &SceneQuery) -> SrResult<SceneCollection> {
        let url = format!("{}/search", self.stac_url);
        let response: SearchResponse = self.post_json(&url, &self.search_body(query))?;

        let mut scenes: Vec<SceneRef> = response.features.into_iter()
            .map(|f| SceneRef {
                collection: f.collection.unwrap_or_else(|| self.collection.clone()),
                id: f.id,
                cloud_cover: f.properties.cloud_cover.unwrap_or(100.0),
                acquired: f.properties.datetime,
            })
            .collect();
        scenes.sort_by(|a, b| a.cloud_cover.total_cmp(&b.cloud_cover));

        let total = response.number_matched
            .or_else(|| response.context.and_then(|c| c.matched))
            .unwrap_or(scenes.len());

        info!("Catalog returned {} of {} scenes below {}% cloud cover",
              scenes.len(), total, query.max_cloud_cover);

        Ok(SceneCollection { scenes, total })
    }

    fn thumbnail_url(&self, scene: &SceneRef, spec: &ThumbnailSpec) -> SrResult<String> {
        let [west, south, east, north] = spec.region.to_wsen();
        let base = format!(
            "{}/item/crop/{},{},{},{}/{}x{}.{}",
            self.data_url, west, south, east, north, spec.width, spec.height, spec.format
        );

        let mut params = vec![
            ("collection", scene.collection.clone()),
            ("item", scene.id.clone()),
        ];
        for band in &spec.bands {
            params.push(("assets", band.clone()));
        }
        params.push(("rescale", format!("{},{}", spec.min, spec.max)));

        let url = Url::parse_with_params(&base, &params)
            .map_err(|e| SrError::Acquisition(format!("invalid thumbnail URL {}: {}", base, e)))?;
        Ok(url.to_string())
    }
}

impl MapTileProvider for PlanetaryComputerCatalog {
    fn composite_tile_url(&self, bbox: &BoundingBox, year: i32) -> SrResult<String> {
        let body = json!({
            "collections": [self.collection],
            "bbox": bbox.to_wsen(),
            "datetime": format!("{}-01-01T00:00:00Z/{}-12-31T23:59:59Z", year, year),
            "filter-lang": "cql2-json",
            "filter": {
                "op": "<",
                "args": [{ "property": "eo:cloud_cover" }, self.tile_cloud_threshold]
            },
        });
        let url = format!("{}/mosaic/register", self.data_url);
        let registered: RegisterResponse = self.post_json(&url, &body)?;

        let mut params = self.asset_params();
        params.push(("rescale", format!("{},{}", self.scale.0, self.scale.1)));
        params.push(("pixel_selection", "median".to_string()));

        // Encode the query on its own so the {z}/{x}/{y} placeholders stay literal
        let encoded = Url::parse_with_params("http://localhost/", &params)
            .map_err(|e| SrError::Acquisition(format!("cannot encode tile parameters: {}", e)))?;

        Ok(format!(
            "{}/mosaic/{}/tiles/WebMercatorQuad/{{z}}/{{x}}/{{y}}@1x?{}",
            self.data_url,
            registered.searchid,
            encoded.query().unwrap_or_default()
        ))
    }
}
