//! Writing finished results to disk
//!
//! The PNG is always written as `super_resolved_<date>.png`. The world file
//! and overlay manifest share its stem.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::info;

use super::state::ResultState;
use crate::config::OutputConfig;
use crate::errors::{SrError, SrResult};
use crate::raster::{world_file, OverlayInput, OverlayManifest, PNG_MIME_TYPE};

/// Download file name for a result generated for `date`
pub fn output_file_name(date: NaiveDate) -> String {
    format!("super_resolved_{}.png", date.format("%Y-%m-%d"))
}

/// Paths of the files written for one result
#[derive(Debug, Clone)]
pub struct SavedOutput {
    pub image: PathBuf,
    pub world_file: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
}

/// Writes a completed result and its sidecars
pub struct OutputWriter<'a> {
    config: &'a OutputConfig,
}

impl<'a> OutputWriter<'a> {
    pub fn new(config: &'a OutputConfig) -> Self {
        OutputWriter { config }
    }

    /// Write the PNG and, if enabled, the world file and manifest
    pub fn save(&self, state: &ResultState, tile_url: Option<String>) -> SrResult<SavedOutput> {
        let incomplete = |what: &str| SrError::GenericError(format!("Cannot save result: {} missing", what));
        let png = state.png.as_ref().ok_or_else(|| incomplete("encoded image"))?;
        let output = state.output.as_ref().ok_or_else(|| incomplete("model output"))?;
        let region = state.region.ok_or_else(|| incomplete("region"))?;
        let date = state.target_date.ok_or_else(|| incomplete("target date"))?;

        fs::create_dir_all(&self.config.directory)?;
        let image = self.config.directory.join(output_file_name(date));
        fs::write(&image, png)?;
        info!("Wrote {} ({} bytes)", image.display(), png.len());

        let (height, width, _) = output.dim();

        let world = if self.config.write_world_file {
            let path = image.with_extension("pgw");
            fs::write(&path, world_file(&region.bbox(), width, height))?;
            Some(path)
        } else {
            None
        };

        let manifest = if self.config.write_manifest {
            let center = region.center();
            let inputs = state.urls.iter()
                .flat_map(|pair| [&pair.first, &pair.second])
                .map(|t| OverlayInput {
                    scene_id: t.scene.id.clone(),
                    cloud_cover: t.scene.cloud_cover,
                    acquired: t.scene.acquired.map(|d| d.to_rfc3339()),
                    url: t.url.clone(),
                })
                .collect();
            let overlay = OverlayManifest {
                image: file_name(&image),
                mime_type: PNG_MIME_TYPE.to_string(),
                target_date: date.format("%Y-%m-%d").to_string(),
                bounds: region.bounds(),
                center: [center.lat, center.lon],
                width,
                height,
                area_hectares: state.area_hectares.unwrap_or_default(),
                tile_url,
                inputs,
                message: state.fetch_message.clone().unwrap_or_default(),
            };
            let path = image.with_extension("json");
            let text = serde_json::to_string_pretty(&overlay)
                .map_err(|e| SrError::GenericError(format!("Cannot serialize manifest: {}", e)))?;
            fs::write(&path, text)?;
            Some(path)
        } else {
            None
        };

        Ok(SavedOutput { image, world_file: world, manifest })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
