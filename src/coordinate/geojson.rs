//! Reading drawn rectangles from GeoJSON
//!
//! Accepts a bare Polygon geometry, a Feature wrapping one, or a
//! FeatureCollection (the last polygon feature wins, matching how a map
//! drawing tool reports its most recent shape).

use serde_json::Value;

use super::bbox::RegionOfInterest;
use crate::errors::{SrError, SrResult};

/// Parse a region of interest from GeoJSON text
pub fn region_from_geojson(text: &str) -> SrResult<RegionOfInterest> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| SrError::InvalidRegion(format!("Invalid GeoJSON: {}", e)))?;

    let geometry = find_polygon(&value)
        .ok_or_else(|| SrError::InvalidRegion("GeoJSON contains no Polygon geometry".to_string()))?;

    let ring = outer_ring(geometry)?;
    RegionOfInterest::from_polygon_ring(&ring)
}

fn find_polygon(value: &Value) -> Option<&Value> {
    match value.get("type").and_then(Value::as_str) {
        Some("Polygon") => Some(value),
        Some("Feature") => value.get("geometry").and_then(find_polygon),
        Some("FeatureCollection") => value
            .get("features")
            .and_then(Value::as_array)?
            .iter()
            .rev()
            .find_map(find_polygon),
        _ => None,
    }
}

fn outer_ring(geometry: &Value) -> SrResult<Vec<[f64; 2]>> {
    let ring = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .and_then(|rings| rings.first())
        .and_then(Value::as_array)
        .ok_or_else(|| SrError::InvalidRegion("Polygon has no outer ring".to_string()))?;

    ring.iter()
        .map(|vertex| {
            let pair = vertex.as_array().filter(|p| p.len() >= 2);
            match pair.map(|p| (p[0].as_f64(), p[1].as_f64())) {
                Some((Some(lon), Some(lat))) => Ok([lon, lat]),
                _ => Err(SrError::InvalidRegion(format!("Invalid polygon vertex: {}", vertex))),
            }
        })
        .collect()
}
