//! Point structure for representing geographic coordinates

use crate::errors::{SrError, SrResult};

/// A geographic point in decimal degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    /// Latitude in degrees, positive north
    pub lat: f64,
    /// Longitude in degrees, positive east
    pub lon: f64,
}

impl LatLon {
    /// Create a new point without validation
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon { lat, lon }
    }

    /// Create a point from a `[lon, lat]` vertex as found in GeoJSON rings
    pub fn from_lon_lat(vertex: [f64; 2]) -> Self {
        LatLon { lat: vertex[1], lon: vertex[0] }
    }

    /// Whether both components are finite and inside the WGS84 domain
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Validate the point, returning it unchanged on success
    pub fn validated(self) -> SrResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(SrError::InvalidRegion(format!(
                "coordinate ({}, {}) is outside lat [-90, 90] / lon [-180, 180]",
                self.lat, self.lon
            )))
        }
    }
}
