//! Bounding box and region-of-interest structures

use super::point::LatLon;
use crate::errors::{SrError, SrResult};

/// Corner pair in `[[lat, lon], [lat, lon]]` order
pub type CornerBounds = [[f64; 2]; 2];

/// An axis-aligned geographic bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern edge
    pub min_lat: f64,
    /// Western edge
    pub min_lon: f64,
    /// Northern edge
    pub max_lat: f64,
    /// Eastern edge
    pub max_lon: f64,
}

impl BoundingBox {
    /// Build the box spanned by two opposite corners, in any order
    pub fn from_corners(a: LatLon, b: LatLon) -> Self {
        BoundingBox {
            min_lat: a.lat.min(b.lat),
            min_lon: a.lon.min(b.lon),
            max_lat: a.lat.max(b.lat),
            max_lon: a.lon.max(b.lon),
        }
    }

    /// Extent in degrees of longitude
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Extent in degrees of latitude
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Centre point of the box
    pub fn center(&self) -> LatLon {
        LatLon::new(
            self.min_lat + self.height() / 2.0,
            self.min_lon + self.width() / 2.0,
        )
    }

    /// `[west, south, east, north]`, the STAC / GeoJSON bbox order
    pub fn to_wsen(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

/// A user-selected rectangular region
///
/// The two corners are kept in the order they were given so that the
/// `bounds()` output matches what the user drew. Construction rejects
/// coordinates outside the WGS84 domain and rectangles with zero extent
/// along either axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionOfInterest {
    corners: [LatLon; 2],
}

impl RegionOfInterest {
    /// Create a region from two opposite corners
    pub fn new(first: LatLon, second: LatLon) -> SrResult<Self> {
        let first = first.validated()?;
        let second = second.validated()?;

        if first.lat == second.lat || first.lon == second.lon {
            return Err(SrError::InvalidRegion(format!(
                "corners ({}, {}) and ({}, {}) do not span a rectangle",
                first.lat, first.lon, second.lat, second.lon
            )));
        }

        Ok(RegionOfInterest { corners: [first, second] })
    }

    /// Create a region from `[[lat, lon], [lat, lon]]` bounds
    pub fn from_bounds(bounds: CornerBounds) -> SrResult<Self> {
        Self::new(
            LatLon::new(bounds[0][0], bounds[0][1]),
            LatLon::new(bounds[1][0], bounds[1][1]),
        )
    }

    /// Create a region from a drawn rectangle's polygon ring
    ///
    /// The ring is in `(lon, lat)` vertex order. A rectangle drawn on the map
    /// has its opposite corners at vertices 0 and 2.
    pub fn from_polygon_ring(ring: &[[f64; 2]]) -> SrResult<Self> {
        if ring.len() < 4 {
            return Err(SrError::InvalidRegion(format!(
                "rectangle ring needs at least 4 vertices, got {}",
                ring.len()
            )));
        }

        Self::new(LatLon::from_lon_lat(ring[0]), LatLon::from_lon_lat(ring[2]))
    }

    /// Parse a region from a string (format: "lat1,lon1,lat2,lon2")
    pub fn from_string(bounds_str: &str) -> SrResult<Self> {
        Self::from_bounds(parse_bounds(bounds_str)?)
    }

    /// Corner bounds in `[[lat, lon], [lat, lon]]` order
    pub fn bounds(&self) -> CornerBounds {
        [
            [self.corners[0].lat, self.corners[0].lon],
            [self.corners[1].lat, self.corners[1].lon],
        ]
    }

    /// Normalized bounding box
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::from_corners(self.corners[0], self.corners[1])
    }

    /// Centre of the region
    pub fn center(&self) -> LatLon {
        self.bbox().center()
    }
}

/// Parse "lat1,lon1,lat2,lon2" into corner bounds without validating them
pub fn parse_bounds(bounds_str: &str) -> SrResult<CornerBounds> {
    let parts: Vec<&str> = bounds_str.split(',').collect();
    if parts.len() != 4 {
        return Err(SrError::InvalidRegion(
            "Bounds must have 4 comma-separated values: lat1,lon1,lat2,lon2".to_string(),
        ));
    }

    let mut values = [0.0f64; 4];
    for (slot, part) in values.iter_mut().zip(parts.iter()) {
        *slot = part.trim().parse::<f64>()
            .map_err(|_| SrError::InvalidRegion(format!("Invalid coordinate value '{}'", part.trim())))?;
    }

    Ok([[values[0], values[1]], [values[2], values[3]]])
}
