//! Coordinate handling for regions of interest
//!
//! This module provides the region types, the area approximation used for
//! admission control, and parsing of drawn geometry.

mod bbox;
mod point;
mod area;
mod validator;
mod geojson;
#[cfg(test)]
mod tests;

// Re-export key types
pub use self::bbox::{parse_bounds, BoundingBox, CornerBounds, RegionOfInterest};
pub use self::point::LatLon;
pub use self::area::{area_hectares, HECTARES_PER_KM2, KM_PER_DEGREE};
pub use self::validator::{AdmittedRegion, GeometryValidator, DEFAULT_MAX_AREA_HECTARES};
pub use self::geojson::region_from_geojson;
