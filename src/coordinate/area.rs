//! Approximate ground area of a lat/lon rectangle
//!
//! Uses an equirectangular approximation: one degree of latitude is taken as
//! a fixed distance and a degree of longitude shrinks with the cosine of the
//! mean latitude. Good enough to gate request size, not for measurement.

use super::bbox::CornerBounds;
use log::debug;

/// Kilometres per degree of latitude
pub const KM_PER_DEGREE: f64 = 111.32;

/// Hectares in one square kilometre
pub const HECTARES_PER_KM2: f64 = 100.0;

/// Area in hectares of the rectangle spanned by two `[lat, lon]` corners
///
/// Returns `None` when the input cannot be measured (non-finite values or
/// coordinates outside the WGS84 domain). A rectangle with zero extent along
/// either axis yields `Some(0.0)`.
pub fn area_hectares(bounds: &CornerBounds) -> Option<f64> {
    let [[lat1, lon1], [lat2, lon2]] = *bounds;

    let in_domain = |lat: f64, lon: f64| {
        lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon)
    };
    if !in_domain(lat1, lon1) || !in_domain(lat2, lon2) {
        debug!("Area requested for out-of-domain bounds {:?}", bounds);
        return None;
    }

    let lat_diff = (lat2 - lat1).abs();
    let lon_diff = (lon2 - lon1).abs();
    let avg_lat = (lat1 + lat2) / 2.0;

    let lat_km = lat_diff * KM_PER_DEGREE;
    // cos() can dip a hair below zero at the poles
    let lon_km = lon_diff * KM_PER_DEGREE * avg_lat.to_radians().cos().max(0.0);

    Some(lat_km * lon_km * HECTARES_PER_KM2)
}
