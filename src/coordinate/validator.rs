//! Admission control for user-selected regions

use log::{info, warn};

use super::area::area_hectares;
use super::bbox::{CornerBounds, RegionOfInterest};
use crate::errors::{SrError, SrResult};

/// Default limit on region size
pub const DEFAULT_MAX_AREA_HECTARES: f64 = 10_000.0;

/// A region that passed admission, with its measured area
#[derive(Debug, Clone, Copy)]
pub struct AdmittedRegion {
    pub region: RegionOfInterest,
    pub area_hectares: f64,
}

/// Gate that rejects regions before any network work starts
#[derive(Debug, Clone, Copy)]
pub struct GeometryValidator {
    max_area_hectares: f64,
}

impl GeometryValidator {
    /// Create a validator with the given area limit
    pub fn new(max_area_hectares: f64) -> Self {
        GeometryValidator { max_area_hectares }
    }

    /// Check corner bounds and build the region
    ///
    /// An unmeasurable area is rejected just like an oversized one. Regions
    /// exactly at the limit are admitted.
    pub fn admit(&self, bounds: &CornerBounds) -> SrResult<AdmittedRegion> {
        let area = area_hectares(bounds).ok_or_else(|| {
            SrError::UnknownArea(format!("bounds {:?} are outside the WGS84 domain", bounds))
        })?;

        info!("ROI Area: {:.2} hectares", area);

        if area > self.max_area_hectares {
            warn!("Rejecting ROI of {:.2} ha (limit {:.0} ha)", area, self.max_area_hectares);
            return Err(SrError::RegionTooLarge { area, limit: self.max_area_hectares });
        }

        let region = RegionOfInterest::from_bounds(*bounds)?;
        Ok(AdmittedRegion { region, area_hectares: area })
    }
}

impl Default for GeometryValidator {
    fn default() -> Self {
        GeometryValidator::new(DEFAULT_MAX_AREA_HECTARES)
    }
}
