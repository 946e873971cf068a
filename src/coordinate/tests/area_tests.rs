//! Tests for the area approximation and admission gate

use approx::assert_relative_eq;

use crate::coordinate::{area_hectares, GeometryValidator};
use crate::errors::SrError;

#[test]
fn test_area_of_small_equatorial_square() {
    // 0.01 degrees on each side at the equator is about 1.1132 km
    let area = area_hectares(&[[0.0, 0.0], [0.01, 0.01]]).unwrap();
    assert_relative_eq!(area, 1.1132 * 1.1132 * 100.0, max_relative = 1e-4);
}

#[test]
fn test_area_is_independent_of_corner_order() {
    let forward = area_hectares(&[[10.0, 77.0], [10.1, 77.1]]).unwrap();
    let reversed = area_hectares(&[[10.1, 77.1], [10.0, 77.0]]).unwrap();
    let crossed = area_hectares(&[[10.1, 77.0], [10.0, 77.1]]).unwrap();
    assert_relative_eq!(forward, reversed);
    assert_relative_eq!(forward, crossed);
}

#[test]
fn test_area_shrinks_with_latitude() {
    let equator = area_hectares(&[[0.0, 0.0], [0.05, 0.05]]).unwrap();
    let north = area_hectares(&[[60.0, 0.0], [60.05, 0.05]]).unwrap();
    // cos(60 deg) is one half
    assert_relative_eq!(north / equator, 0.5, max_relative = 1e-3);
}

#[test]
fn test_degenerate_rectangle_has_zero_area() {
    assert_eq!(area_hectares(&[[10.0, 77.0], [10.0, 77.1]]), Some(0.0));
    assert_eq!(area_hectares(&[[10.0, 77.0], [10.1, 77.0]]), Some(0.0));
}

#[test]
fn test_area_monotonic_in_each_axis() {
    let mut previous = 0.0;
    for step in 1..=20 {
        let d = step as f64 * 0.01;
        let area = area_hectares(&[[5.0, 30.0], [5.0 + d, 30.05]]).unwrap();
        assert!(area >= 0.0);
        assert!(area > previous, "lat extent {} did not grow the area", d);
        previous = area;
    }

    previous = 0.0;
    for step in 1..=20 {
        let d = step as f64 * 0.01;
        let area = area_hectares(&[[5.0, 30.0], [5.05, 30.0 + d]]).unwrap();
        assert!(area > previous, "lon extent {} did not grow the area", d);
        previous = area;
    }
}

#[test]
fn test_unmeasurable_bounds_are_unknown_not_zero() {
    assert_eq!(area_hectares(&[[f64::NAN, 0.0], [1.0, 1.0]]), None);
    assert_eq!(area_hectares(&[[0.0, 0.0], [95.0, 1.0]]), None);
    assert_eq!(area_hectares(&[[0.0, -181.0], [1.0, 1.0]]), None);
    assert_eq!(area_hectares(&[[0.0, 0.0], [1.0, f64::INFINITY]]), None);
}

#[test]
fn test_validator_rejects_oversized_region() {
    let validator = GeometryValidator::default();
    let result = validator.admit(&[[0.0, 0.0], [0.11003, 0.11003]]);
    match result {
        Err(SrError::RegionTooLarge { area, limit }) => {
            assert!(area >= 15_000.0);
            assert_relative_eq!(area, 15_000.0, max_relative = 1e-3);
            assert_eq!(limit, 10_000.0);
        }
        other => panic!("expected RegionTooLarge, got {:?}", other),
    }
}

#[test]
fn test_validator_admits_small_region() {
    let validator = GeometryValidator::default();
    let admitted = validator.admit(&[[10.0, 77.0], [10.05, 77.05]]).unwrap();
    assert!(admitted.area_hectares > 3000.0 && admitted.area_hectares < 3100.0);
    assert_eq!(admitted.region.bounds(), [[10.0, 77.0], [10.05, 77.05]]);
}

#[test]
fn test_validator_distinguishes_unknown_area() {
    let validator = GeometryValidator::new(1.0e9);
    let err = validator.admit(&[[f64::NAN, 0.0], [1.0, 1.0]]).unwrap_err();
    assert!(matches!(err, SrError::UnknownArea(_)));
    assert!(err.is_admission());
}

#[test]
fn test_validator_rejects_degenerate_region() {
    let validator = GeometryValidator::default();
    let err = validator.admit(&[[10.0, 77.0], [10.0, 77.05]]).unwrap_err();
    assert!(matches!(err, SrError::InvalidRegion(_)));
}
