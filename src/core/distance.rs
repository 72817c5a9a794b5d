use std::f64::consts::{FRAC_PI_2, PI};

use geo::GeodesicDistance;

use crate::models::{BoundingBox, GeoPoint};

/// Mean Earth radius in kilometers (IUGG)
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Slack added to every bounding box edge, in degrees (~0.1 m)
const BBOX_PAD_DEG: f64 = 1e-6;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers. Identical points give exactly `0.0`, antipodal
/// points give half the circumference. Non-finite input yields NaN.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    // Rounding can push `a` just past 1 near antipodes; asin would return NaN.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// WGS-84 ellipsoidal distance in kilometers (Karney's geodesic algorithm)
pub fn ellipsoidal_distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let from: geo::Point<f64> = from.into();
    let to: geo::Point<f64> = to.into();
    from.geodesic_distance(&to) / 1000.0
}

/// Calculate a bounding box around a center point
///
/// The box is conservative: every point whose great-circle distance from the
/// center is at most `radius_km` lies inside it. Boxes that reach a pole span
/// all longitudes; a radius of half the circumference or more covers the
/// whole sphere.
///
/// # Arguments
/// * `lat` - Center latitude in degrees
/// * `lon` - Center longitude in degrees
/// * `radius_km` - Radius in kilometers
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let angular = radius_km / EARTH_RADIUS_KM;

    if angular >= PI {
        return BoundingBox {
            min_lat: -90.0,
            max_lat: 90.0,
            min_lon: -180.0,
            max_lon: 180.0,
        };
    }

    let lat_rad = lat.to_radians();
    let min_lat_rad = lat_rad - angular;
    let max_lat_rad = lat_rad + angular;

    if min_lat_rad <= -FRAC_PI_2 || max_lat_rad >= FRAC_PI_2 {
        return BoundingBox {
            min_lat: (min_lat_rad.to_degrees() - BBOX_PAD_DEG).max(-90.0),
            max_lat: (max_lat_rad.to_degrees() + BBOX_PAD_DEG).min(90.0),
            min_lon: -180.0,
            max_lon: 180.0,
        };
    }

    // |lat| + angular < pi/2 here, so the asin argument stays below 1.
    let lon_delta = (angular.sin() / lat_rad.cos()).asin().to_degrees() + BBOX_PAD_DEG;

    BoundingBox {
        min_lat: min_lat_rad.to_degrees() - BBOX_PAD_DEG,
        max_lat: max_lat_rad.to_degrees() + BBOX_PAD_DEG,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}

/// Check if a point is within a bounding box
///
/// Longitude is compared as the wrapped offset from the box center, so boxes
/// crossing the antimeridian behave.
#[inline]
pub fn is_within_bounding_box(
    lat: f64,
    lon: f64,
    bbox: &BoundingBox,
) -> bool {
    if !(lat >= bbox.min_lat && lat <= bbox.max_lat) {
        return false;
    }

    let half_width = (bbox.max_lon - bbox.min_lon) / 2.0;
    if half_width >= 180.0 {
        return lon.is_finite();
    }

    let center = bbox.min_lon + half_width;
    wrap_longitude(lon - center).abs() <= half_width
}

/// Fold a longitude difference into [-180, 180]
#[inline]
fn wrap_longitude(delta: f64) -> f64 {
    let d = delta % 360.0;
    if d > 180.0 {
        d - 360.0
    } else if d < -180.0 {
        d + 360.0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Distance from London to Paris (approximately 344 km)
        let london_lat = 51.5074;
        let london_lon = -0.1278;
        let paris_lat = 48.8566;
        let paris_lon = 2.3522;

        let distance = haversine_distance(london_lat, london_lon, paris_lat, paris_lon);
        assert!((distance - 344.0).abs() < 10.0, "Distance should be ~344km, got {}", distance);
    }

    #[test]
    fn test_identical_points_are_exactly_zero() {
        for &(lat, lon) in &[(0.0, 0.0), (10.0, 20.0), (-89.9, 179.9), (90.0, -180.0)] {
            assert_eq!(haversine_distance(lat, lon, lat, lon), 0.0);
        }
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 180.0);
        assert!((distance - 20015.09).abs() < 1.0, "got {}", distance);

        let poles = haversine_distance(90.0, 0.0, -90.0, 0.0);
        assert!((poles - PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_near_antipodal_never_nan() {
        let mut lat = -60.0;
        while lat <= 60.0 {
            let distance = haversine_distance(lat, 37.123, -lat, 37.123 - 180.0);
            assert!(distance.is_finite(), "NaN at lat {}", lat);
            assert!(distance <= PI * EARTH_RADIUS_KM + 1e-9);
            lat += 0.37;
        }
    }

    #[test]
    fn test_reference_pair() {
        let distance = haversine_distance(10.0, 20.0, 10.1, 20.1);
        assert!((distance - 15.57).abs() < 0.05, "got {}", distance);
    }

    #[test]
    fn test_ellipsoidal_reference_pair() {
        let distance = ellipsoidal_distance_km(GeoPoint::new(10.0, 20.0), GeoPoint::new(10.1, 20.1));
        assert!((distance - 15.57).abs() < 0.01, "got {}", distance);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = calculate_bounding_box(40.7128, -74.0060, 10.0);

        assert!(bbox.min_lat < 40.7128);
        assert!(bbox.max_lat > 40.7128);
        assert!(bbox.min_lon < -74.0060);
        assert!(bbox.max_lon > -74.0060);

        // 20km / ~111.2km per degree
        let lat_span = bbox.max_lat - bbox.min_lat;
        assert!((lat_span - 0.18).abs() < 0.02, "Lat span should be ~0.18 degrees");
    }

    #[test]
    fn test_point_within_bbox() {
        let bbox = calculate_bounding_box(40.7128, -74.0060, 10.0);

        // Center point should be within
        assert!(is_within_bounding_box(40.7128, -74.0060, &bbox));

        // Close point should be within
        assert!(is_within_bounding_box(40.71, -74.0, &bbox));

        // Far point should not be within
        assert!(!is_within_bounding_box(50.0, -80.0, &bbox));
    }

    #[test]
    fn test_bbox_across_antimeridian() {
        let bbox = calculate_bounding_box(0.0, 179.95, 20.0);
        assert!(bbox.max_lon > 180.0);

        assert!(is_within_bounding_box(0.0, -179.95, &bbox));
        assert!(is_within_bounding_box(0.0, 179.9, &bbox));
        assert!(!is_within_bounding_box(0.0, -179.0, &bbox));
        assert!(!is_within_bounding_box(0.0, 0.0, &bbox));
    }

    #[test]
    fn test_bbox_reaching_pole_spans_all_longitudes() {
        let bbox = calculate_bounding_box(89.9, 10.0, 50.0);
        assert_eq!(bbox.max_lat, 90.0);
        assert!(is_within_bounding_box(89.95, -170.0, &bbox));
        assert!(!is_within_bounding_box(80.0, 10.0, &bbox));
    }

    #[test]
    fn test_bbox_whole_sphere() {
        let bbox = calculate_bounding_box(12.0, 34.0, 25_000.0);
        assert!(is_within_bounding_box(-90.0, -180.0, &bbox));
        assert!(is_within_bounding_box(-12.0, -146.0, &bbox));

        let unbounded = calculate_bounding_box(12.0, 34.0, f64::INFINITY);
        assert!(is_within_bounding_box(-12.0, -146.0, &unbounded));
    }

    #[test]
    fn test_bbox_rejects_nan_coordinates() {
        let bbox = calculate_bounding_box(0.0, 0.0, 100.0);
        assert!(!is_within_bounding_box(f64::NAN, 0.0, &bbox));
        assert!(!is_within_bounding_box(0.0, f64::NAN, &bbox));
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(0.0), 0.0);
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(360.0), 0.0);
    }
}
