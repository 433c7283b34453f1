//! Great-circle geometry on a spherical Earth

use nalgebra::Vector3;
use crate::core::{Fix, EARTH_MEAN_RADIUS_M};

/// Unit vector from the Earth's center through the given geodetic point
pub fn unit_vector(latitude: f64, longitude: f64) -> Vector3<f64> {
    let lat = latitude.to_radians();
    let lon = longitude.to_radians();
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Great-circle distance between two points in meters.
///
/// Uses the atan2 form of the central angle, which stays accurate for the
/// short distances that matter when comparing access point fixes.
pub fn great_circle_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let a = unit_vector(lat1, lon1);
    let b = unit_vector(lat2, lon2);
    let central_angle = a.cross(&b).norm().atan2(a.dot(&b));
    EARTH_MEAN_RADIUS_M * central_angle
}

/// Great-circle distance between two fixes in meters
pub fn distance_between(a: &Fix, b: &Fix) -> f64 {
    great_circle_distance(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Shift a point north by `meters`, used to lay out fixes at known spacings
pub fn offset_north(latitude: f64, meters: f64) -> f64 {
    latitude + (meters / EARTH_MEAN_RADIUS_M).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        assert_eq!(great_circle_distance(48.1372, 11.5756, 48.1372, 11.5756), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = great_circle_distance(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111_195.08).abs() < 1.0, "distance was {}", d);
    }

    #[test]
    fn test_symmetric() {
        let d1 = great_circle_distance(52.52, 13.405, 48.8566, 2.3522);
        let d2 = great_circle_distance(48.8566, 2.3522, 52.52, 13.405);
        assert!((d1 - d2).abs() < 1e-6);
        // Berlin to Paris is roughly 878 km
        assert!((d1 - 878_000.0).abs() < 5_000.0);
    }

    #[test]
    fn test_short_distances_stay_precise() {
        let lat2 = offset_north(52.0, 3.0);
        let d = great_circle_distance(52.0, 7.0, lat2, 7.0);
        assert!((d - 3.0).abs() < 1e-3, "distance was {}", d);
    }
}
