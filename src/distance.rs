//! Great-circle distance on a sphere.
//!
//! The radius is a property of the metric value. A resolver holds exactly one
//! metric, so every distance it reports is measured on the same sphere.

use std::f64::consts::PI;

use crate::types::GeoPoint;

/// Sphere radius used unless configured otherwise, in kilometers.
///
/// This is the equatorial radius of the Earth.
pub const EARTH_RADIUS_KM: f64 = 6378.1;

/// A distance function between two points, in kilometers.
///
/// Implementations must be pure: symmetric, non-negative, and zero for
/// identical points.
pub trait DistanceMetric: Send + Sync {
    /// Distance between `a` and `b` in kilometers.
    fn distance_km(&self, a: &GeoPoint, b: &GeoPoint) -> f64;
}

/// Haversine great-circle distance on a sphere of fixed radius.
///
/// # Examples
///
/// ```
/// use nadir::{DistanceMetric, GeoPoint, Haversine};
///
/// let metric = Haversine::default();
/// let a = GeoPoint::new(0.0, 0.0).unwrap();
/// let b = GeoPoint::new(0.0, 180.0).unwrap();
///
/// // Antipodal points are half a great circle apart.
/// assert!((metric.distance_km(&a, &b) - metric.max_distance_km()).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Haversine {
    radius_km: f64,
}

impl Haversine {
    /// Creates a metric for a sphere of `radius_km`.
    pub const fn new(radius_km: f64) -> Self {
        Self { radius_km }
    }

    /// The sphere radius in kilometers.
    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Half the great circle, the largest distance this metric can return.
    pub fn max_distance_km(&self) -> f64 {
        PI * self.radius_km
    }
}

impl Default for Haversine {
    fn default() -> Self {
        Self::new(EARTH_RADIUS_KM)
    }
}

impl DistanceMetric for Haversine {
    fn distance_km(&self, a: &GeoPoint, b: &GeoPoint) -> f64 {
        let lat1 = a.latitude().to_radians();
        let lon1 = a.longitude().to_radians();
        let lat2 = b.latitude().to_radians();
        let lon2 = b.longitude().to_radians();

        let delta_lat = lat1 - lat2;
        let delta_lon = lon1 - lon2;

        // Rounding can push h a hair past 1 for antipodal points.
        let h = ((delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

        self.radius_km * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude).unwrap()
    }

    #[test]
    fn test_london_paris() {
        let london = point(51.5074, -0.1278);
        let paris = point(48.8566, 2.3522);
        let distance = Haversine::default().distance_km(&london, &paris);
        assert!((distance - 343.9).abs() < 1.0, "got {}", distance);
    }

    #[test]
    fn test_identity_is_exactly_zero() {
        let metric = Haversine::default();
        for p in [
            point(0.0, 0.0),
            point(51.5074, -0.1278),
            point(-89.9, 179.9),
            point(90.0, 0.0),
        ] {
            assert_eq!(metric.distance_km(&p, &p), 0.0);
        }
    }

    #[test]
    fn test_symmetric() {
        let metric = Haversine::default();
        let points = [
            point(37.9839, 23.7283),
            point(-33.8727635, 151.2053446),
            point(45.509062, -73.553363),
            point(0.0, 180.0),
            point(-90.0, 0.0),
        ];
        for a in &points {
            for b in &points {
                assert_eq!(metric.distance_km(a, b), metric.distance_km(b, a));
            }
        }
    }

    #[test]
    fn test_bounded_by_half_circumference() {
        let metric = Haversine::default();
        let pairs = [
            (point(0.0, 0.0), point(0.0, 180.0)),
            (point(90.0, 0.0), point(-90.0, 0.0)),
            (point(45.0, 10.0), point(-45.0, -170.0)),
            (point(12.3, 45.6), point(-12.3, -134.4)),
        ];
        for (a, b) in &pairs {
            let d = metric.distance_km(a, b);
            assert!(d.is_finite());
            assert!(d >= 0.0);
            assert!(d <= metric.max_distance_km());
            assert_relative_eq!(d, metric.max_distance_km(), max_relative = 1e-6);
        }
    }

    #[test]
    fn test_radius_scales_distance() {
        let a = point(10.0, 20.0);
        let b = point(-5.0, 60.0);
        let unit = Haversine::new(1.0).distance_km(&a, &b);
        let earth = Haversine::new(EARTH_RADIUS_KM).distance_km(&a, &b);
        assert_relative_eq!(earth, unit * EARTH_RADIUS_KM, max_relative = 1e-12);
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = Haversine::default().distance_km(&point(0.0, 0.0), &point(0.0, 1.0));
        assert_relative_eq!(d, EARTH_RADIUS_KM * PI / 180.0, max_relative = 1e-12);
    }
}
