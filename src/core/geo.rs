use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A plain latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Linear interpolation toward `other` at progress `p` in [0, 1].
    ///
    /// Planar, not geodesic. Fine for the short segments a route is made of.
    pub fn lerp(&self, other: LatLng, p: f64) -> LatLng {
        LatLng {
            lat: self.lat + (other.lat - self.lat) * p,
            lng: self.lng + (other.lng - self.lng) * p,
        }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Great-circle distance between two points, in kilometers (haversine)
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Speed in km/h for covering the arc from `a` to `b` in `dt_seconds`,
/// rounded to the nearest whole km/h.
///
/// Returns 0 for `dt_seconds <= 0`, which covers duplicate and
/// out-of-order timestamps in the route.
pub fn speed_kmh(a: LatLng, b: LatLng, dt_seconds: f64) -> f64 {
    if dt_seconds <= 0.0 {
        return 0.0;
    }
    (haversine_km(a, b) / dt_seconds * 3600.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = LatLng::new(17.385044, 78.486671);
        let b = LatLng::new(17.389680, 78.492000);

        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_lerp_midpoint() {
        let a = LatLng::new(10.0, 20.0);
        let b = LatLng::new(12.0, 24.0);

        let mid = a.lerp(b, 0.5);
        assert!((mid.lat - 11.0).abs() < 1e-12);
        assert!((mid.lng - 22.0).abs() < 1e-12);
    }

    #[test]
    fn test_haversine_known_distance() {
        // One degree of latitude is ~111.19 km at this radius
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(1.0, 0.0);

        let km = haversine_km(a, b);
        assert!((km - 111.19).abs() < 0.1, "got {}", km);
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        let p = LatLng::new(17.385044, 78.486671);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_speed_zero_for_non_positive_dt() {
        let a = LatLng::new(17.385044, 78.486671);
        let b = LatLng::new(17.385045, 78.486672);

        assert_eq!(speed_kmh(a, b, 0.0), 0.0);
        assert_eq!(speed_kmh(a, b, -5.0), 0.0);
    }

    #[test]
    fn test_speed_is_rounded() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(1.0, 0.0);

        // ~111.19 km in one hour
        let v = speed_kmh(a, b, 3600.0);
        assert_eq!(v, v.round());
        assert!((v - 111.0).abs() <= 1.0, "got {}", v);
    }
}
