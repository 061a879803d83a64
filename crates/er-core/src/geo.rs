//! Geographic coordinate type and great-circle distance.
//!
//! Unlike a city-scale simulation, dispatch decisions compare a handful of
//! candidates that may sit a few hundred metres apart, so coordinates are kept
//! in `f64` degrees.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS-84 geographic coordinate in decimal degrees.
///
/// No range validation is performed; any real-valued pair is accepted.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    ///
    /// Symmetric, and exactly `0.0` for identical points.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        // Absolute deltas keep the result bit-for-bit symmetric.
        let d_lat = (other.lat - self.lat).abs().to_radians();
        let d_lon = (other.lon - self.lon).abs().to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// Free-function form of [`GeoPoint::distance_km`].
#[inline]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    a.distance_km(b)
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}
