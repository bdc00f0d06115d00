//! Haversine great-circle distance

use serde::{Deserialize, Serialize};

/// Earth radius used by the haversine formula, in kilometres
pub const EARTH_RADIUS_KM: f64 = 6372.8;

/// A point on the globe, in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Great-circle distance between two coordinates in kilometres
///
/// Inputs are in degrees and converted to radians before use. The result is
/// rounded to two decimal places, so totals built from it are sums of rounded
/// legs.
///
/// # Example
///
/// ```
/// use parfold::metric::{distance, Coordinate};
///
/// let london = Coordinate::new(51.5074, -0.1278);
/// let paris = Coordinate::new(48.8566, 2.3522);
///
/// let d = distance(&london, &paris);
/// assert!((d - 343.56).abs() < 0.5);
/// assert_eq!(d, distance(&paris, &london));
/// ```
pub fn distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = b.lon.to_radians() - a.lon.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding error can push h a hair above 1 for antipodal points
    let km = 2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin();

    round_to_hundredths(km)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
