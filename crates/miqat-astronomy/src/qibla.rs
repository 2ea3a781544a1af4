//! Qibla direction: initial great-circle bearing toward the Kaaba.

use miqat_types::{GeoCoordinate, QiblaBearing};

use crate::math::{deg2rad, rad2deg};

/// Coordinates of the Kaaba in Mecca.
pub const KAABA: GeoCoordinate = GeoCoordinate::new_unchecked(21.4225, 39.8262);

/// Mean Earth radius used for distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Below this the bearing has no direction (observer at the Kaaba or its antipode).
const DEGENERATE_EPSILON: f64 = 1e-12;

/// Bearing in degrees from an arbitrary latitude/longitude pair.
///
/// Longitude is not range checked, so `lng` and `lng + 360` give the same bearing.
/// Returns 0 when the direction is undefined.
pub fn bearing_degrees(lat: f64, lng: f64) -> f64 {
    let phi = deg2rad(lat);
    let phi_k = deg2rad(KAABA.lat);
    let delta = deg2rad(KAABA.lng - lng);

    let y = delta.sin();
    let x = phi.cos() * phi_k.tan() - phi.sin() * delta.cos();

    if y.abs() < DEGENERATE_EPSILON && x.abs() < DEGENERATE_EPSILON {
        return 0.0;
    }
    QiblaBearing::new(rad2deg(y.atan2(x)) + 360.0).degrees()
}

/// Qibla bearing for a validated coordinate, clockwise from true north.
///
/// # Example
/// ```rust
/// use miqat_types::GeoCoordinate;
/// use miqat_astronomy::qibla::qibla_bearing;
///
/// let jakarta = GeoCoordinate::new(-6.2088, 106.8456).unwrap();
/// let bearing = qibla_bearing(jakarta);
/// assert!((290.0..300.0).contains(&bearing.degrees()));
/// ```
pub fn qibla_bearing(coords: GeoCoordinate) -> QiblaBearing {
    QiblaBearing::new(bearing_degrees(coords.lat, coords.lng))
}

/// Great-circle (haversine) distance to the Kaaba in kilometres.
pub fn distance_to_kaaba_km(coords: GeoCoordinate) -> f64 {
    let phi1 = deg2rad(coords.lat);
    let phi2 = deg2rad(KAABA.lat);
    let d_phi = phi2 - phi1;
    let d_lambda = deg2rad(KAABA.lng - coords.lng);

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}
