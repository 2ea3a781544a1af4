//! Degree-based trigonometry and angle range reduction.

/// Degrees to radians.
pub fn deg2rad(d: f64) -> f64 {
    d.to_radians()
}

/// Radians to degrees.
pub fn rad2deg(r: f64) -> f64 {
    r.to_degrees()
}

/* degree sin */
pub fn dsin(d: f64) -> f64 {
    deg2rad(d).sin()
}

/* degree cos */
pub fn dcos(d: f64) -> f64 {
    deg2rad(d).cos()
}

/// Range reduce an angle in degrees to [0, 360).
pub fn fix_angle(a: f64) -> f64 {
    let a = a.rem_euclid(360.0);
    if a >= 360.0 { 0.0 } else { a }
}

/// Arccos that reports a domain failure instead of returning NaN.
pub fn checked_acos(x: f64) -> Option<f64> {
    if x.is_finite() && (-1.0..=1.0).contains(&x) {
        Some(x.acos())
    } else {
        None
    }
}

/// Hour angle (hours) at which the sun sits at `altitude` radians, for latitude `lat`
/// and declination `decl` (both radians).
///
/// Returns `None` when the sun never reaches that altitude on this day.
pub fn hour_angle(altitude: f64, lat: f64, decl: f64) -> Option<f64> {
    let denom = lat.cos() * decl.cos();
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let cos_h = (altitude.sin() - lat.sin() * decl.sin()) / denom;
    checked_acos(cos_h).map(|h| rad2deg(h) / 15.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_angle() {
        assert_eq!(fix_angle(-30.0), 330.0);
        assert_eq!(fix_angle(725.0), 5.0);
        assert_eq!(fix_angle(360.0), 0.0);
    }

    #[test]
    fn test_checked_acos_domain() {
        assert!(checked_acos(1.0000001).is_none());
        assert!(checked_acos(f64::NAN).is_none());
        assert_eq!(checked_acos(1.0), Some(0.0));
    }

    #[test]
    fn test_equinox_equator_day_is_twelve_hours() {
        let h = hour_angle(0.0, 0.0, 0.0).unwrap();
        assert!((h - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_polar_night_has_no_sunrise() {
        // 80°N at winter solstice
        assert!(hour_angle(0.0, deg2rad(80.0), deg2rad(-23.44)).is_none());
    }
}
