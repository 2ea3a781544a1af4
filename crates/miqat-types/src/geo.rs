use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MiqatError;

/// Observer position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude, positive north. Range [-90, 90].
    pub lat: f64,
    /// Longitude, positive east. Range [-180, 180].
    pub lng: f64,
}

impl GeoCoordinate {
    /// Creates a validated coordinate.
    ///
    /// # Errors
    /// Returns `InvalidCoordinate` for NaN or out-of-range values. Values are never clamped.
    pub fn new(lat: f64, lng: f64) -> Result<Self, MiqatError> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lng_ok = lng.is_finite() && (-180.0..=180.0).contains(&lng);
        if lat_ok && lng_ok {
            Ok(Self { lat, lng })
        } else {
            Err(MiqatError::InvalidCoordinate { latitude: lat, longitude: lng })
        }
    }

    /// Creates a coordinate without range checks.
    pub const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_northern(&self) -> bool {
        self.lat > 0.0
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.lat, self.lng)
    }
}

/// Direction of the Kaaba in degrees clockwise from true north, in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct QiblaBearing(f64);

impl QiblaBearing {
    /// Wraps a bearing, normalizing it into [0, 360).
    pub fn new(degrees: f64) -> Self {
        let d = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        Self(if d >= 360.0 { 0.0 } else { d })
    }

    pub fn degrees(&self) -> f64 {
        self.0
    }

    /// Angle to show on a device pointing at `heading` (degrees clockwise from north).
    ///
    /// # Errors
    /// Returns `HeadingUnavailable` when the heading is missing, NaN or infinite.
    pub fn relative_to(&self, heading: Option<f64>) -> Result<f64, MiqatError> {
        match heading {
            Some(h) if h.is_finite() => Ok(Self::new(self.0 - h + 360.0).0),
            _ => Err(MiqatError::HeadingUnavailable),
        }
    }
}

impl fmt::Display for QiblaBearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}
