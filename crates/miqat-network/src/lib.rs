//! Network features for miqat.
//!
//! Reverse geocoding of GPS coordinates into place labels, plus an optional
//! offline IP lookup against a MaxMind database (`local-geo` feature).

pub mod geo;

pub use geo::{
    reverse_geocode, reverse_geocode_or_fallback, reverse_geocode_with, LocationInfo, NOMINATIM_URL,
};

#[cfg(feature = "local-geo")]
pub use geo::LocalGeoProvider;
