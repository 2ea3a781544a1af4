//! Astronomical core of miqat: solar position, prayer times, qibla bearing
//! and the longitude timezone estimate.
//!
//! All functions are pure; nothing here performs I/O or keeps state.

pub mod math;
pub mod prayer;
pub mod qibla;
pub mod solar;
pub mod timezone;

pub use prayer::{calculate_prayer_times, PrayerParams};
pub use qibla::{bearing_degrees, distance_to_kaaba_km, qibla_bearing, KAABA};
pub use solar::SolarPosition;
pub use timezone::{estimate_timezone_offset, is_daylight_saving, longitude_offset};
