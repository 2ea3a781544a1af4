//! Longitude-based timezone estimate.
//!
//! This is a rough fallback for when no authoritative UTC offset is known:
//! one hour per 15° of longitude plus a crude seasonal daylight-saving guess.
//! It is not a timezone database and is wrong for many political zones
//! (e.g. China, India, most of the southern hemisphere that skips DST).

use chrono::{Datelike, NaiveDate};

/// Whether the hemisphere is likely observing daylight saving time in this month.
///
/// Northern hemisphere (lat > 0): April through October.
/// Southern hemisphere: September through March.
pub fn is_daylight_saving(date: NaiveDate, latitude: f64) -> bool {
    let month = date.month();
    if latitude > 0.0 {
        (4..=10).contains(&month)
    } else {
        month >= 9 || month <= 3
    }
}

/// Standard-time offset from longitude alone: `round(lng / 15)`.
pub fn longitude_offset(longitude: f64) -> f64 {
    (longitude / 15.0).round()
}

/// Estimates the wall-clock UTC offset in hours: `round(lng / 15)` plus one hour
/// during the hemisphere's assumed DST months.
pub fn estimate_timezone_offset(longitude: f64, date: NaiveDate, latitude: f64) -> f64 {
    let base = longitude_offset(longitude);
    if is_daylight_saving(date, latitude) {
        base + 1.0
    } else {
        base
    }
}
