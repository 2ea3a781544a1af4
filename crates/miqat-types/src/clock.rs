//! Float-hour clock helpers shared by the calculators and schedules.

use chrono::NaiveTime;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Added before flooring so that float noise such as 4.9999999 minutes counts as 5.
///
/// A time within 1e-6 minutes (60 µs) below a minute boundary therefore rounds up
/// to that boundary. Accumulated error in `hours * 60` is around 1e-12 minutes, so
/// the margin is far above noise and far below anything the solar model resolves.
const MINUTE_EPSILON: f64 = 1e-6;

/// Range reduce hours to [0, 24).
pub fn fix_hour(hours: f64) -> f64 {
    let h = hours.rem_euclid(24.0);
    if h >= 24.0 { 0.0 } else { h }
}

/// Whole minutes since local midnight, truncated (not rounded) and wrapped into one day.
pub fn minutes_of_day(hours: f64) -> u32 {
    let total = (hours * 60.0 + MINUTE_EPSILON).floor() as i64;
    total.rem_euclid(MINUTES_PER_DAY) as u32
}

/// Formats float hours as zero-padded `HH:MM` using floor-minute truncation.
pub fn format_hhmm(hours: f64) -> String {
    let m = minutes_of_day(hours);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Converts float hours to a wall-clock time (minute precision).
pub fn to_naive_time(hours: f64) -> Option<NaiveTime> {
    let m = minutes_of_day(hours);
    NaiveTime::from_hms_opt(m / 60, m % 60, 0)
}

/// Formats a countdown such as `"2h 5m"`.
pub fn format_countdown(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
