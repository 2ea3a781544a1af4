//! Core of miqat: prayer times, monthly schedules and qibla direction.
//!
//! Re-exports the component crates and adds the coordinate-validating entry
//! points used by the bindings.

pub mod extension;
pub mod presets;

pub use miqat_astronomy as astronomy;
pub use miqat_calendar as calendar;
pub use miqat_schedule as schedule;
pub use miqat_types as types;

#[cfg(feature = "async")]
pub use miqat_network as network;

pub use extension::MiqatDateExt;
pub use miqat_astronomy::{distance_to_kaaba_km, estimate_timezone_offset, longitude_offset, KAABA};
pub use miqat_calendar::{days_in_month, to_hijri, HijriLabel};
pub use miqat_schedule::{
    daily, monthly, next_prayer, schedule_range, NextPrayer, ScheduleContext, ScheduleContextBuilder,
    TimezoneProvider, TimezoneSource,
};
pub use miqat_types::{
    AdjustmentSet, AsrModel, CalculationMethod, GeoCoordinate, HighLatitudeRule, IshaRule, Madhab, MethodParams,
    MiqatError, MonthlySchedule, Prayer, PrayerSchedule, QiblaBearing,
};

use chrono::NaiveDate;

fn fixed_context(
    latitude: f64,
    longitude: f64,
    timezone_offset: f64,
    method: CalculationMethod,
    adjustments: AdjustmentSet,
) -> Result<ScheduleContext, MiqatError> {
    let ctx = ScheduleContext::new()
        .location(GeoCoordinate::new(latitude, longitude)?)
        .method(method)
        .adjustments(adjustments)
        .fixed_timezone(timezone_offset);
    ctx.validate()?;
    Ok(ctx)
}

/// Prayer times for one date.
///
/// Prayers whose sun altitude is never reached come back as empty slots
/// rather than an error; see [`PrayerSchedule::hours`].
///
/// # Errors
/// `InvalidCoordinate` for out-of-range coordinates, `InvalidConfiguration`
/// for an offset outside ±14 h or an adjustment beyond ±720 min.
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use miqat_core::{compute_prayer_times, AdjustmentSet, CalculationMethod, Prayer};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let s = compute_prayer_times(date, -6.2088, 106.8456, 7.0, CalculationMethod::Kemenag, AdjustmentSet::default()).unwrap();
/// assert_eq!(s.time_string(Prayer::Fajr).unwrap(), "04:31");
/// ```
pub fn compute_prayer_times(
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
    timezone_offset: f64,
    method: CalculationMethod,
    adjustments: AdjustmentSet,
) -> Result<PrayerSchedule, MiqatError> {
    let ctx = fixed_context(latitude, longitude, timezone_offset, method, adjustments)?;
    Ok(daily(date, &ctx))
}

/// Prayer times for every day of a month with a fixed offset.
///
/// # Errors
/// As [`compute_prayer_times`], plus `InvalidDate` for a month outside 1..=12.
pub fn compute_monthly_schedule(
    year: i32,
    month: u32,
    latitude: f64,
    longitude: f64,
    timezone_offset: f64,
    method: CalculationMethod,
    adjustments: AdjustmentSet,
) -> Result<MonthlySchedule, MiqatError> {
    let ctx = fixed_context(latitude, longitude, timezone_offset, method, adjustments)?;
    monthly(year, month, &ctx)
}

/// Qibla bearing from a location, degrees clockwise from true north.
pub fn compute_qibla_bearing(latitude: f64, longitude: f64) -> Result<QiblaBearing, MiqatError> {
    let coords = GeoCoordinate::new(latitude, longitude)?;
    Ok(miqat_astronomy::qibla_bearing(coords))
}

/// Qibla direction relative to the device heading, for a compass pointer.
///
/// # Errors
/// `HeadingUnavailable` when no usable heading is given.
pub fn compute_qibla_pointer(latitude: f64, longitude: f64, heading: Option<f64>) -> Result<f64, MiqatError> {
    compute_qibla_bearing(latitude, longitude)?.relative_to(heading)
}

pub mod prelude {
    pub use crate::extension::MiqatDateExt;
    pub use crate::{
        compute_monthly_schedule, compute_prayer_times, compute_qibla_bearing, compute_qibla_pointer,
        estimate_timezone_offset,
    };
    pub use crate::{
        AdjustmentSet, CalculationMethod, GeoCoordinate, Madhab, MiqatError, Prayer, PrayerSchedule, QiblaBearing,
        ScheduleContext,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        let r = compute_prayer_times(date(2024, 1, 1), 91.0, 0.0, 0.0, CalculationMethod::default(), AdjustmentSet::default());
        assert!(matches!(r, Err(MiqatError::InvalidCoordinate { .. })));
        assert!(compute_qibla_bearing(0.0, 181.0).is_err());
        assert!(compute_qibla_bearing(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_invalid_offset_rejected() {
        let r = compute_prayer_times(date(2024, 1, 1), 0.0, 0.0, 20.0, CalculationMethod::default(), AdjustmentSet::default());
        assert!(matches!(r, Err(MiqatError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_monthly_invalid_month() {
        let r = compute_monthly_schedule(2024, 0, 0.0, 0.0, 0.0, CalculationMethod::default(), AdjustmentSet::default());
        assert!(matches!(r, Err(MiqatError::InvalidDate { year: 2024, month: 0 })));
    }

    #[test]
    fn test_qibla_pointer() {
        let bearing = compute_qibla_bearing(-6.2088, 106.8456).unwrap().degrees();
        let pointer = compute_qibla_pointer(-6.2088, 106.8456, Some(bearing)).unwrap();
        assert!(pointer.abs() < 1e-9);
        assert_eq!(compute_qibla_pointer(-6.2088, 106.8456, None), Err(MiqatError::HeadingUnavailable));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn coordinates_validated_not_clamped(lat in -200.0f64..200.0, lng in -400.0f64..400.0) {
                let valid = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng);
                let r = compute_prayer_times(date(2024, 6, 1), lat, lng, 0.0, CalculationMethod::default(), AdjustmentSet::default());
                prop_assert_eq!(r.is_ok(), valid);
                if !valid {
                    let is_coordinate_error = matches!(r, Err(MiqatError::InvalidCoordinate { .. }));
                    prop_assert!(is_coordinate_error);
                }
            }

            #[test]
            fn pointer_stays_in_range(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0, heading in -720.0f64..720.0) {
                let p = compute_qibla_pointer(lat, lng, Some(heading)).unwrap();
                prop_assert!((0.0..360.0).contains(&p), "pointer {}", p);
            }
        }
    }
}
