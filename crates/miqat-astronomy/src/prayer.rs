//! Prayer Times Calculation Module.
//!
//! Computes Fajr, Sunrise, Dhuhr, Asr, Maghrib and Isha from the day-of-year
//! solar model. Every time is an hour angle around local solar noon:
//!
//! ```text
//! noon = 12 + tz - lng/15 - EoT/60
//! H(h) = acos((sin h - sin φ·sin δ) / (cos φ·cos δ))   (in hours)
//! ```
//!
//! When the arccos argument leaves [-1, 1] the sun never reaches that altitude
//! and the prayer is left undefined for the day instead of producing NaN.
//!
//! Asr uses the shadow angle `A = atan(1 / (factor + tan|φ − δ|))`, by default
//! applied directly as an hour angle: `Asr = noon + A·12/π`.

use chrono::NaiveDate;
use log::{debug, warn};
use miqat_types::clock::fix_hour;
use miqat_types::{
    AdjustmentSet, AsrModel, CalculationMethod, GeoCoordinate, HighLatitudeRule, IshaRule, Madhab, Prayer,
    PrayerSchedule,
};

use std::f64::consts::{FRAC_PI_2, PI};

use crate::math::{deg2rad, hour_angle, rad2deg};
use crate::solar::SolarPosition;

/// Everything besides date and location that shapes a day's times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrayerParams {
    pub method: CalculationMethod,
    /// Hours east of UTC for the observer's wall clock on this date.
    pub timezone_offset: f64,
    pub adjustments: AdjustmentSet,
    /// Selects the Asr shadow factor.
    pub madhab: Madhab,
    pub asr_model: AsrModel,
    pub high_latitude_rule: HighLatitudeRule,
}

impl Default for PrayerParams {
    fn default() -> Self {
        Self {
            method: CalculationMethod::default(),
            timezone_offset: 0.0,
            adjustments: AdjustmentSet::default(),
            madhab: Madhab::default(),
            asr_model: AsrModel::default(),
            high_latitude_rule: HighLatitudeRule::default(),
        }
    }
}

impl PrayerParams {
    pub fn new(method: CalculationMethod, timezone_offset: f64) -> Self {
        Self { method, timezone_offset, ..Default::default() }
    }

    pub fn adjustments(mut self, adjustments: AdjustmentSet) -> Self {
        self.adjustments = adjustments;
        self
    }

    pub fn madhab(mut self, madhab: Madhab) -> Self {
        self.madhab = madhab;
        self
    }

    pub fn asr_model(mut self, model: AsrModel) -> Self {
        self.asr_model = model;
        self
    }

    pub fn high_latitude_rule(mut self, rule: HighLatitudeRule) -> Self {
        self.high_latitude_rule = rule;
        self
    }
}

/// Times before minute adjustments, in float hours of local time.
#[derive(Debug, Clone, Copy)]
struct RawTimes {
    fajr: Option<f64>,
    sunrise: Option<f64>,
    dhuhr: f64,
    asr: Option<f64>,
    sunset: Option<f64>,
    isha: Option<f64>,
}

/// Calculates the six prayer times for a given date and location.
///
/// # Arguments
/// * `date` - The local calendar date
/// * `coords` - Geographic coordinates (latitude, longitude)
/// * `params` - Method, timezone offset, adjustments and Asr school
///
/// # Returns
/// A `PrayerSchedule` whose slots are empty for prayers that have no valid
/// time on this date (polar day or night, or twilight that never ends).
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use miqat_types::{CalculationMethod, GeoCoordinate, Prayer};
/// use miqat_astronomy::prayer::{calculate_prayer_times, PrayerParams};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let jakarta = GeoCoordinate::new(-6.2088, 106.8456).unwrap();
/// let params = PrayerParams::new(CalculationMethod::Kemenag, 7.0);
///
/// let times = calculate_prayer_times(date, jakarta, &params);
/// println!("Fajr: {}", times.time_string(Prayer::Fajr).unwrap());
/// ```
pub fn calculate_prayer_times(
    date: NaiveDate,
    coords: GeoCoordinate,
    params: &PrayerParams,
) -> PrayerSchedule {
    let sun = SolarPosition::for_date(date);
    let mut raw = compute_raw_times(coords, &sun, params);

    if params.high_latitude_rule != HighLatitudeRule::None {
        adjust_high_latitudes(&mut raw, params);
    }

    let adj = &params.adjustments;
    let shift = |t: Option<f64>, p: Prayer| t.map(|h| h + adj.hours(p));

    let fajr = shift(raw.fajr, Prayer::Fajr);
    let sunrise = shift(raw.sunrise, Prayer::Sunrise);
    let dhuhr = raw.dhuhr + adj.hours(Prayer::Dhuhr);
    let asr = shift(raw.asr, Prayer::Asr);
    let maghrib = shift(raw.sunset, Prayer::Maghrib);
    let isha = match params.method.params().isha {
        IshaRule::Angle(_) => shift(raw.isha, Prayer::Isha),
        // Fixed interval counts from the adjusted Maghrib.
        IshaRule::MinutesAfterMaghrib(minutes) => {
            maghrib.map(|m| m + minutes / 60.0 + adj.hours(Prayer::Isha))
        }
    };

    let times = [fajr, sunrise, Some(dhuhr), asr, maghrib, isha];
    for (prayer, t) in Prayer::ALL.iter().zip(times.iter()) {
        if t.is_none() {
            debug!("{} undefined on {} at latitude {:.4}", prayer, date, coords.lat);
        }
    }

    PrayerSchedule::new(date, times)
}

fn compute_raw_times(coords: GeoCoordinate, sun: &SolarPosition, params: &PrayerParams) -> RawTimes {
    let lat = deg2rad(coords.lat);
    let decl = sun.declination;
    let method = params.method.params();

    let noon = 12.0 + params.timezone_offset - coords.lng / 15.0 - sun.equation_of_time / 60.0;
    let at_altitude = |degrees: f64| hour_angle(deg2rad(degrees), lat, decl);

    let horizon = at_altitude(0.0);
    let fajr = at_altitude(-method.fajr_angle).map(|h| noon - h);
    let shadow = shadow_angle(lat, decl, params.madhab.asr_shadow_factor());
    let asr = match params.asr_model {
        AsrModel::ShadowAngle => Some(noon + shadow * 12.0 / PI),
        AsrModel::SunAltitude => asr_altitude(lat, decl, shadow).and_then(at_altitude).map(|h| noon + h),
    };
    let isha = match method.isha {
        IshaRule::Angle(angle) => at_altitude(-angle).map(|h| noon + h),
        IshaRule::MinutesAfterMaghrib(_) => None,
    };

    RawTimes {
        fajr,
        sunrise: horizon.map(|h| noon - h),
        dhuhr: noon,
        asr,
        sunset: horizon.map(|h| noon + h),
        isha,
    }
}

/// `atan(1 / (factor + tan|φ − δ|))` in radians.
fn shadow_angle(lat: f64, decl: f64, factor: f64) -> f64 {
    (1.0 / (factor + (lat - decl).abs().tan())).atan()
}

/// The shadow angle read as a sun altitude in degrees. `None` when the sun
/// stays below the horizon at noon.
fn asr_altitude(lat: f64, decl: f64, shadow: f64) -> Option<f64> {
    if (lat - decl).abs() >= FRAC_PI_2 {
        return None;
    }
    Some(rad2deg(shadow))
}

/// Bounds Fajr and Isha by a portion of the night for locations in higher latitudes.
fn adjust_high_latitudes(raw: &mut RawTimes, params: &PrayerParams) {
    let (Some(sunrise), Some(sunset)) = (raw.sunrise, raw.sunset) else {
        warn!("High latitude rule skipped: no sunrise or sunset on this date");
        return;
    };
    let night = fix_hour(sunrise - sunset);
    let method = params.method.params();
    let portion = |angle: f64| match params.high_latitude_rule {
        HighLatitudeRule::AngleBased => angle / 60.0,
        HighLatitudeRule::MiddleOfNight => 1.0 / 2.0,
        HighLatitudeRule::OneSeventh => 1.0 / 7.0,
        HighLatitudeRule::None => 1.0,
    };

    let fajr_limit = portion(method.fajr_angle) * night;
    match raw.fajr {
        Some(f) if fix_hour(sunrise - f) <= fajr_limit => {}
        _ => raw.fajr = Some(sunrise - fajr_limit),
    }

    if let IshaRule::Angle(angle) = method.isha {
        let isha_limit = portion(angle) * night;
        match raw.isha {
            Some(i) if fix_hour(i - sunset) <= isha_limit => {}
            _ => raw.isha = Some(sunset + isha_limit),
        }
    }
}
