//! Gregorian month arithmetic and Hijri date labels.

use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;
use miqat_types::MiqatError;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;

/// Minimum Gregorian year for Hijri conversion.
pub const HIJRI_MIN_YEAR: i32 = 1938;
/// Maximum Gregorian year for Hijri conversion.
pub const HIJRI_MAX_YEAR: i32 = 2076;

/// Number of days in a Gregorian month (28-31).
///
/// # Errors
/// Returns `InvalidDate` if `month` is not 1..=12 or the year is outside chrono's range.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, MiqatError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(MiqatError::InvalidDate { year, month })?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(MiqatError::InvalidDate { year, month })?;
    Ok((next - first).num_days() as u32)
}

/// Every date of a month, in order.
pub fn month_dates(year: i32, month: u32) -> Result<impl Iterator<Item = NaiveDate>, MiqatError> {
    let len = days_in_month(year, month)?;
    Ok((1..=len).filter_map(move |day| NaiveDate::from_ymd_opt(year, month, day)))
}

/// Creates a `DateOutOfRange` error with the supported Hijri bounds.
pub fn date_out_of_range(date: NaiveDate) -> MiqatError {
    MiqatError::DateOutOfRange {
        date,
        min: NaiveDate::from_ymd_opt(HIJRI_MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN),
        max: NaiveDate::from_ymd_opt(HIJRI_MAX_YEAR, 12, 31).unwrap_or(NaiveDate::MAX),
    }
}

/// Hijri day, month and year for display next to the Gregorian date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriLabel {
    pub year: usize,
    pub month: usize,
    pub day: usize,
}

impl HijriLabel {
    pub fn month_name(&self) -> &'static str {
        hijri_month_name(self.month)
    }
}

impl fmt::Display for HijriLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} H", self.day, self.month_name(), self.year)
    }
}

// Thread-local cache: (gregorian, adjustment) -> hijri
thread_local! {
    static HIJRI_CACHE: RefCell<Option<(NaiveDate, i64, HijriLabel)>> = const { RefCell::new(None) };
}

/// Converts Gregorian to Hijri with a moon-sighting day adjustment.
///
/// # Arguments
/// * `date` - Gregorian date
/// * `adjustment` - Day offset (positive = Hijri ahead)
///
/// # Errors
/// Returns `DateOutOfRange` if outside 1938-2076.
pub fn to_hijri(date: NaiveDate, adjustment: i64) -> Result<HijriLabel, MiqatError> {
    let cached = HIJRI_CACHE.with(|cache| {
        cache
            .borrow()
            .as_ref()
            .and_then(|(d, adj, label)| (*d == date && *adj == adjustment).then_some(*label))
    });
    if let Some(label) = cached {
        return Ok(label);
    }

    let adjusted = Duration::try_days(adjustment)
        .and_then(|offset| date.checked_add_signed(offset))
        .ok_or_else(|| date_out_of_range(date))?;

    if adjusted.year() < HIJRI_MIN_YEAR || adjusted.year() > HIJRI_MAX_YEAR {
        return Err(date_out_of_range(date));
    }

    let hijri = HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    )
    .map_err(|_| date_out_of_range(date))?;

    let label = HijriLabel {
        year: hijri.year(),
        month: hijri.month(),
        day: hijri.day(),
    };

    HIJRI_CACHE.with(|cache| {
        *cache.borrow_mut() = Some((date, adjustment, label));
    });

    Ok(label)
}

/// Returns Hijri month name.
pub fn hijri_month_name(month: usize) -> &'static str {
    match month {
        1 => "Muharram",
        2 => "Safar",
        3 => "Rabi' al-Awwal",
        4 => "Rabi' al-Thani",
        5 => "Jumada al-Awwal",
        6 => "Jumada al-Thani",
        7 => "Rajab",
        8 => "Sha'ban",
        9 => "Ramadan",
        10 => "Shawwal",
        11 => "Dhu al-Qi'dah",
        12 => "Dhu al-Hijjah",
        _ => "Unknown",
    }
}
