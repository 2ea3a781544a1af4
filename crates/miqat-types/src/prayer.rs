use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;

use crate::clock;
use crate::error::MiqatError;

/// Placeholder shown for a prayer with no valid time.
pub const UNDEFINED_TIME: &str = "--:--";

/// The six daily markers, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }

    pub const fn arabic_name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "الفجر",
            Prayer::Sunrise => "الشروق",
            Prayer::Dhuhr => "الظهر",
            Prayer::Asr => "العصر",
            Prayer::Maghrib => "المغرب",
            Prayer::Isha => "العشاء",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-prayer minute offsets applied after the astronomical computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentSet {
    pub fajr: i32,
    pub sunrise: i32,
    pub dhuhr: i32,
    pub asr: i32,
    pub maghrib: i32,
    pub isha: i32,
}

impl AdjustmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, prayer: Prayer) -> i32 {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    pub fn set(&mut self, prayer: Prayer, minutes: i32) {
        let slot = match prayer {
            Prayer::Fajr => &mut self.fajr,
            Prayer::Sunrise => &mut self.sunrise,
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
        };
        *slot = minutes;
    }

    pub fn with(mut self, prayer: Prayer, minutes: i32) -> Self {
        self.set(prayer, minutes);
        self
    }

    /// Offset in hours.
    pub fn hours(&self, prayer: Prayer) -> f64 {
        self.get(prayer) as f64 / 60.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Prayer times for one calendar date, as float hours of local time.
///
/// A missing slot means the sun never reaches that prayer's altitude on this date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerSchedule {
    pub date: NaiveDate,
    times: [Option<f64>; 6],
}

impl PrayerSchedule {
    pub fn new(date: NaiveDate, times: [Option<f64>; 6]) -> Self {
        Self { date, times }
    }

    /// Raw float hours (may fall outside [0, 24) before formatting).
    ///
    /// # Errors
    /// Returns `UndefinedTime` when the prayer has no valid time on this date.
    pub fn hours(&self, prayer: Prayer) -> Result<f64, MiqatError> {
        self.times[prayer.index()].ok_or(MiqatError::undefined(prayer, self.date))
    }

    /// `HH:MM` string for one prayer.
    pub fn time_string(&self, prayer: Prayer) -> Result<String, MiqatError> {
        self.hours(prayer).map(clock::format_hhmm)
    }

    pub fn naive_time(&self, prayer: Prayer) -> Result<NaiveTime, MiqatError> {
        let h = self.hours(prayer)?;
        clock::to_naive_time(h).ok_or(MiqatError::undefined(prayer, self.date))
    }

    /// Truncated minutes since midnight.
    pub fn minutes_of_day(&self, prayer: Prayer) -> Result<u32, MiqatError> {
        self.hours(prayer).map(clock::minutes_of_day)
    }

    /// All six slots in fixed order.
    pub fn entries(&self) -> impl Iterator<Item = (Prayer, Option<f64>)> + '_ {
        Prayer::ALL.into_iter().map(move |p| (p, self.times[p.index()]))
    }

    /// Display strings in fixed order, with `--:--` for undefined times.
    pub fn display_times(&self) -> [(Prayer, String); 6] {
        Prayer::ALL.map(|p| {
            let s = self.time_string(p).unwrap_or_else(|_| UNDEFINED_TIME.to_string());
            (p, s)
        })
    }

    /// Prayers with no valid time on this date.
    pub fn undefined(&self) -> SmallVec<[Prayer; 6]> {
        self.entries().filter(|(_, t)| t.is_none()).map(|(p, _)| p).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.times.iter().all(Option::is_some)
    }
}

impl fmt::Display for PrayerSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .display_times()
            .iter()
            .map(|(p, t)| format!("{} {}", p, t))
            .collect();
        write!(f, "{}: {}", self.date, parts.join(", "))
    }
}

/// Prayer schedules for every day of one Gregorian month, keyed by day-of-month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySchedule {
    pub year: i32,
    pub month: u32,
    days: BTreeMap<u32, PrayerSchedule>,
}

impl MonthlySchedule {
    pub fn new(year: i32, month: u32, days: BTreeMap<u32, PrayerSchedule>) -> Self {
        Self { year, month, days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, day: u32) -> Option<&PrayerSchedule> {
        self.days.get(&day)
    }

    /// Days in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &PrayerSchedule)> {
        self.days.iter().map(|(d, s)| (*d, s))
    }
}
