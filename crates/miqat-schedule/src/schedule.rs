use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use log::{debug, trace};
use miqat_astronomy::calculate_prayer_times;
use miqat_calendar::{month_dates, to_hijri, HijriLabel};
use miqat_types::{MiqatError, MonthlySchedule, PrayerSchedule};

use crate::context::ScheduleContext;

/// Prayer times for a single date.
pub fn daily(date: NaiveDate, context: &ScheduleContext) -> PrayerSchedule {
    calculate_prayer_times(date, context.location, &context.params_for(date))
}

/// Prayer times for every day of a Gregorian month.
///
/// The timezone is resolved per day, so an estimated DST switch can take
/// effect mid-month.
///
/// # Errors
/// Returns `InvalidDate` if `month` is not 1..=12.
pub fn monthly(year: i32, month: u32, context: &ScheduleContext) -> Result<MonthlySchedule, MiqatError> {
    let mut days = BTreeMap::new();
    for date in month_dates(year, month)? {
        let schedule = daily(date, context);
        trace!("{}", schedule);
        days.insert(date.day(), schedule);
    }
    debug!(
        "generated {}-{:02} schedule for {} ({} days)",
        year,
        month,
        context.location,
        days.len()
    );
    Ok(MonthlySchedule::new(year, month, days))
}

/// Schedule for the whole month containing `reference`.
pub fn monthly_for_date(reference: NaiveDate, context: &ScheduleContext) -> Result<MonthlySchedule, MiqatError> {
    monthly(reference.year(), reference.month(), context)
}

/// Hijri label for a date, honouring the context's sighting adjustment.
pub fn hijri_label(date: NaiveDate, context: &ScheduleContext) -> Result<HijriLabel, MiqatError> {
    to_hijri(date, context.hijri_adjustment)
}

/// Lazily yields daily schedules over an inclusive date range.
pub struct ScheduleIterator {
    current: Option<NaiveDate>,
    end: NaiveDate,
    context: ScheduleContext,
}

impl Iterator for ScheduleIterator {
    type Item = PrayerSchedule;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.current.filter(|d| *d <= self.end)?;
        self.current = date.succ_opt();
        Some(daily(date, &self.context))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.current {
            Some(d) if d <= self.end => (self.end - d).num_days() as usize + 1,
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

/// Schedules from `start` to `end` inclusive. Empty when `end < start`.
pub fn schedule_range(start: NaiveDate, end: NaiveDate, context: ScheduleContext) -> ScheduleIterator {
    ScheduleIterator {
        current: Some(start),
        end,
        context,
    }
}
