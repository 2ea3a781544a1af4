//! Extension trait for `NaiveDate`.

use chrono::NaiveDate;
use miqat_calendar::HijriLabel;
use miqat_schedule::{daily, hijri_label, monthly_for_date, ScheduleContext};
use miqat_types::{MiqatError, MonthlySchedule, PrayerSchedule};

/// Extends `NaiveDate` with prayer schedule lookups.
pub trait MiqatDateExt {
    /// Prayer times on this date for the given settings.
    fn prayer_times(&self, ctx: &ScheduleContext) -> PrayerSchedule;

    /// Schedule for the month containing this date.
    fn month_schedule(&self, ctx: &ScheduleContext) -> Result<MonthlySchedule, MiqatError>;

    /// Hijri label with a sighting adjustment in days.
    fn hijri_label(&self, adjustment: i64) -> Result<HijriLabel, MiqatError>;
}

impl MiqatDateExt for NaiveDate {
    fn prayer_times(&self, ctx: &ScheduleContext) -> PrayerSchedule {
        daily(*self, ctx)
    }

    fn month_schedule(&self, ctx: &ScheduleContext) -> Result<MonthlySchedule, MiqatError> {
        monthly_for_date(*self, ctx)
    }

    fn hijri_label(&self, adjustment: i64) -> Result<HijriLabel, MiqatError> {
        hijri_label(*self, &ScheduleContext::default().hijri_adjustment(adjustment))
    }
}
