//! Schedule generation for miqat.
//!
//! Turns a [`ScheduleContext`] (location, method, madhab, adjustments, timezone source)
//! into daily and monthly prayer schedules, and answers "what is the next prayer".

pub mod context;
pub mod next;
pub mod schedule;

pub use context::{
    ScheduleContext, ScheduleContextBuilder, TimezoneProvider, TimezoneSource, MAX_ADJUSTMENT_MINUTES,
    MAX_HIJRI_ADJUSTMENT_DAYS, STRICT_ADJUSTMENT_LIMIT,
};
pub use next::{next_prayer, NextPrayer};
pub use schedule::{daily, hijri_label, monthly, monthly_for_date, schedule_range, ScheduleIterator};
