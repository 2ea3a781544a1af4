use chrono::{NaiveDateTime, NaiveTime, Timelike};
use miqat_types::clock::{format_countdown, format_hhmm};
use miqat_types::{Prayer, PrayerSchedule};
use serde::{Deserialize, Serialize};

use crate::context::ScheduleContext;
use crate::schedule::daily;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// The upcoming prayer relative to a wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPrayer {
    pub prayer: Prayer,
    /// `HH:MM` of the prayer.
    pub time: String,
    pub minutes_until: u32,
    /// True when every prayer today has passed.
    pub tomorrow: bool,
}

impl NextPrayer {
    /// `"{h}h {m}m"` until the prayer.
    pub fn countdown(&self) -> String {
        format_countdown(self.minutes_until)
    }
}

fn first_after(schedule: &PrayerSchedule, now_minutes: u32) -> Option<(Prayer, u32)> {
    Prayer::ALL
        .into_iter()
        .filter_map(|p| schedule.minutes_of_day(p).ok().map(|m| (p, m)))
        .find(|(_, m)| *m > now_minutes)
}

fn first_defined(schedule: &PrayerSchedule) -> Option<(Prayer, u32)> {
    Prayer::ALL
        .into_iter()
        .find_map(|p| schedule.minutes_of_day(p).ok().map(|m| (p, m)))
}

/// Finds the next prayer strictly after `now`, at minute resolution.
///
/// Once today's prayers have passed, the first prayer of `tomorrow` is used,
/// or today's first prayer again when no tomorrow schedule is given.
/// Undefined prayers are skipped. Returns `None` only when nothing is defined.
pub fn next_prayer(today: &PrayerSchedule, tomorrow: Option<&PrayerSchedule>, now: NaiveTime) -> Option<NextPrayer> {
    let now_minutes = now.hour() * 60 + now.minute();

    if let Some((prayer, m)) = first_after(today, now_minutes) {
        return Some(NextPrayer {
            prayer,
            time: format_hhmm(m as f64 / 60.0),
            minutes_until: m - now_minutes,
            tomorrow: false,
        });
    }

    let (prayer, m) = first_defined(tomorrow.unwrap_or(today))?;
    Some(NextPrayer {
        prayer,
        time: format_hhmm(m as f64 / 60.0),
        minutes_until: m + MINUTES_PER_DAY - now_minutes,
        tomorrow: true,
    })
}

impl ScheduleContext {
    /// Next prayer for a local date and time at this context's location.
    pub fn next_prayer(&self, now: NaiveDateTime) -> Option<NextPrayer> {
        let date = now.date();
        let today = daily(date, self);
        let tomorrow = date.succ_opt().map(|d| daily(d, self));
        next_prayer(&today, tomorrow.as_ref(), now.time())
    }
}
