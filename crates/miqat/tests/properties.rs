use chrono::{Datelike, NaiveDate};
use miqat::astronomy::bearing_degrees;
use miqat::days_in_month;
use miqat::prelude::*;
use proptest::prelude::*;

fn day(offset: i64) -> NaiveDate {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    base.checked_add_signed(chrono::Duration::days(offset)).unwrap()
}

fn method_strategy() -> impl Strategy<Value = CalculationMethod> {
    prop::sample::select(CalculationMethod::ALL.to_vec())
}

proptest! {
    /// Outside polar latitudes every prayer exists and they come in order.
    #[test]
    fn prayers_are_ordered(
        offset in 0i64..3650,
        lat in -40.0f64..=40.0,
        lng in -180.0f64..=180.0,
        method in method_strategy(),
    ) {
        let date = day(offset);
        let tz = (lng / 15.0).round();
        let s = compute_prayer_times(date, lat, lng, tz, method, AdjustmentSet::default()).unwrap();
        prop_assert!(s.is_complete(), "undefined {:?} on {} at {}", s.undefined(), date, lat);
        let hours: Vec<f64> = Prayer::ALL.iter().map(|p| s.hours(*p).unwrap()).collect();
        prop_assert!(hours.windows(2).all(|w| w[0] < w[1]), "{:?}", hours);
    }

    /// An adjustment moves exactly one prayer by exactly that many minutes.
    #[test]
    fn adjustment_is_isolated(
        offset in 0i64..3650,
        minutes in -30i32..=30,
        which in 0usize..6,
    ) {
        let date = day(offset);
        let prayer = Prayer::ALL[which];
        let base = compute_prayer_times(date, -6.2088, 106.8456, 7.0, CalculationMethod::Kemenag, AdjustmentSet::default()).unwrap();
        let adjusted = compute_prayer_times(
            date, -6.2088, 106.8456, 7.0, CalculationMethod::Kemenag,
            AdjustmentSet::default().with(prayer, minutes),
        ).unwrap();
        for p in Prayer::ALL {
            let delta = adjusted.hours(p).unwrap() - base.hours(p).unwrap();
            let expected = if p == prayer { minutes as f64 / 60.0 } else { 0.0 };
            prop_assert!((delta - expected).abs() < 1e-9, "{} moved by {}", p, delta);
        }
    }

    /// A monthly schedule has exactly one entry per calendar day.
    #[test]
    fn month_has_every_day(year in 1990i32..2100, month in 1u32..=12) {
        let m = compute_monthly_schedule(year, month, 21.4225, 39.8262, 3.0, CalculationMethod::UmmAlQura, AdjustmentSet::default()).unwrap();
        let expected = days_in_month(year, month).unwrap();
        prop_assert_eq!(m.len() as u32, expected);
        for (d, schedule) in m.iter() {
            prop_assert_eq!(schedule.date.day(), d);
            prop_assert_eq!(schedule.date.month(), month);
        }
    }

    /// The raw bearing ignores whole turns of longitude.
    #[test]
    fn qibla_is_periodic_in_longitude(lat in -89.0f64..89.0, lng in -180.0f64..180.0) {
        let a = bearing_degrees(lat, lng);
        let b = bearing_degrees(lat, lng + 360.0);
        let diff = (a - b).abs();
        prop_assert!(diff.min(360.0 - diff) < 1e-6);
        prop_assert!((0.0..360.0).contains(&a));
    }

    /// Formatted times are always well-formed HH:MM.
    #[test]
    fn display_times_are_well_formed(
        offset in 0i64..3650,
        lat in -89.0f64..=89.0,
        lng in -180.0f64..=180.0,
    ) {
        let s = compute_prayer_times(day(offset), lat, lng, 0.0, CalculationMethod::MuslimWorldLeague, AdjustmentSet::default()).unwrap();
        for (_, t) in s.display_times() {
            if t != "--:--" {
                let (h, m) = t.split_once(':').unwrap();
                prop_assert!(h.parse::<u32>().unwrap() < 24);
                prop_assert!(m.parse::<u32>().unwrap() < 60);
            }
        }
    }
}
