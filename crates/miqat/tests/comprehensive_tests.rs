use chrono::NaiveDate;
use miqat::prelude::*;
use miqat::{
    compute_monthly_schedule, longitude_offset, presets, AsrModel, HighLatitudeRule, MonthlySchedule,
    ScheduleContextBuilder,
};

const JAKARTA: (f64, f64) = (-6.2088, 106.8456);

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn jakarta(method: CalculationMethod, adjustments: AdjustmentSet) -> PrayerSchedule {
    compute_prayer_times(date(2024, 3, 15), JAKARTA.0, JAKARTA.1, 7.0, method, adjustments).unwrap()
}

fn strings(s: &PrayerSchedule) -> Vec<String> {
    s.display_times().into_iter().map(|(_, t)| t).collect()
}

#[test]
fn test_jakarta_regression_fixture() {
    let s = jakarta(CalculationMethod::Kemenag, AdjustmentSet::default());
    assert_eq!(strings(&s), ["04:31", "05:51", "11:52", "14:45", "17:53", "19:06"]);
}

#[test]
fn test_jakarta_within_expected_window() {
    let s = jakarta(CalculationMethod::Kemenag, AdjustmentSet::default());
    assert!(s.is_complete());
    let hours: Vec<f64> = Prayer::ALL.iter().map(|p| s.hours(*p).unwrap()).collect();
    assert!(hours.windows(2).all(|w| w[0] < w[1]), "not increasing: {:?}", hours);
    assert!(hours[0] >= 4.0 && hours[5] <= 19.75);
}

#[test]
fn test_methods_differ_only_in_fajr_and_isha() {
    let expected = [
        (CalculationMethod::MuslimWorldLeague, "04:39", "19:02"),
        (CalculationMethod::Egyptian, "04:33", "19:04"),
        (CalculationMethod::Kemenag, "04:31", "19:06"),
        (CalculationMethod::UmmAlQura, "04:37", "19:23"),
        (CalculationMethod::Karachi, "04:39", "19:06"),
        (CalculationMethod::Isna, "04:51", "18:54"),
        (CalculationMethod::Uoif, "05:03", "18:42"),
    ];
    let base = jakarta(CalculationMethod::Kemenag, AdjustmentSet::default());
    for (method, fajr, isha) in expected {
        let s = jakarta(method, AdjustmentSet::default());
        assert_eq!(s.time_string(Prayer::Fajr).unwrap(), fajr, "{}", method);
        assert_eq!(s.time_string(Prayer::Isha).unwrap(), isha, "{}", method);
        for p in [Prayer::Sunrise, Prayer::Dhuhr, Prayer::Asr, Prayer::Maghrib] {
            assert_eq!(s.hours(p).unwrap(), base.hours(p).unwrap(), "{} {}", method, p);
        }
    }
}

#[test]
fn test_umm_al_qura_isha_follows_maghrib() {
    let s = compute_prayer_times(
        date(2024, 6, 21),
        21.4225,
        39.8262,
        3.0,
        CalculationMethod::UmmAlQura,
        AdjustmentSet::default(),
    )
    .unwrap();
    let gap = s.hours(Prayer::Isha).unwrap() - s.hours(Prayer::Maghrib).unwrap();
    assert!((gap - 1.5).abs() < 1e-9);
    assert_eq!(s.time_string(Prayer::Maghrib).unwrap(), "19:03");
    assert_eq!(s.time_string(Prayer::Isha).unwrap(), "20:33");
}

#[test]
fn test_umm_al_qura_isha_tracks_adjusted_maghrib() {
    let adj = AdjustmentSet::default().with(Prayer::Maghrib, 3);
    let s = jakarta(CalculationMethod::UmmAlQura, adj);
    assert_eq!(s.time_string(Prayer::Maghrib).unwrap(), "17:56");
    assert_eq!(s.time_string(Prayer::Isha).unwrap(), "19:26");
}

#[test]
fn test_adjustment_shifts_only_its_prayer() {
    let base = jakarta(CalculationMethod::Kemenag, AdjustmentSet::default());
    let adjusted = jakarta(CalculationMethod::Kemenag, AdjustmentSet::default().with(Prayer::Fajr, 5));
    assert_eq!(adjusted.time_string(Prayer::Fajr).unwrap(), "04:36");
    for p in Prayer::ALL.into_iter().filter(|p| *p != Prayer::Fajr) {
        assert_eq!(adjusted.time_string(p).unwrap(), base.time_string(p).unwrap());
    }
}

#[test]
fn test_asr_shadow_factor_by_model() {
    let ctx = ScheduleContext::new()
        .location(GeoCoordinate::new(21.4225, 39.8262).unwrap())
        .method(CalculationMethod::UmmAlQura)
        .fixed_timezone(3.0);
    let asr = |ctx: &ScheduleContext| date(2024, 6, 21).prayer_times(ctx).time_string(Prayer::Asr).unwrap();

    // Shadow angle as hour angle: a larger factor gives a smaller angle.
    assert_eq!(asr(&ctx), "15:20");
    assert_eq!(asr(&ctx.clone().madhab(Madhab::Hanafi)), "14:09");

    let by_altitude = ctx.asr_model(AsrModel::SunAltitude);
    assert_eq!(asr(&by_altitude), "15:44");
    assert_eq!(asr(&by_altitude.clone().madhab(Madhab::Hanafi)), "17:03");
}

#[test]
fn test_monthly_schedule() {
    let month = compute_monthly_schedule(
        2024,
        2,
        JAKARTA.0,
        JAKARTA.1,
        7.0,
        CalculationMethod::Kemenag,
        AdjustmentSet::default(),
    )
    .unwrap();
    assert_eq!(month.len(), 29);
    let feb29 = month.get(29).unwrap();
    assert_eq!(feb29.date, date(2024, 2, 29));
    assert_eq!(strings(feb29), ["04:20", "05:42", "11:46", "14:41", "17:49", "19:03"]);

    let feb_2023: MonthlySchedule = compute_monthly_schedule(
        2023,
        2,
        JAKARTA.0,
        JAKARTA.1,
        7.0,
        CalculationMethod::Kemenag,
        AdjustmentSet::default(),
    )
    .unwrap();
    assert_eq!(feb_2023.len(), 28);
    assert!(feb_2023.get(29).is_none());
}

#[test]
fn test_polar_summer_keeps_noon() {
    // Tromsø near the June solstice: the sun never sets.
    let s = compute_prayer_times(
        date(2024, 6, 21),
        69.6492,
        18.9553,
        2.0,
        CalculationMethod::MuslimWorldLeague,
        AdjustmentSet::default(),
    )
    .unwrap();
    assert!(s.hours(Prayer::Dhuhr).is_ok());
    let err = s.hours(Prayer::Fajr).unwrap_err();
    assert!(err.is_undefined_time());
    assert!(s.undefined().contains(&Prayer::Isha));
    assert_eq!(s.display_times()[0].1, "--:--");
}

#[test]
fn test_high_latitude_rule_fills_night_prayers() {
    let london = GeoCoordinate::new(51.5074, -0.1278).unwrap();
    let ctx = ScheduleContext::new()
        .location(london)
        .method(CalculationMethod::Kemenag)
        .fixed_timezone(1.0);
    let plain = date(2024, 6, 21).prayer_times(&ctx);
    assert!(plain.hours(Prayer::Fajr).is_err());

    let filled = date(2024, 6, 21).prayer_times(&ctx.high_latitude_rule(HighLatitudeRule::OneSeventh));
    assert!(filled.is_complete());
    assert!(filled.hours(Prayer::Fajr).unwrap() < filled.hours(Prayer::Sunrise).unwrap());
}

#[test]
fn test_qibla_bearings() {
    let jakarta = compute_qibla_bearing(JAKARTA.0, JAKARTA.1).unwrap();
    assert!((290.0..=300.0).contains(&jakarta.degrees()));

    let at_kaaba = compute_qibla_bearing(21.4225, 39.8262).unwrap();
    assert_eq!(at_kaaba.degrees(), 0.0);
    assert!(!at_kaaba.degrees().is_nan());
}

#[test]
fn test_qibla_pointer_requires_heading() {
    assert_eq!(compute_qibla_pointer(JAKARTA.0, JAKARTA.1, None), Err(MiqatError::HeadingUnavailable));
    let p = compute_qibla_pointer(JAKARTA.0, JAKARTA.1, Some(90.0)).unwrap();
    assert!((0.0..360.0).contains(&p));
}

#[test]
fn test_timezone_estimate() {
    assert_eq!(estimate_timezone_offset(JAKARTA.1, date(2024, 6, 1), JAKARTA.0), 7.0);
    assert_eq!(estimate_timezone_offset(-74.006, date(2024, 7, 4), 40.7128), -4.0);
    assert_eq!(longitude_offset(-74.006), -5.0);
}

#[test]
fn test_default_context_skips_dst_guess() {
    let s = date(2024, 3, 15).prayer_times(&ScheduleContext::new());
    assert_eq!(s.time_string(Prayer::Dhuhr).unwrap(), "11:52");

    let with_dst = date(2024, 3, 15).prayer_times(&ScheduleContext::new().estimated_timezone(true));
    assert_eq!(with_dst.time_string(Prayer::Dhuhr).unwrap(), "12:52");
}

#[test]
fn test_settings_reject_hijri_adjustment_overflow() {
    let err = ScheduleContext::from_json(r#"{"hijri_adjustment":9223372036854775807}"#).unwrap_err();
    assert!(matches!(err, MiqatError::InvalidConfiguration { .. }));
}

#[test]
fn test_next_prayer_wraps_after_isha() {
    let ctx = ScheduleContext::new().fixed_timezone(7.0);
    let late = date(2024, 3, 15).and_hms_opt(22, 0, 0).unwrap();
    let next = ctx.next_prayer(late).unwrap();
    assert_eq!(next.prayer, Prayer::Fajr);
    assert!(next.tomorrow);
    assert!(next.countdown().starts_with("6h"));
}

#[test]
fn test_settings_from_preset() {
    let preset = presets::resolve("Saudi Arabia", Some("Madinah"), None).unwrap();
    let ctx = ScheduleContextBuilder::new()
        .location(preset.coords.lat, preset.coords.lng)
        .method_id(4)
        .timezone(miqat::TimezoneSource::Fixed { hours: 3.0 })
        .build()
        .unwrap();
    let json = ctx.to_json().unwrap();
    let restored = ScheduleContext::from_json(&json).unwrap();
    assert_eq!(restored, ctx);
    assert!(date(2024, 1, 1).prayer_times(&restored).is_complete());
}

#[test]
fn test_out_of_range_inputs() {
    assert!(compute_prayer_times(date(2024, 1, 1), -91.0, 0.0, 0.0, CalculationMethod::default(), AdjustmentSet::default()).is_err());
    assert!(CalculationMethod::from_id(0).is_err());
    assert_eq!(CalculationMethod::ALL.len(), 7);
}
