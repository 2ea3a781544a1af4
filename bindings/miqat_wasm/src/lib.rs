//! WASM bindings for miqat.
//!
//! Prayer times, monthly schedules and the qibla compass for the web app.

use chrono::{NaiveDate, NaiveDateTime};
use miqat_core::schedule::{daily, monthly, ScheduleContext, TimezoneSource};
use miqat_core::{
    compute_qibla_bearing, compute_qibla_pointer, to_hijri, AdjustmentSet, CalculationMethod, GeoCoordinate,
    NextPrayer, PrayerSchedule,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_date(date_str: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| js_err(format!("Invalid date format: {}", e)))
}

/// `undefined` or `null` means no adjustments; partial objects are allowed.
fn parse_adjustments(value: JsValue) -> Result<AdjustmentSet, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(AdjustmentSet::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(js_err)
}

fn build_context(
    lat: f64,
    lng: f64,
    timezone_offset: Option<f64>,
    method_id: u8,
    adjustments: JsValue,
) -> Result<ScheduleContext, JsValue> {
    let timezone = match timezone_offset {
        Some(hours) => TimezoneSource::Fixed { hours },
        None => TimezoneSource::default(),
    };
    let ctx = ScheduleContext::new()
        .location(GeoCoordinate::new(lat, lng).map_err(js_err)?)
        .method(CalculationMethod::from_id(method_id).map_err(js_err)?)
        .adjustments(parse_adjustments(adjustments)?)
        .timezone(timezone);
    ctx.validate().map_err(js_err)?;
    Ok(ctx)
}

/// Computes one day's prayer times.
///
/// Omit `timezoneOffset` to estimate it as `round(lng / 15)` without a DST guess.
///
/// # Example (JavaScript)
/// ```js
/// const day = prayerTimes("2024-03-15", -6.2088, 106.8456, 7, 3);
/// console.log(day.times[0].time); // "04:31"
/// ```
#[wasm_bindgen(js_name = prayerTimes)]
pub fn prayer_times(
    date_str: &str,
    lat: f64,
    lng: f64,
    timezone_offset: Option<f64>,
    method_id: u8,
    adjustments: JsValue,
) -> Result<WasmPrayerSchedule, JsValue> {
    let date = parse_date(date_str)?;
    let ctx = build_context(lat, lng, timezone_offset, method_id, adjustments)?;
    Ok(WasmPrayerSchedule::new(&daily(date, &ctx), ctx.hijri_adjustment))
}

/// Computes every day of a month as an array of day schedules.
#[wasm_bindgen(js_name = monthlySchedule)]
pub fn monthly_schedule(
    year: i32,
    month: u32,
    lat: f64,
    lng: f64,
    timezone_offset: Option<f64>,
    method_id: u8,
    adjustments: JsValue,
) -> Result<JsValue, JsValue> {
    let ctx = build_context(lat, lng, timezone_offset, method_id, adjustments)?;
    let month = monthly(year, month, &ctx).map_err(js_err)?;
    let days: Vec<WasmPrayerSchedule> = month
        .iter()
        .map(|(_, s)| WasmPrayerSchedule::new(s, ctx.hijri_adjustment))
        .collect();
    serde_wasm_bindgen::to_value(&days).map_err(js_err)
}

/// Qibla bearing in degrees clockwise from true north.
#[wasm_bindgen]
pub fn qibla(lat: f64, lng: f64) -> Result<f64, JsValue> {
    compute_qibla_bearing(lat, lng).map(|b| b.degrees()).map_err(js_err)
}

/// Compass pointer angle for a device heading; throws when the heading is unavailable.
#[wasm_bindgen(js_name = qiblaPointer)]
pub fn qibla_pointer(lat: f64, lng: f64, heading: Option<f64>) -> Result<f64, JsValue> {
    compute_qibla_pointer(lat, lng, heading).map_err(js_err)
}

/// The calculation method catalogue for the settings picker.
#[wasm_bindgen]
pub fn methods() -> Result<JsValue, JsValue> {
    let list: Vec<WasmMethod> = CalculationMethod::ALL.iter().map(WasmMethod::from).collect();
    serde_wasm_bindgen::to_value(&list).map_err(js_err)
}

/// Approximate UTC offset from longitude with a seasonal DST guess.
#[wasm_bindgen(js_name = estimateTimezone)]
pub fn estimate_timezone(lng: f64, date_str: &str, lat: f64) -> Result<f64, JsValue> {
    Ok(miqat_core::estimate_timezone_offset(lng, parse_date(date_str)?, lat))
}

/// Settings-driven API backed by the persisted JSON preferences.
///
/// # Example (JavaScript)
/// ```js
/// const miqat = new Miqat(localStorage.getItem("prayerSettings") ?? "{}");
/// const today = miqat.prayerTimes("2024-03-15");
/// const next = miqat.nextPrayer("2024-03-15T13:15");
/// console.log(next.prayer, next.countdown);
/// ```
#[wasm_bindgen]
pub struct Miqat {
    context: ScheduleContext,
}

#[wasm_bindgen]
impl Miqat {
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: &str) -> Result<Miqat, JsValue> {
        console_error_panic_hook::set_once();
        let context = ScheduleContext::from_json(settings_json).map_err(js_err)?;
        Ok(Miqat { context })
    }

    #[wasm_bindgen(js_name = prayerTimes)]
    pub fn prayer_times(&self, date_str: &str) -> Result<WasmPrayerSchedule, JsValue> {
        let date = parse_date(date_str)?;
        Ok(WasmPrayerSchedule::new(&daily(date, &self.context), self.context.hijri_adjustment))
    }

    pub fn monthly(&self, year: i32, month: u32) -> Result<JsValue, JsValue> {
        let month = monthly(year, month, &self.context).map_err(js_err)?;
        let days: Vec<WasmPrayerSchedule> = month
            .iter()
            .map(|(_, s)| WasmPrayerSchedule::new(s, self.context.hijri_adjustment))
            .collect();
        serde_wasm_bindgen::to_value(&days).map_err(js_err)
    }

    /// `local` is `YYYY-MM-DDTHH:MM` wall-clock time at the configured location.
    /// Returns `null` when no prayer is defined on either day.
    #[wasm_bindgen(js_name = nextPrayer)]
    pub fn next_prayer(&self, local: &str) -> Result<JsValue, JsValue> {
        let now = NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M")
            .map_err(|e| js_err(format!("Invalid date-time format: {}", e)))?;
        let next = self.context.next_prayer(now).map(WasmNextPrayer::from);
        serde_wasm_bindgen::to_value(&next).map_err(js_err)
    }

    pub fn qibla(&self) -> f64 {
        miqat_core::astronomy::qibla_bearing(self.context.location).degrees()
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.context.to_json().map_err(js_err)
    }
}

#[derive(Serialize, tsify::Tsify)]
#[serde(rename_all = "camelCase")]
pub struct WasmPrayerTime {
    pub name: String,
    pub arabic_name: String,
    /// `HH:MM`, or `--:--` when the sun never reaches the prayer's angle.
    pub time: String,
}

/// WASM-friendly day schedule for TypeScript generation.
#[derive(Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmPrayerSchedule {
    pub date: String,
    pub times: Vec<WasmPrayerTime>,
    /// e.g. `"5 Ramadan 1445 H"`; absent outside the supported Hijri range.
    pub hijri: Option<String>,
}

impl WasmPrayerSchedule {
    fn new(schedule: &PrayerSchedule, hijri_adjustment: i64) -> Self {
        Self {
            date: schedule.date.format("%Y-%m-%d").to_string(),
            times: schedule
                .display_times()
                .into_iter()
                .map(|(p, time)| WasmPrayerTime {
                    name: p.name().to_string(),
                    arabic_name: p.arabic_name().to_string(),
                    time,
                })
                .collect(),
            hijri: to_hijri(schedule.date, hijri_adjustment).ok().map(|h| h.to_string()),
        }
    }
}

#[derive(Serialize, tsify::Tsify)]
#[serde(rename_all = "camelCase")]
pub struct WasmNextPrayer {
    pub prayer: String,
    pub time: String,
    pub minutes_until: u32,
    pub countdown: String,
    pub tomorrow: bool,
}

impl From<NextPrayer> for WasmNextPrayer {
    fn from(next: NextPrayer) -> Self {
        Self {
            prayer: next.prayer.name().to_string(),
            countdown: next.countdown(),
            time: next.time,
            minutes_until: next.minutes_until,
            tomorrow: next.tomorrow,
        }
    }
}

#[derive(Serialize, tsify::Tsify)]
#[serde(rename_all = "camelCase")]
pub struct WasmMethod {
    pub id: u8,
    pub name: String,
    pub description: String,
}

impl From<&CalculationMethod> for WasmMethod {
    fn from(method: &CalculationMethod) -> Self {
        Self {
            id: method.id(),
            name: method.name().to_string(),
            description: method.description(),
        }
    }
}
