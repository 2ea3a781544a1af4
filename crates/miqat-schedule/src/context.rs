use chrono::{NaiveDate, TimeZone};
use miqat_astronomy::{estimate_timezone_offset, longitude_offset, PrayerParams};
use miqat_types::{
    AdjustmentSet, AsrModel, CalculationMethod, GeoCoordinate, HighLatitudeRule, Madhab, MiqatError, Prayer,
};
use serde::{Deserialize, Serialize};

/// Adjustment bound in strict mode, in minutes.
pub const STRICT_ADJUSTMENT_LIMIT: i32 = 30;
/// Adjustments are clamped to half a day.
pub const MAX_ADJUSTMENT_MINUTES: i32 = 720;
/// Hijri sighting offset bound, in days.
pub const MAX_HIJRI_ADJUSTMENT_DAYS: i64 = 30;

/// Supplies the observer's UTC offset for a date.
///
/// Implement this to plug in an IANA timezone database; the built-in
/// `TimezoneSource` covers fixed offsets, the host clock and the longitude estimate.
pub trait TimezoneProvider: std::fmt::Debug + Send + Sync {
    fn offset_hours(&self, coords: GeoCoordinate, date: NaiveDate) -> f64;
}

/// Where the timezone offset comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimezoneSource {
    /// Authoritative offset in hours east of UTC.
    Fixed { hours: f64 },
    /// The host's local offset on that date (falls back to the estimate).
    SystemLocal,
    /// `round(lng / 15)`, plus the hemisphere DST guess when `dst` is set.
    Estimated {
        #[serde(default)]
        dst: bool,
    },
}

impl Default for TimezoneSource {
    fn default() -> Self {
        Self::Estimated { dst: false }
    }
}

fn estimated_offset(coords: GeoCoordinate, date: NaiveDate, dst: bool) -> f64 {
    if dst {
        estimate_timezone_offset(coords.lng, date, coords.lat)
    } else {
        longitude_offset(coords.lng)
    }
}

impl TimezoneProvider for TimezoneSource {
    fn offset_hours(&self, coords: GeoCoordinate, date: NaiveDate) -> f64 {
        match self {
            TimezoneSource::Fixed { hours } => *hours,
            TimezoneSource::SystemLocal => {
                system_offset_hours(date).unwrap_or_else(|| longitude_offset(coords.lng))
            }
            TimezoneSource::Estimated { dst } => estimated_offset(coords, date, *dst),
        }
    }
}

/// The host's UTC offset at local noon of `date`.
fn system_offset_hours(date: NaiveDate) -> Option<f64> {
    let noon = date.and_hms_opt(12, 0, 0)?;
    let local = chrono::Local.from_local_datetime(&noon).earliest()?;
    Some(local.offset().local_minus_utc() as f64 / 3600.0)
}

/// Prayer schedule configuration, persisted by the app as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleContext {
    pub location: GeoCoordinate,
    pub method: CalculationMethod,
    pub madhab: Madhab,
    pub asr_model: AsrModel,
    pub adjustments: AdjustmentSet,
    pub timezone: TimezoneSource,
    pub high_latitude_rule: HighLatitudeRule,
    /// Hijri day offset for moon sighting. Clamped to [-30, 30].
    pub hijri_adjustment: i64,
}

impl Default for ScheduleContext {
    fn default() -> Self {
        Self {
            // Central Jakarta
            location: GeoCoordinate::new_unchecked(-6.2088, 106.8456),
            method: CalculationMethod::default(),
            madhab: Madhab::default(),
            asr_model: AsrModel::default(),
            adjustments: AdjustmentSet::default(),
            timezone: TimezoneSource::default(),
            high_latitude_rule: HighLatitudeRule::default(),
            hijri_adjustment: 0,
        }
    }
}

impl ScheduleContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(mut self, location: GeoCoordinate) -> Self {
        self.location = location;
        self
    }

    pub fn method(mut self, method: CalculationMethod) -> Self {
        self.method = method;
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

    pub fn adjustments(mut self, adjustments: AdjustmentSet) -> Self {
        self.adjustments = adjustments;
        self
    }

    /// Sets one prayer's offset, clamped to ±720 minutes.
    pub fn adjust(mut self, prayer: Prayer, minutes: i32) -> Self {
        self.adjustments
            .set(prayer, minutes.clamp(-MAX_ADJUSTMENT_MINUTES, MAX_ADJUSTMENT_MINUTES));
        self
    }

    pub fn timezone(mut self, source: TimezoneSource) -> Self {
        self.timezone = source;
        self
    }

    pub fn fixed_timezone(self, hours: f64) -> Self {
        self.timezone(TimezoneSource::Fixed { hours })
    }

    /// Longitude estimate, optionally with the seasonal DST hour.
    pub fn estimated_timezone(self, dst: bool) -> Self {
        self.timezone(TimezoneSource::Estimated { dst })
    }

    pub fn high_latitude_rule(mut self, rule: HighLatitudeRule) -> Self {
        self.high_latitude_rule = rule;
        self
    }

    pub fn hijri_adjustment(mut self, days: i64) -> Self {
        self.hijri_adjustment = days.clamp(-MAX_HIJRI_ADJUSTMENT_DAYS, MAX_HIJRI_ADJUSTMENT_DAYS);
        self
    }

    /// Pins the timezone to whatever `provider` reports for `reference_date`.
    pub fn with_timezone_provider<P: TimezoneProvider>(mut self, provider: &P, reference_date: NaiveDate) -> Self {
        let hours = provider.offset_hours(self.location, reference_date);
        self.timezone = TimezoneSource::Fixed { hours };
        self
    }

    /// Resolved offset for a specific date.
    pub fn offset_hours(&self, date: NaiveDate) -> f64 {
        self.timezone.offset_hours(self.location, date)
    }

    /// Calculator parameters for one date.
    pub fn params_for(&self, date: NaiveDate) -> PrayerParams {
        PrayerParams::new(self.method, self.offset_hours(date))
            .adjustments(self.adjustments)
            .madhab(self.madhab)
            .asr_model(self.asr_model)
            .high_latitude_rule(self.high_latitude_rule)
    }

    /// Checks values that deserialization or direct field access could have left invalid.
    pub fn validate(&self) -> Result<(), MiqatError> {
        GeoCoordinate::new(self.location.lat, self.location.lng)?;
        if let TimezoneSource::Fixed { hours } = self.timezone {
            if !hours.is_finite() || hours.abs() > 14.0 {
                return Err(MiqatError::invalid_config(format!(
                    "Timezone offset {} outside [-14, 14] hours",
                    hours
                )));
            }
        }
        for p in Prayer::ALL {
            let m = self.adjustments.get(p);
            if m.abs() > MAX_ADJUSTMENT_MINUTES {
                return Err(MiqatError::invalid_config(format!(
                    "{} adjustment {} exceeds {} minutes",
                    p, m, MAX_ADJUSTMENT_MINUTES
                )));
            }
        }
        if !(-MAX_HIJRI_ADJUSTMENT_DAYS..=MAX_HIJRI_ADJUSTMENT_DAYS).contains(&self.hijri_adjustment) {
            return Err(MiqatError::invalid_config(format!(
                "Hijri adjustment {} outside [-{}, {}] days",
                self.hijri_adjustment, MAX_HIJRI_ADJUSTMENT_DAYS, MAX_HIJRI_ADJUSTMENT_DAYS
            )));
        }
        Ok(())
    }

    /// Loads persisted settings.
    ///
    /// # Errors
    /// `InvalidConfiguration` for malformed JSON, `InvalidCoordinate` for bad coordinates.
    pub fn from_json(json: &str) -> Result<Self, MiqatError> {
        let ctx: Self = serde_json::from_str(json)
            .map_err(|e| MiqatError::invalid_config(format!("Malformed settings: {}", e)))?;
        ctx.validate()?;
        Ok(ctx)
    }

    pub fn to_json(&self) -> Result<String, MiqatError> {
        serde_json::to_string(self).map_err(|e| MiqatError::invalid_config(e.to_string()))
    }
}

/// Builder with validation for `ScheduleContext`.
#[derive(Debug, Default)]
pub struct ScheduleContextBuilder {
    location: Option<(f64, f64)>,
    method: Option<CalculationMethod>,
    method_id: Option<u8>,
    madhab: Option<Madhab>,
    asr_model: Option<AsrModel>,
    adjustments: AdjustmentSet,
    timezone: Option<TimezoneSource>,
    high_latitude_rule: Option<HighLatitudeRule>,
    hijri_adjustment: Option<i64>,
    strict_adjustments: bool,
}

impl ScheduleContextBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn location(mut self, latitude: f64, longitude: f64) -> Self { self.location = Some((latitude, longitude)); self }
    pub fn method(mut self, method: CalculationMethod) -> Self { self.method = Some(method); self }
    /// Selects the method by its catalogue id (1..=7).
    pub fn method_id(mut self, id: u8) -> Self { self.method_id = Some(id); self }
    pub fn madhab(mut self, madhab: Madhab) -> Self { self.madhab = Some(madhab); self }
    pub fn asr_model(mut self, model: AsrModel) -> Self { self.asr_model = Some(model); self }
    pub fn adjust(mut self, prayer: Prayer, minutes: i32) -> Self { self.adjustments.set(prayer, minutes); self }
    pub fn adjustments(mut self, adjustments: AdjustmentSet) -> Self { self.adjustments = adjustments; self }
    pub fn timezone(mut self, source: TimezoneSource) -> Self { self.timezone = Some(source); self }
    pub fn high_latitude_rule(mut self, rule: HighLatitudeRule) -> Self { self.high_latitude_rule = Some(rule); self }
    pub fn hijri_adjustment(mut self, days: i64) -> Self { self.hijri_adjustment = Some(days); self }

    /// Rejects adjustments beyond ±30 minutes instead of clamping them.
    pub fn strict_adjustments(mut self, strict: bool) -> Self { self.strict_adjustments = strict; self }

    /// Builds and validates.
    pub fn build(self) -> Result<ScheduleContext, MiqatError> {
        let (lat, lng) = self
            .location
            .ok_or_else(|| MiqatError::invalid_config("Location is required"))?;
        let location = GeoCoordinate::new(lat, lng)?;

        let method = match (self.method, self.method_id) {
            (Some(m), _) => m,
            (None, Some(id)) => CalculationMethod::from_id(id)?,
            (None, None) => CalculationMethod::default(),
        };

        let mut adjustments = self.adjustments;
        for p in Prayer::ALL {
            let m = adjustments.get(p);
            if self.strict_adjustments && m.abs() > STRICT_ADJUSTMENT_LIMIT {
                return Err(MiqatError::invalid_config(format!(
                    "{} adjustment {} outside strict bounds [-{}, {}]",
                    p, m, STRICT_ADJUSTMENT_LIMIT, STRICT_ADJUSTMENT_LIMIT
                )));
            }
            adjustments.set(p, m.clamp(-MAX_ADJUSTMENT_MINUTES, MAX_ADJUSTMENT_MINUTES));
        }

        let ctx = ScheduleContext {
            location,
            method,
            madhab: self.madhab.unwrap_or_default(),
            asr_model: self.asr_model.unwrap_or_default(),
            adjustments,
            timezone: self.timezone.unwrap_or_default(),
            high_latitude_rule: self.high_latitude_rule.unwrap_or_default(),
            hijri_adjustment: self
                .hijri_adjustment
                .unwrap_or(0)
                .clamp(-MAX_HIJRI_ADJUSTMENT_DAYS, MAX_HIJRI_ADJUSTMENT_DAYS),
        };
        ctx.validate()?;
        Ok(ctx)
    }
}
