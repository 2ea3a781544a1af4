use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MiqatError;

/// How Isha is derived for a calculation method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IshaRule {
    /// Sun depression angle below the horizon, in degrees.
    Angle(f64),
    /// Fixed interval after Maghrib, in minutes.
    MinutesAfterMaghrib(f64),
}

/// Twilight parameters of a calculation method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodParams {
    /// Fajr depression angle in degrees (positive = below horizon).
    pub fajr_angle: f64,
    pub isha: IshaRule,
}

impl MethodParams {
    pub const fn angles(fajr_angle: f64, isha_angle: f64) -> Self {
        Self { fajr_angle, isha: IshaRule::Angle(isha_angle) }
    }
}

/// Regional authority presets for Fajr and Isha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculationMethod {
    /// Muslim World League.
    MuslimWorldLeague,
    /// Egyptian General Authority of Survey.
    Egyptian,
    /// Indonesian Ministry of Religious Affairs (Kemenag).
    Kemenag,
    /// Umm al-Qura University, Makkah.
    UmmAlQura,
    /// University of Islamic Sciences, Karachi.
    Karachi,
    /// Islamic Society of North America.
    Isna,
    /// Union des Organisations Islamiques de France.
    Uoif,
}

impl Default for CalculationMethod {
    fn default() -> Self {
        Self::Kemenag
    }
}

impl CalculationMethod {
    /// The full catalogue, ordered by id.
    pub const ALL: [CalculationMethod; 7] = [
        Self::MuslimWorldLeague,
        Self::Egyptian,
        Self::Kemenag,
        Self::UmmAlQura,
        Self::Karachi,
        Self::Isna,
        Self::Uoif,
    ];

    pub const fn params(&self) -> MethodParams {
        match self {
            Self::MuslimWorldLeague => MethodParams::angles(18.0, 17.0),
            Self::Egyptian => MethodParams::angles(19.5, 17.5),
            Self::Kemenag => MethodParams::angles(20.0, 18.0),
            Self::UmmAlQura => MethodParams {
                fajr_angle: 18.5,
                isha: IshaRule::MinutesAfterMaghrib(90.0),
            },
            Self::Karachi => MethodParams::angles(18.0, 18.0),
            Self::Isna => MethodParams::angles(15.0, 15.0),
            Self::Uoif => MethodParams::angles(12.0, 12.0),
        }
    }

    /// Stable numeric id (1..=7) used by persisted settings and the web UI.
    pub const fn id(&self) -> u8 {
        match self {
            Self::MuslimWorldLeague => 1,
            Self::Egyptian => 2,
            Self::Kemenag => 3,
            Self::UmmAlQura => 4,
            Self::Karachi => 5,
            Self::Isna => 6,
            Self::Uoif => 7,
        }
    }

    /// Looks up a method by id.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for ids outside 1..=7.
    pub fn from_id(id: u8) -> Result<Self, MiqatError> {
        Self::ALL
            .into_iter()
            .find(|m| m.id() == id)
            .ok_or_else(|| MiqatError::invalid_config(format!("Unknown calculation method id {}", id)))
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::MuslimWorldLeague => "Muslim World League",
            Self::Egyptian => "Egyptian General Authority",
            Self::Kemenag => "Indonesian Ministry of Religious Affairs",
            Self::UmmAlQura => "Umm al-Qura University, Makkah",
            Self::Karachi => "University of Islamic Sciences, Karachi",
            Self::Isna => "Islamic Society of North America",
            Self::Uoif => "Union des Organisations Islamiques de France",
        }
    }

    /// Short parameter summary, e.g. "Fajr: 18°, Isha: 17°".
    pub fn description(&self) -> String {
        let p = self.params();
        match p.isha {
            IshaRule::Angle(isha) => format!("Fajr: {}°, Isha: {}°", p.fajr_angle, isha),
            IshaRule::MinutesAfterMaghrib(min) => {
                format!("Fajr: {}°, Isha: {}min after Maghrib", p.fajr_angle, min)
            }
        }
    }

    pub fn uses_fixed_isha(&self) -> bool {
        matches!(self.params().isha, IshaRule::MinutesAfterMaghrib(_))
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The four major Sunni schools of jurisprudence.
///
/// Only the Asr shadow factor depends on it: Hanafi uses twice the object length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Madhab {
    Shafi,
    Hanafi,
    Maliki,
    Hanbali,
}

impl Default for Madhab {
    fn default() -> Self {
        Self::Shafi
    }
}

impl Madhab {
    pub const fn asr_shadow_factor(&self) -> f64 {
        match self {
            Madhab::Hanafi => 2.0,
            Madhab::Shafi | Madhab::Maliki | Madhab::Hanbali => 1.0,
        }
    }
}

/// How the Asr shadow angle `atan(1 / (factor + tan|φ − δ|))` becomes a clock time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsrModel {
    /// The angle is the hour angle past noon. Always defined.
    #[default]
    ShadowAngle,
    /// The angle is the sun's altitude, solved through the hour-angle formula.
    /// Undefined when the sun never climbs that high.
    SunAltitude,
}

/// Fallback for Fajr and Isha when twilight never ends (or ends implausibly late).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighLatitudeRule {
    /// Leave undefined times undefined.
    None,
    /// Fajr/Isha no further than half the night from sunrise/sunset.
    MiddleOfNight,
    /// One seventh of the night.
    OneSeventh,
    /// angle/60 of the night.
    AngleBased,
}

impl Default for HighLatitudeRule {
    fn default() -> Self {
        Self::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_ids_roundtrip() {
        for m in CalculationMethod::ALL {
            assert_eq!(CalculationMethod::from_id(m.id()).unwrap(), m);
        }
        assert!(CalculationMethod::from_id(0).is_err());
        assert!(CalculationMethod::from_id(8).is_err());
    }

    #[test]
    fn test_only_umm_al_qura_uses_fixed_isha() {
        let fixed: Vec<_> = CalculationMethod::ALL.into_iter().filter(|m| m.uses_fixed_isha()).collect();
        assert_eq!(fixed, vec![CalculationMethod::UmmAlQura]);
    }

    #[test]
    fn test_description() {
        assert_eq!(CalculationMethod::MuslimWorldLeague.description(), "Fajr: 18°, Isha: 17°");
        assert_eq!(CalculationMethod::Egyptian.description(), "Fajr: 19.5°, Isha: 17.5°");
        assert_eq!(
            CalculationMethod::UmmAlQura.description(),
            "Fajr: 18.5°, Isha: 90min after Maghrib"
        );
    }

    #[test]
    fn test_asr_model_default() {
        assert_eq!(AsrModel::default(), AsrModel::ShadowAngle);
    }

    #[test]
    fn test_asr_factor() {
        assert_eq!(Madhab::default().asr_shadow_factor(), 1.0);
        assert_eq!(Madhab::Hanafi.asr_shadow_factor(), 2.0);
    }
}
