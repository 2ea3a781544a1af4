//! Core value types shared across the miqat crates.

pub mod clock;
pub mod error;
pub mod geo;
pub mod method;
pub mod prayer;

pub use error::MiqatError;
pub use geo::{GeoCoordinate, QiblaBearing};
pub use method::{AsrModel, CalculationMethod, HighLatitudeRule, IshaRule, Madhab, MethodParams};
pub use prayer::{AdjustmentSet, MonthlySchedule, Prayer, PrayerSchedule, UNDEFINED_TIME};
