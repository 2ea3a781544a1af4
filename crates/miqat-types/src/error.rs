use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prayer::Prayer;

/// Errors from miqat operations.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum MiqatError {
    /// The sun never reaches the altitude that defines this prayer on this date.
    #[error("{prayer} has no valid time on {date} at this latitude")]
    UndefinedTime { prayer: Prayer, date: NaiveDate },

    /// Latitude or longitude outside the valid range (or not a number).
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Compass heading missing or not finite.
    #[error("Compass heading unavailable")]
    HeadingUnavailable,

    /// Year/month pair that does not name a Gregorian month.
    #[error("Invalid calendar month {year}-{month}")]
    InvalidDate { year: i32, month: u32 },

    /// Date outside the supported Hijri conversion range.
    #[error("Date {date} is out of supported range ({min} to {max})")]
    DateOutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Remote lookup failure.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Local geolocation database failure.
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl MiqatError {
    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }

    /// Creates an `UndefinedTime` error.
    pub fn undefined(prayer: Prayer, date: NaiveDate) -> Self {
        Self::UndefinedTime { prayer, date }
    }

    /// Returns true for the per-prayer domain error.
    pub fn is_undefined_time(&self) -> bool {
        matches!(self, Self::UndefinedTime { .. })
    }
}
