//! Low-order solar ephemeris from the day of the year.
//!
//! A single-harmonic model, good to a few minutes for prayer
//! times, not a general ephemeris.

use chrono::{Datelike, NaiveDate};
use std::f64::consts::PI;

use crate::math::{dcos, dsin, fix_angle};

/// Solar quantities for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Equation of time in minutes (apparent minus mean solar time).
    pub equation_of_time: f64,
    /// Declination in radians.
    pub declination: f64,
    /// Apparent ecliptic longitude in degrees.
    pub ecliptic_longitude: f64,
}

impl SolarPosition {
    /// Computes the position for a local calendar date.
    pub fn for_date(date: NaiveDate) -> Self {
        Self::for_day_of_year(date.ordinal())
    }

    /// Computes the position for a day-of-year ordinal (January 1 = 1).
    pub fn for_day_of_year(day: u32) -> Self {
        let d = day as f64;

        let g = fix_angle(357.529 + 0.98560028 * d); // mean anomaly
        let q = fix_angle(280.459 + 0.98564736 * d); // mean longitude
        let l = fix_angle(q + 1.915 * dsin(g) + 0.020 * dsin(2.0 * g));

        let equation_of_time = 229.8
            * (0.000075 + 0.001868 * dcos(q)
                - 0.032077 * dsin(q)
                - 0.014615 * dcos(2.0 * q)
                - 0.040849 * dsin(2.0 * q));

        let declination = 0.4093 * (2.0 * PI * (284.0 + d) / 365.0).sin();

        Self {
            equation_of_time,
            declination,
            ecliptic_longitude: l,
        }
    }
}
