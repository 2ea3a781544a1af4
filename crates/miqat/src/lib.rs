//! # miqat
//!
//! Islamic prayer times and qibla direction from a date and a location.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use miqat::prelude::*;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let ctx = ScheduleContext::new()
//!     .location(GeoCoordinate::new(-6.2088, 106.8456).unwrap())
//!     .method(CalculationMethod::Kemenag)
//!     .fixed_timezone(7.0);
//!
//! let today = date.prayer_times(&ctx);
//! assert_eq!(today.time_string(Prayer::Maghrib).unwrap(), "17:53");
//!
//! let qibla = compute_qibla_bearing(-6.2088, 106.8456).unwrap();
//! assert!((290.0..300.0).contains(&qibla.degrees()));
//! ```
//!
//! Enable the `async` feature for reverse geocoding and `local-geo` for
//! offline MaxMind lookups.

pub use miqat_core::*;
