//! Local time-of-day stamps for log records.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

/// Current local time of day as `HH:MM:SS.mmm`.
///
/// The date and zone marker are dropped; only the wall-clock reading in the
/// host timezone remains.
#[must_use]
pub fn now_local_time() -> String {
    format_time_of_day(&Local::now())
}

/// Format the time-of-day part of `at` as `HH:MM:SS.mmm`.
#[must_use]
pub fn format_time_of_day<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%H:%M:%S%.3f").to_string()
}
