//! Calendar dates to day indices
//!
//! The scoring core takes the day as a parameter; this is the only place
//! that reads the system clock.

use crate::domain::types::DayIndex;
use anyhow::Context;
use chrono::{Datelike, Local, NaiveDate};

/// Day index for a date (day of year minus one).
///
/// Dec 31 of a leap year has ordinal index 365 and is mapped to 364, the
/// last day of the yearly series.
pub fn day_index_for(date: NaiveDate) -> DayIndex {
    DayIndex::saturating(date.ordinal0())
}

/// Day index for today in local time
pub fn today() -> DayIndex {
    day_index_for(Local::now().date_naive())
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}
