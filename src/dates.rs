//! Trading-calendar date helpers
//!
//! Week bucketing uses the Friday on or after a trading date, so
//! holiday-shortened weeks land in the same bucket as their neighbors
//! without any holiday table.

use chrono::{Datelike, Duration, NaiveDate};

/// The Friday on or after `date`; a Friday maps to itself
pub fn next_friday(date: NaiveDate) -> NaiveDate {
    let weekday = date.weekday().num_days_from_monday();
    date + Duration::days(((11 - weekday) % 7) as i64)
}

/// The Friday on or before `date`; a Friday maps to itself
pub fn previous_friday(date: NaiveDate) -> NaiveDate {
    let weekday = date.weekday().num_days_from_monday();
    date - Duration::days(((weekday + 3) % 7) as i64)
}

/// The calendar date `years` earlier, clamping Feb 29 to Feb 28
pub fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    let year = date.year() - years as i32;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date)
}
