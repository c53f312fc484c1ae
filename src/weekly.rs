//! Weekly aggregation of daily quotes
//!
//! Buckets an ascending daily series into trading weeks keyed by the
//! Friday on or after each trading date, so short holiday weeks need no
//! special handling.

use chrono::NaiveDate;
use itertools::Itertools;

use crate::dates::next_friday;
use crate::{DailyQuote, WeeklyQuote};

/// Convert an ascending-by-date daily sequence into ascending weekly quotes
///
/// Within a week the first day seeds the open, high/low are running
/// extrema, the last day sets the close, and volume is summed. Adjusted
/// extrema skip days without an adjusted close; the week's adjusted close
/// follows the last day.
pub fn aggregate_to_weekly(quotes: &[DailyQuote]) -> Vec<WeeklyQuote> {
    quotes
        .iter()
        .chunk_by(|quote| next_friday(quote.date))
        .into_iter()
        .filter_map(|(week_ending, days)| aggregate_week(week_ending, days))
        .collect()
}

fn aggregate_week<'a>(
    week_ending: NaiveDate,
    mut days: impl Iterator<Item = &'a DailyQuote>,
) -> Option<WeeklyQuote> {
    let first = days.next()?;

    let mut week = WeeklyQuote {
        symbol: first.symbol.clone(),
        week_ending,
        open: first.open(),
        high: first.high(),
        low: first.low(),
        close: first.close,
        volume: first.volume,
        adjusted_high: first.adjusted_high(),
        adjusted_low: first.adjusted_low(),
        adjusted_close: first.adjusted_close,
    };

    for day in days {
        week.high = week.high.max(day.high());
        week.low = week.low.min(day.low());
        week.close = day.close;
        week.volume += day.volume;
        week.adjusted_high = merge_max(week.adjusted_high, day.adjusted_high());
        week.adjusted_low = merge_min(week.adjusted_low, day.adjusted_low());
        week.adjusted_close = day.adjusted_close;
    }

    Some(week)
}

fn merge_max(acc: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (acc, value) {
        (Some(a), Some(v)) => Some(a.max(v)),
        (acc, None) => acc,
        (None, value) => value,
    }
}

fn merge_min(acc: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (acc, value) {
        (Some(a), Some(v)) => Some(a.min(v)),
        (acc, None) => acc,
        (None, value) => value,
    }
}
