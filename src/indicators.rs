//! Stateless indicator calculators over daily quote sequences
//!
//! Every calculator consumes an ascending-by-date slice of [`DailyQuote`]
//! and produces one scalar (or one small struct). None of them re-sort or
//! mutate their input, and none perform I/O.
//!
//! Available calculators:
//! - Moving averages: SMA, EMA (cumulative and single-step)
//! - Volatility: average true range, average percent range
//! - Volume: average daily volume, up/down volume ratio
//! - Relative: beta, relative-strength percent of peak
//! - Extremes: max price, price range

use std::collections::BTreeMap;

use chrono::NaiveDate;
use statrs::statistics::Statistics;
use thiserror::Error;
use tracing::warn;

use crate::dates::years_before;
use crate::{DailyQuote, PriceRange};

/// Errors for calculator inputs that cannot produce a meaningful result
#[derive(Debug, Error)]
pub enum IndicatorError {
    #[error("quote sequence is empty")]
    EmptySeries,

    #[error("lookback period must be at least 1")]
    InvalidPeriod,

    #[error("at least {required} quotes required, got {actual}")]
    TooFewQuotes { required: usize, actual: usize },

    #[error("only {matched} day-pairs matched the comparison series, at least 2 required")]
    InsufficientOverlap { matched: usize },

    #[error("comparison series has zero variance")]
    ZeroVariance,
}

/// Ratio reported when the window has zero down volume
pub const UP_DOWN_RATIO_CAP: f64 = i32::MAX as f64;

// =============================================================================
// Moving Averages
// =============================================================================

/// Simple moving average of closes over the last `days` sessions
///
/// A sequence shorter than `days` silently averages everything available.
pub fn sma(quotes: &[DailyQuote], days: usize) -> Result<f64, IndicatorError> {
    if quotes.is_empty() {
        return Err(IndicatorError::EmptySeries);
    }
    if days == 0 {
        return Err(IndicatorError::InvalidPeriod);
    }

    let lookback = quotes.len().min(days);
    let sum: f64 = quotes[quotes.len() - lookback..]
        .iter()
        .map(|quote| quote.close)
        .sum();

    Ok(sum / lookback as f64)
}

/// Exponential moving average of closes over the whole sequence
///
/// Folds [`ema_step`] left to right, seeded at zero rather than the first
/// close. The result therefore sits below the series until enough periods
/// accumulate; downstream consumers rely on these exact values.
pub fn ema(quotes: &[DailyQuote], days: usize) -> Result<f64, IndicatorError> {
    if quotes.is_empty() {
        return Err(IndicatorError::EmptySeries);
    }
    if days == 0 {
        return Err(IndicatorError::InvalidPeriod);
    }

    Ok(quotes
        .iter()
        .fold(0.0, |previous, quote| ema_step(previous, quote.close, days)))
}

/// One EMA update: smooth `close` into `previous_ema` with period `days`
pub fn ema_step(previous_ema: f64, close: f64, days: usize) -> f64 {
    let multiplier = 2.0 / (days as f64 + 1.0);
    (close - previous_ema) * multiplier + previous_ema
}

// =============================================================================
// Volatility
// =============================================================================

/// A single day's true range against the previous session's close
fn day_true_range(quote: &DailyQuote, previous_close: f64) -> f64 {
    let high_low = quote.high() - quote.low();
    let high_close = (quote.high() - previous_close).abs();
    let low_close = (quote.low() - previous_close).abs();
    high_low.max(high_close).max(low_close)
}

/// Average true range over the most recent `days` day-pairs
///
/// Each evaluated day needs its predecessor, so the window is
/// `min(len - 1, days)` pairs. Returns the arithmetic mean of the absolute
/// ranges; see [`average_percent_range`] for the close-normalized variant.
pub fn average_true_range(quotes: &[DailyQuote], days: usize) -> Result<f64, IndicatorError> {
    if quotes.len() < 2 {
        return Err(IndicatorError::TooFewQuotes {
            required: 2,
            actual: quotes.len(),
        });
    }
    if days == 0 {
        return Err(IndicatorError::InvalidPeriod);
    }

    let lookback = (quotes.len() - 1).min(days);
    let start = quotes.len() - lookback;
    let sum: f64 = (start..quotes.len())
        .map(|i| day_true_range(&quotes[i], quotes[i - 1].close))
        .sum();

    Ok(sum / lookback as f64)
}

/// Average true range with each day's range divided by that day's close
pub fn average_percent_range(quotes: &[DailyQuote], days: usize) -> Result<f64, IndicatorError> {
    if quotes.len() < 2 {
        return Err(IndicatorError::TooFewQuotes {
            required: 2,
            actual: quotes.len(),
        });
    }
    if days == 0 {
        return Err(IndicatorError::InvalidPeriod);
    }

    let lookback = (quotes.len() - 1).min(days);
    let start = quotes.len() - lookback;
    let sum: f64 = (start..quotes.len())
        .map(|i| day_true_range(&quotes[i], quotes[i - 1].close) / quotes[i].close)
        .sum();

    Ok(sum / lookback as f64)
}

// =============================================================================
// Volume
// =============================================================================

/// Average daily share volume over the last `days` sessions
///
/// Integer mean with truncating division.
pub fn average_volume(quotes: &[DailyQuote], days: usize) -> Result<u64, IndicatorError> {
    if quotes.is_empty() {
        return Err(IndicatorError::EmptySeries);
    }
    if days == 0 {
        return Err(IndicatorError::InvalidPeriod);
    }

    let lookback = quotes.len().min(days);
    let sum: u64 = quotes[quotes.len() - lookback..]
        .iter()
        .map(|quote| quote.volume)
        .sum();

    Ok(sum / lookback as u64)
}

/// Up volume divided by down volume over the most recent `days` day-pairs
///
/// A day is "up" when its close is strictly above the previous close; ties
/// count as down. Whenever the window's down volume is zero the result is
/// [`UP_DOWN_RATIO_CAP`], never a division error.
pub fn up_down_volume_ratio(quotes: &[DailyQuote], days: usize) -> Result<f64, IndicatorError> {
    if quotes.len() < 2 {
        return Err(IndicatorError::TooFewQuotes {
            required: 2,
            actual: quotes.len(),
        });
    }
    if days == 0 {
        return Err(IndicatorError::InvalidPeriod);
    }

    let lookback = (quotes.len() - 1).min(days);
    let start = quotes.len() - lookback;

    let mut up_volume: u64 = 0;
    let mut down_volume: u64 = 0;
    for i in start..quotes.len() {
        if quotes[i].close > quotes[i - 1].close {
            up_volume += quotes[i].volume;
        } else {
            down_volume += quotes[i].volume;
        }
    }

    if down_volume == 0 {
        return Ok(UP_DOWN_RATIO_CAP);
    }

    Ok(up_volume as f64 / down_volume as f64)
}

// =============================================================================
// Relative Strength
// =============================================================================

/// Beta of the stock's daily percent changes against a comparison index
///
/// Only dates present in the comparison map participate; a date with no
/// comparison quote is logged and skipped, and the next matched day's
/// percent change is taken against the last matched day. The first matched
/// day has no predecessor and contributes no pair.
pub fn beta(
    quotes: &[DailyQuote],
    comparison: &BTreeMap<NaiveDate, DailyQuote>,
) -> Result<f64, IndicatorError> {
    let mut stock_changes: Vec<f64> = Vec::new();
    let mut comparison_changes: Vec<f64> = Vec::new();
    let mut previous: Option<(&DailyQuote, &DailyQuote)> = None;

    for quote in quotes {
        let comparison_quote = match comparison.get(&quote.date) {
            Some(found) => found,
            None => {
                warn!("Missing comparison quote for {}", quote.date);
                continue;
            }
        };

        if let Some((previous_stock, previous_comparison)) = previous {
            stock_changes.push(quote.percent_change(previous_stock));
            comparison_changes.push(comparison_quote.percent_change(previous_comparison));
        }
        previous = Some((quote, comparison_quote));
    }

    if stock_changes.len() < 2 {
        return Err(IndicatorError::InsufficientOverlap {
            matched: stock_changes.len(),
        });
    }

    let variance = comparison_changes.as_slice().population_variance();
    if variance == 0.0 {
        return Err(IndicatorError::ZeroVariance);
    }

    let covariance = stock_changes
        .as_slice()
        .population_covariance(comparison_changes.as_slice());

    Ok(covariance / variance)
}

/// Where the current stock/index ratio sits inside its `years`-year range,
/// as a percent of that range
///
/// The ratio for a date with no comparison quote is 0.0, which can pull the
/// range minimum down; callers accept that distortion. A flat ratio range
/// yields 0.0.
pub fn relative_strength_percent_of_peak(
    quotes: &[DailyQuote],
    comparison: &BTreeMap<NaiveDate, DailyQuote>,
    years: u32,
) -> Result<f64, IndicatorError> {
    let last = quotes.last().ok_or(IndicatorError::EmptySeries)?;
    if years == 0 {
        return Err(IndicatorError::InvalidPeriod);
    }

    let current_ratio = rs_ratio(last, comparison);
    let filter_date = years_before(last.date, years);

    let mut max_ratio: f64 = 0.0;
    let mut min_ratio: f64 = f64::MAX;
    for quote in quotes {
        if quote.date <= filter_date {
            continue;
        }
        let ratio = rs_ratio(quote, comparison);
        max_ratio = max_ratio.max(ratio);
        min_ratio = min_ratio.min(ratio);
    }

    if max_ratio == min_ratio {
        return Ok(0.0);
    }

    Ok((current_ratio - min_ratio) / (max_ratio - min_ratio) * 100.0)
}

fn rs_ratio(quote: &DailyQuote, comparison: &BTreeMap<NaiveDate, DailyQuote>) -> f64 {
    match comparison.get(&quote.date) {
        Some(comparison_quote) => quote.close / comparison_quote.close * 100.0,
        None => 0.0,
    }
}

// =============================================================================
// Price Extremes
// =============================================================================

/// Maximum adjusted high across the sequence
///
/// `None` when the sequence is empty or no quote carries adjusted data.
pub fn max_price(quotes: &[DailyQuote]) -> Option<f64> {
    quotes
        .iter()
        .filter_map(|quote| quote.adjusted_high())
        .fold(None, |max, value| {
            Some(max.map_or(value, |m: f64| m.max(value)))
        })
}

/// Adjusted-price extrema with the dates they occurred
///
/// Single pass over adjusted highs/lows; the earliest occurrence wins when
/// an extreme repeats. `None` when the sequence is empty or no quote
/// carries adjusted data.
pub fn price_range(quotes: &[DailyQuote]) -> Option<PriceRange> {
    let mut result: Option<PriceRange> = None;

    for quote in quotes {
        let (high, low) = match (quote.adjusted_high(), quote.adjusted_low()) {
            (Some(high), Some(low)) => (high, low),
            _ => continue,
        };

        match &mut result {
            None => {
                result = Some(PriceRange {
                    symbol: quote.symbol.clone(),
                    max_price: high,
                    max_date: quote.date,
                    min_price: low,
                    min_date: quote.date,
                });
            }
            Some(range) => {
                if high > range.max_price {
                    range.max_price = high;
                    range.max_date = quote.date;
                }
                if low < range.min_price {
                    range.min_price = low;
                    range.min_date = quote.date;
                }
            }
        }
    }

    result
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Symbol;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(offset: u64) -> NaiveDate {
        date(2014, 1, 2) + chrono::Duration::days(offset as i64)
    }

    fn quote_on(d: NaiveDate, close: f64, volume: u64) -> DailyQuote {
        DailyQuote::new_unchecked(
            Symbol::new("TEST"),
            d,
            Some(close),
            Some(close + 1.0),
            Some(close - 1.0),
            close,
            Some(close),
            volume,
        )
    }

    fn series(closes: &[f64]) -> Vec<DailyQuote> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| quote_on(day(i as u64), close, 1_000))
            .collect()
    }

    fn comparison_of(quotes: &[DailyQuote], divisor: f64) -> BTreeMap<NaiveDate, DailyQuote> {
        quotes
            .iter()
            .map(|q| (q.date, quote_on(q.date, q.close / divisor, q.volume)))
            .collect()
    }

    #[test]
    fn test_sma_window() {
        let quotes = series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_relative_eq!(sma(&quotes, 3).unwrap(), 9.0);
    }

    #[test]
    fn test_sma_short_series_uses_all_data() {
        let quotes = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_relative_eq!(sma(&quotes, 50).unwrap(), 3.0);
    }

    #[test]
    fn test_sma_empty_series_fails() {
        assert!(matches!(sma(&[], 50), Err(IndicatorError::EmptySeries)));
    }

    #[test]
    fn test_sma_zero_period_fails() {
        let quotes = series(&[1.0]);
        assert!(matches!(
            sma(&quotes, 0),
            Err(IndicatorError::InvalidPeriod)
        ));
    }

    #[test]
    fn test_ema_single_quote_reflects_zero_seed() {
        let quotes = series(&[100.0]);
        // multiplier 0.5, seeded at 0: (100 - 0) * 0.5
        assert_relative_eq!(ema(&quotes, 3).unwrap(), 50.0);
    }

    #[test]
    fn test_ema_sits_below_constant_series_during_warmup() {
        let quotes = series(&[100.0, 100.0, 100.0]);
        let value = ema(&quotes, 21).unwrap();
        assert!(value > 0.0 && value < 100.0);
    }

    #[test]
    fn test_ema_matches_repeated_steps_for_every_prefix() {
        let quotes = series(&[10.0, 11.5, 9.8, 12.2, 13.0, 12.4, 14.1]);
        let mut stepped = 0.0;
        for i in 0..quotes.len() {
            stepped = ema_step(stepped, quotes[i].close, 5);
            assert_relative_eq!(ema(&quotes[..=i], 5).unwrap(), stepped);
        }
    }

    #[test]
    fn test_ema_step() {
        // multiplier 2/22: (210 - 205) / 11 + 205
        assert_relative_eq!(
            ema_step(205.0, 210.0, 21),
            205.0 + 5.0 / 11.0,
            epsilon = 1e-12
        );
    }

    fn ohlc(d: NaiveDate, high: f64, low: f64, close: f64) -> DailyQuote {
        DailyQuote::new_unchecked(
            Symbol::new("TEST"),
            d,
            Some(close),
            Some(high),
            Some(low),
            close,
            Some(close),
            1_000,
        )
    }

    #[test]
    fn test_average_true_range() {
        let quotes = vec![
            ohlc(day(0), 10.0, 9.0, 9.5),
            // max(1.0, |11 - 9.5|, |10 - 9.5|) = 1.5
            ohlc(day(1), 11.0, 10.0, 10.5),
            // max(1.0, |12 - 10.5|, |11 - 10.5|) = 1.5
            ohlc(day(2), 12.0, 11.0, 11.5),
            // max(0.4, |11.6 - 11.5|, |11.2 - 11.5|) = 0.4
            ohlc(day(3), 11.6, 11.2, 11.3),
        ];

        assert_relative_eq!(average_true_range(&quotes, 2).unwrap(), 0.95, epsilon = 1e-12);
        // Window larger than available pairs uses all three
        assert_relative_eq!(
            average_true_range(&quotes, 14).unwrap(),
            (1.5 + 1.5 + 0.4) / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_average_true_range_ignores_quotes_before_window() {
        let quotes = series(&[50.0, 60.0, 40.0, 55.0, 10.0, 10.5, 10.2, 10.8]);
        let full = average_true_range(&quotes, 3).unwrap();
        let suffix = average_true_range(&quotes[4..], 3).unwrap();
        assert_relative_eq!(full, suffix);
    }

    #[test]
    fn test_average_true_range_requires_two_quotes() {
        let quotes = series(&[100.0]);
        assert!(matches!(
            average_true_range(&quotes, 14),
            Err(IndicatorError::TooFewQuotes {
                required: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_average_percent_range() {
        let quotes = vec![
            ohlc(day(0), 10.0, 9.0, 9.5),
            // true range 1.5 against the 9.5 close
            ohlc(day(1), 11.0, 10.0, 10.0),
            // close gaps to 12, so |high - previous close| = 2 dominates
            ohlc(day(2), 12.0, 11.0, 12.0),
        ];
        assert_relative_eq!(
            average_percent_range(&quotes, 2).unwrap(),
            (1.5 / 10.0 + 2.0 / 12.0) / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_average_volume() {
        let quotes: Vec<DailyQuote> = [100_u64, 200, 300]
            .iter()
            .enumerate()
            .map(|(i, &v)| quote_on(day(i as u64), 10.0, v))
            .collect();

        assert_eq!(average_volume(&quotes, 2).unwrap(), 250);
        assert_eq!(average_volume(&quotes, 50).unwrap(), 200);
    }

    #[test]
    fn test_average_volume_truncates() {
        let quotes: Vec<DailyQuote> = [3_u64, 4]
            .iter()
            .enumerate()
            .map(|(i, &v)| quote_on(day(i as u64), 10.0, v))
            .collect();

        assert_eq!(average_volume(&quotes, 2).unwrap(), 3);
    }

    #[test]
    fn test_up_down_volume_ratio() {
        let quotes = vec![
            quote_on(day(0), 100.0, 5),
            quote_on(day(1), 101.0, 10),
            quote_on(day(2), 100.0, 20),
            quote_on(day(3), 102.0, 30),
        ];
        // up = 10 + 30, down = 20
        assert_relative_eq!(up_down_volume_ratio(&quotes, 50).unwrap(), 2.0);
    }

    #[test]
    fn test_up_down_ties_count_as_down() {
        let quotes = series(&[100.0, 100.0, 100.0, 100.0]);
        assert_relative_eq!(up_down_volume_ratio(&quotes, 50).unwrap(), 0.0);
    }

    #[test]
    fn test_up_down_capped_when_no_down_volume() {
        let quotes = series(&[100.0, 101.0, 102.0, 103.0]);
        assert_relative_eq!(up_down_volume_ratio(&quotes, 50).unwrap(), UP_DOWN_RATIO_CAP);
    }

    #[test]
    fn test_up_down_capped_when_window_has_no_volume_at_all() {
        let quotes: Vec<DailyQuote> = [100.0, 100.0, 100.0]
            .iter()
            .enumerate()
            .map(|(i, &close)| quote_on(day(i as u64), close, 0))
            .collect();

        assert_relative_eq!(up_down_volume_ratio(&quotes, 50).unwrap(), UP_DOWN_RATIO_CAP);
    }

    #[test]
    fn test_beta_of_proportional_series_is_one() {
        let quotes = series(&[100.0, 102.0, 101.0, 103.0, 105.0]);
        let comparison = comparison_of(&quotes, 2.0);
        assert_relative_eq!(beta(&quotes, &comparison).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_beta_of_doubled_changes_is_two() {
        // Stock changes exactly double the comparison changes
        let comparison_closes = [100.0, 101.0, 98.98, 101.9494];
        let stock_closes = [100.0, 102.0, 97.92, 103.7952];

        let quotes = series(&stock_closes);
        let comparison: BTreeMap<NaiveDate, DailyQuote> = comparison_closes
            .iter()
            .enumerate()
            .map(|(i, &close)| (day(i as u64), quote_on(day(i as u64), close, 1_000)))
            .collect();

        assert_relative_eq!(beta(&quotes, &comparison).unwrap(), 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_beta_skips_missing_comparison_dates() {
        let quotes = series(&[100.0, 102.0, 101.0, 103.0, 105.0]);
        let mut comparison = comparison_of(&quotes, 2.0);
        comparison.remove(&day(2));

        // Proportionality survives the gap, so beta is still 1
        assert_relative_eq!(beta(&quotes, &comparison).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_beta_insufficient_overlap() {
        let quotes = series(&[100.0, 102.0, 101.0, 103.0]);
        let mut comparison = comparison_of(&quotes, 2.0);
        comparison.remove(&day(2));
        comparison.remove(&day(3));

        assert!(matches!(
            beta(&quotes, &comparison),
            Err(IndicatorError::InsufficientOverlap { matched: 1 })
        ));
    }

    #[test]
    fn test_beta_zero_comparison_variance() {
        let quotes = series(&[100.0, 102.0, 101.0, 103.0]);
        let comparison: BTreeMap<NaiveDate, DailyQuote> = quotes
            .iter()
            .map(|q| (q.date, quote_on(q.date, 50.0, 1_000)))
            .collect();

        assert!(matches!(
            beta(&quotes, &comparison),
            Err(IndicatorError::ZeroVariance)
        ));
    }

    #[test]
    fn test_relative_strength_current_at_peak() {
        let quotes = series(&[100.0, 110.0, 120.0]);
        let comparison: BTreeMap<NaiveDate, DailyQuote> = quotes
            .iter()
            .map(|q| (q.date, quote_on(q.date, 50.0, 1_000)))
            .collect();

        assert_relative_eq!(
            relative_strength_percent_of_peak(&quotes, &comparison, 1).unwrap(),
            100.0
        );
    }

    #[test]
    fn test_relative_strength_mid_range() {
        let quotes = series(&[100.0, 120.0, 110.0]);
        let comparison: BTreeMap<NaiveDate, DailyQuote> = quotes
            .iter()
            .map(|q| (q.date, quote_on(q.date, 50.0, 1_000)))
            .collect();

        // Ratios 200 / 240 / 220: (220 - 200) / (240 - 200)
        assert_relative_eq!(
            relative_strength_percent_of_peak(&quotes, &comparison, 1).unwrap(),
            50.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_relative_strength_flat_ratio_is_zero() {
        let quotes = series(&[100.0, 100.0, 100.0]);
        let comparison = comparison_of(&quotes, 2.0);
        assert_relative_eq!(
            relative_strength_percent_of_peak(&quotes, &comparison, 1).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_relative_strength_missing_comparison_drags_minimum_down() {
        let quotes = series(&[100.0, 120.0, 110.0]);
        let mut comparison: BTreeMap<NaiveDate, DailyQuote> = quotes
            .iter()
            .map(|q| (q.date, quote_on(q.date, 50.0, 1_000)))
            .collect();
        comparison.remove(&day(0));

        // Ratios 0 / 240 / 220: (220 - 0) / (240 - 0)
        assert_relative_eq!(
            relative_strength_percent_of_peak(&quotes, &comparison, 1).unwrap(),
            220.0 / 240.0 * 100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_relative_strength_excludes_quotes_before_filter_date() {
        let mut quotes = vec![quote_on(date(2012, 8, 1), 10.0, 1_000)];
        quotes.push(quote_on(date(2014, 8, 4), 100.0, 1_000));
        quotes.push(quote_on(date(2014, 8, 5), 120.0, 1_000));
        quotes.push(quote_on(date(2014, 8, 6), 110.0, 1_000));

        let comparison: BTreeMap<NaiveDate, DailyQuote> = quotes
            .iter()
            .map(|q| (q.date, quote_on(q.date, 50.0, 1_000)))
            .collect();

        // The 2012 quote's ratio of 20 is outside the one-year window
        assert_relative_eq!(
            relative_strength_percent_of_peak(&quotes, &comparison, 1).unwrap(),
            50.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_relative_strength_zero_years_fails() {
        let quotes = series(&[100.0, 110.0]);
        let comparison = comparison_of(&quotes, 2.0);
        assert!(matches!(
            relative_strength_percent_of_peak(&quotes, &comparison, 0),
            Err(IndicatorError::InvalidPeriod)
        ));
    }

    #[test]
    fn test_max_price_uses_adjusted_high() {
        let mut quotes = series(&[100.0, 105.0, 102.0]);
        // Halve every adjustment so adjusted highs diverge from raw highs
        for q in &mut quotes {
            q.adjusted_close = Some(q.close / 2.0);
        }

        // Largest adjusted high: 52.5 / 105 * 106
        assert_relative_eq!(max_price(&quotes).unwrap(), 53.0);
    }

    #[test]
    fn test_max_price_empty_is_none() {
        assert_eq!(max_price(&[]), None);
    }

    #[test]
    fn test_max_price_without_adjusted_data_is_none() {
        let mut quotes = series(&[100.0, 105.0]);
        for q in &mut quotes {
            q.adjusted_close = None;
        }
        assert_eq!(max_price(&quotes), None);
    }

    #[test]
    fn test_price_range() {
        let quotes = vec![
            ohlc(day(0), 96.0, 90.0, 95.0),
            ohlc(day(1), 99.0, 94.0, 98.0),
            ohlc(day(2), 97.0, 88.0, 92.0),
        ];

        let range = price_range(&quotes).unwrap();
        // adjusted_close == close here, so adjusted extrema equal raw extrema
        assert_relative_eq!(range.max_price, 99.0);
        assert_eq!(range.max_date, day(1));
        assert_relative_eq!(range.min_price, 88.0);
        assert_eq!(range.min_date, day(2));
    }

    #[test]
    fn test_price_range_single_quote() {
        let quotes = vec![ohlc(day(0), 96.0, 90.0, 95.0)];
        let range = price_range(&quotes).unwrap();

        assert_relative_eq!(range.max_price, 96.0);
        assert_relative_eq!(range.min_price, 90.0);
        assert_eq!(range.max_date, day(0));
        assert_eq!(range.min_date, day(0));
    }

    #[test]
    fn test_price_range_keeps_earliest_occurrence_on_ties() {
        let quotes = vec![
            ohlc(day(0), 99.0, 90.0, 95.0),
            ohlc(day(1), 99.0, 90.0, 95.0),
        ];

        let range = price_range(&quotes).unwrap();
        assert_eq!(range.max_date, day(0));
        assert_eq!(range.min_date, day(0));
    }

    #[test]
    fn test_price_range_empty_is_none() {
        assert_eq!(price_range(&[]), None);
    }
}
