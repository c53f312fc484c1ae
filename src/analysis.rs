//! Per-symbol analysis
//!
//! Runs the full indicator set and the Weeks Tight scan over one symbol's
//! daily history and collects the results into a [`SymbolReport`]. An
//! indicator that cannot be computed for this series (too short, no
//! comparison data) is reported as absent, not as a failure of the whole
//! analysis.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::config::{Config, IndicatorConfig, WeeksTightSection};
use crate::indicators::{self, IndicatorError};
use crate::patterns::WeeksTightScanner;
use crate::weekly::aggregate_to_weekly;
use crate::{DailyQuote, PriceRange, Symbol, WeeksTight};

/// Everything the analyzer derives from one symbol's history
#[derive(Debug, Clone, Serialize)]
pub struct SymbolReport {
    pub symbol: Symbol,
    pub quote_count: usize,
    pub week_count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub last_close: f64,

    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub average_true_range: Option<f64>,
    pub average_percent_range: Option<f64>,
    pub average_volume: Option<u64>,
    pub up_down_volume_ratio: Option<f64>,
    pub beta: Option<f64>,
    pub relative_strength: Option<f64>,
    pub max_price: Option<f64>,
    pub price_range: Option<PriceRange>,
    pub weeks_tight: Option<WeeksTight>,
}

/// Runs indicators and pattern scans with fixed settings
///
/// Holds no per-symbol state, so one analyzer can serve many symbols,
/// including from parallel workers.
pub struct Analyzer {
    indicators: IndicatorConfig,
    weeks_tight: WeeksTightSection,
    comparison: Option<BTreeMap<NaiveDate, DailyQuote>>,
}

impl Analyzer {
    pub fn new(config: &Config) -> Self {
        Self {
            indicators: config.indicators.clone(),
            weeks_tight: config.weeks_tight.clone(),
            comparison: None,
        }
    }

    /// Attach a comparison-index series, enabling beta and relative strength
    pub fn with_comparison(mut self, comparison: BTreeMap<NaiveDate, DailyQuote>) -> Self {
        self.comparison = Some(comparison);
        self
    }

    /// Analyze one symbol's ascending daily history
    ///
    /// Returns `None` for an empty series; individual indicators degrade to
    /// `None` with a warning instead of aborting the report.
    pub fn analyze(&self, symbol: &Symbol, quotes: &[DailyQuote]) -> Option<SymbolReport> {
        let first = quotes.first()?;
        let last = quotes.last()?;

        let weekly = aggregate_to_weekly(quotes);
        let scanner = WeeksTightScanner::new(self.weeks_tight.scanner.clone());
        let weeks_tight = scanner.scan(&weekly, self.weeks_tight.max_weeks_back);

        let beta = self
            .comparison
            .as_ref()
            .and_then(|map| log_unavailable(symbol, "beta", indicators::beta(quotes, map)));
        let relative_strength = self.comparison.as_ref().and_then(|map| {
            log_unavailable(
                symbol,
                "relative strength",
                indicators::relative_strength_percent_of_peak(
                    quotes,
                    map,
                    self.indicators.rs_years,
                ),
            )
        });

        Some(SymbolReport {
            symbol: symbol.clone(),
            quote_count: quotes.len(),
            week_count: weekly.len(),
            first_date: first.date,
            last_date: last.date,
            last_close: last.close,

            sma: log_unavailable(
                symbol,
                "SMA",
                indicators::sma(quotes, self.indicators.sma_period),
            ),
            ema: log_unavailable(
                symbol,
                "EMA",
                indicators::ema(quotes, self.indicators.ema_period),
            ),
            average_true_range: log_unavailable(
                symbol,
                "ATR",
                indicators::average_true_range(quotes, self.indicators.atr_period),
            ),
            average_percent_range: log_unavailable(
                symbol,
                "average percent range",
                indicators::average_percent_range(quotes, self.indicators.atr_period),
            ),
            average_volume: log_unavailable(
                symbol,
                "average volume",
                indicators::average_volume(quotes, self.indicators.volume_period),
            ),
            up_down_volume_ratio: log_unavailable(
                symbol,
                "up/down volume ratio",
                indicators::up_down_volume_ratio(quotes, self.indicators.up_down_period),
            ),
            beta,
            relative_strength,
            max_price: indicators::max_price(quotes),
            price_range: indicators::price_range(quotes),
            weeks_tight,
        })
    }
}

fn log_unavailable<T>(
    symbol: &Symbol,
    name: &str,
    result: Result<T, IndicatorError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{}: {} unavailable: {}", symbol, name, e);
            None
        }
    }
}
