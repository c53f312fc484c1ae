//! Core data types used across the screening engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for daily quote data
#[derive(Debug, Error)]
pub enum QuoteValidationError {
    #[error("close ({0}) must be positive")]
    NonPositiveClose(f64),

    #[error("high ({high}) must be >= low ({low})")]
    HighLessThanLow { high: f64, low: f64 },

    #[error("{field} ({value}) must be positive")]
    NonPositivePrice { field: &'static str, value: f64 },
}

/// Stock ticker symbol using Arc<str> for cheap cloning
///
/// Symbols are cloned into every weekly quote and pattern result.
/// Using Arc<str> instead of String reduces heap allocations from O(n) to O(1) per clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(#[serde(with = "arc_str_serde")] std::sync::Arc<str>);

/// Custom serde for Arc<str>
mod arc_str_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::sync::Arc;

    pub fn serialize<S>(value: &Arc<str>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Arc<str>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Arc::from(s.as_str()))
    }
}

impl Symbol {
    pub fn new(s: impl AsRef<str>) -> Self {
        Symbol(std::sync::Arc::from(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One trading day of price and volume data for a symbol
///
/// The date carries no time-of-day; a sequence of quotes is meaningful only
/// when sorted ascending by date, and every calculator assumes that order.
/// Open, high, low, and adjusted close stay absent when the data source did
/// not supply them; the accessor methods apply the defaulting rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyQuote {
    pub symbol: Symbol,
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub adjusted_close: Option<f64>,
    pub volume: u64,
}

impl DailyQuote {
    /// Create a new daily quote with validation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: Symbol,
        date: NaiveDate,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: f64,
        adjusted_close: Option<f64>,
        volume: u64,
    ) -> Result<Self, QuoteValidationError> {
        let quote = Self {
            symbol,
            date,
            open,
            high,
            low,
            close,
            adjusted_close,
            volume,
        };
        quote.validate()?;
        Ok(quote)
    }

    /// Create a quote without validation (for trusted sources or when validation is done separately)
    #[allow(clippy::too_many_arguments)]
    pub fn new_unchecked(
        symbol: Symbol,
        date: NaiveDate,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: f64,
        adjusted_close: Option<f64>,
        volume: u64,
    ) -> Self {
        Self {
            symbol,
            date,
            open,
            high,
            low,
            close,
            adjusted_close,
            volume,
        }
    }

    /// Validate the quote data
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        if self.close <= 0.0 {
            return Err(QuoteValidationError::NonPositiveClose(self.close));
        }

        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("adjusted close", self.adjusted_close),
        ] {
            if let Some(value) = value {
                if value <= 0.0 {
                    return Err(QuoteValidationError::NonPositivePrice { field, value });
                }
            }
        }

        if let (Some(high), Some(low)) = (self.high, self.low) {
            if high < low {
                return Err(QuoteValidationError::HighLessThanLow { high, low });
            }
        }

        Ok(())
    }

    /// Check if the quote is valid without returning detailed error
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Session open, defaulting to the close when absent
    pub fn open(&self) -> f64 {
        self.open.unwrap_or(self.close)
    }

    /// Session high, defaulting to the close when absent
    pub fn high(&self) -> f64 {
        self.high.unwrap_or(self.close)
    }

    /// Session low, defaulting to the close when absent
    pub fn low(&self) -> f64 {
        self.low.unwrap_or(self.close)
    }

    /// High scaled by the adjustment ratio
    ///
    /// `adjusted_close / close * high` when both are present, the adjusted
    /// close alone when the high is absent, and `None` when the quote has no
    /// adjusted close at all.
    pub fn adjusted_high(&self) -> Option<f64> {
        self.adjusted_close.map(|adjusted| match self.high {
            Some(high) => adjusted / self.close * high,
            None => adjusted,
        })
    }

    /// Low scaled by the adjustment ratio, same fallback rules as [`adjusted_high`](Self::adjusted_high)
    pub fn adjusted_low(&self) -> Option<f64> {
        self.adjusted_close.map(|adjusted| match self.low {
            Some(low) => adjusted / self.close * low,
            None => adjusted,
        })
    }

    /// Day-over-day fractional change of the close relative to a previous quote
    pub fn percent_change(&self, previous: &DailyQuote) -> f64 {
        self.close / previous.close - 1.0
    }
}

/// One trading week aggregated from daily quotes
///
/// The week-ending date is the Friday on or after the week's last trading
/// day. Adjusted aggregates are present when at least one day of the week
/// carried an adjusted close.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyQuote {
    pub symbol: Symbol,
    pub week_ending: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adjusted_high: Option<f64>,
    pub adjusted_low: Option<f64>,
    pub adjusted_close: Option<f64>,
}

/// Adjusted price extrema over a quote sequence, with the dates they occurred
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub symbol: Symbol,
    pub max_price: f64,
    pub max_date: NaiveDate,
    pub min_price: f64,
    pub min_date: NaiveDate,
}

/// A detected weeks-tight consolidation
///
/// Describes a run of `length` consecutive weeks (at least 3) whose closes
/// stayed within a tight band of the run's first weekly close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeksTight {
    pub symbol: Symbol,
    /// Week-ending date of the run's last week
    pub pattern_ending: NaiveDate,
    /// Run length in weeks
    pub length: usize,
    /// Highest weekly high across the run
    pub highest_price: f64,
    /// Lowest weekly low across the run
    pub lowest_price: f64,
    /// Largest deviation of any in-run close from the anchor close, in percent
    pub max_close_range_percent: f64,
}

impl WeeksTight {
    /// Fixed offset above the pattern high at which a breakout is bought
    pub const BUY_POINT_OFFSET: f64 = 0.10;

    /// Suggested entry price: the pattern's highest price plus the fixed offset
    pub fn buy_point(&self) -> f64 {
        self.highest_price + Self::BUY_POINT_OFFSET
    }
}
