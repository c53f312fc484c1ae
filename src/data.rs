//! Data loading and management
//!
//! Loads daily quote history for one symbol per file, in either the common
//! daily-CSV layout (`date,open,high,low,close,adj_close,volume`) or a JSON
//! array of quote records. Acquisition of the files themselves is out of
//! scope; everything here reads local data.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

use crate::{DailyQuote, Symbol};

// =============================================================================
// CSV Data Loading
// =============================================================================

/// Load one symbol's daily quotes from a CSV file
///
/// Optional price columns may be empty or `null` (gap rows in exported
/// data). Rows without a close and rows failing validation are skipped
/// with a warning; a malformed file structure is an error.
pub fn load_csv(path: impl AsRef<Path>, symbol: &Symbol) -> Result<Vec<DailyQuote>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).context("Failed to open CSV file")?;

    let mut quotes = Vec::new();
    let mut invalid_count = 0;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.context(format!("Failed to read row {}", row_idx + 1))?;

        let date_str = record.get(0).context("Missing date column")?;
        let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
            .context(format!("Failed to parse date: {}", date_str))?;

        let open = parse_optional_field(record.get(1).context("Missing open column")?)
            .context("Failed to parse open")?;
        let high = parse_optional_field(record.get(2).context("Missing high column")?)
            .context("Failed to parse high")?;
        let low = parse_optional_field(record.get(3).context("Missing low column")?)
            .context("Failed to parse low")?;
        let close = parse_optional_field(record.get(4).context("Missing close column")?)
            .context("Failed to parse close")?;
        let adjusted_close =
            parse_optional_field(record.get(5).context("Missing adj close column")?)
                .context("Failed to parse adj close")?;
        let volume = record
            .get(6)
            .context("Missing volume column")?
            .trim()
            .parse::<u64>()
            .unwrap_or(0);

        let close = match close {
            Some(close) => close,
            None => {
                invalid_count += 1;
                warn!(
                    "Skipping gap row {} in {:?}: no close price",
                    row_idx + 2,
                    path.file_name().unwrap_or_default()
                );
                continue;
            }
        };

        match DailyQuote::new(
            symbol.clone(),
            date,
            open,
            high,
            low,
            close,
            adjusted_close,
            volume,
        ) {
            Ok(quote) => quotes.push(quote),
            Err(e) => {
                invalid_count += 1;
                warn!(
                    "Skipping invalid quote at row {} in {:?}: {}",
                    row_idx + 2,
                    path.file_name().unwrap_or_default(),
                    e
                );
            }
        }
    }

    if invalid_count > 0 {
        warn!(
            "Skipped {} invalid quotes out of {} in {:?}",
            invalid_count,
            invalid_count + quotes.len(),
            path.file_name().unwrap_or_default()
        );
    }

    sort_by_date(&mut quotes);
    Ok(quotes)
}

/// Parse a price field that may be empty or `null`
fn parse_optional_field(field: &str) -> Result<Option<f64>> {
    let trimmed = field.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    Ok(Some(trimmed.parse()?))
}

// =============================================================================
// JSON Data Loading
// =============================================================================

#[derive(Debug, Deserialize)]
struct JsonQuoteRecord {
    date: NaiveDate,
    #[serde(default)]
    open: Option<f64>,
    #[serde(default)]
    high: Option<f64>,
    #[serde(default)]
    low: Option<f64>,
    close: f64,
    #[serde(default, alias = "adjusted_close")]
    adj_close: Option<f64>,
    #[serde(default)]
    volume: u64,
}

/// Load one symbol's daily quotes from a JSON array of records
pub fn load_json(path: impl AsRef<Path>, symbol: &Symbol) -> Result<Vec<DailyQuote>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).context("Failed to read JSON file")?;
    let records: Vec<JsonQuoteRecord> =
        serde_json::from_str(&contents).context("Failed to parse quote JSON")?;

    let mut quotes = Vec::new();
    let mut invalid_count = 0;

    for record in records {
        match DailyQuote::new(
            symbol.clone(),
            record.date,
            record.open,
            record.high,
            record.low,
            record.close,
            record.adj_close,
            record.volume,
        ) {
            Ok(quote) => quotes.push(quote),
            Err(e) => {
                invalid_count += 1;
                warn!(
                    "Skipping invalid quote for {} in {:?}: {}",
                    record.date,
                    path.file_name().unwrap_or_default(),
                    e
                );
            }
        }
    }

    if invalid_count > 0 {
        warn!(
            "Skipped {} invalid quotes out of {} in {:?}",
            invalid_count,
            invalid_count + quotes.len(),
            path.file_name().unwrap_or_default()
        );
    }

    sort_by_date(&mut quotes);
    Ok(quotes)
}

/// Load quotes from a file, dispatching on the extension
pub fn load_quotes(path: impl AsRef<Path>, symbol: &Symbol) -> Result<Vec<DailyQuote>> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => load_csv(path, symbol),
        Some("json") => load_json(path, symbol),
        _ => anyhow::bail!(
            "Unsupported data file format: {}. Use .csv or .json",
            path.display()
        ),
    }
}

/// Ascending by date, one quote per date (first occurrence wins)
fn sort_by_date(quotes: &mut Vec<DailyQuote>) {
    quotes.sort_by_key(|quote| quote.date);
    quotes.dedup_by_key(|quote| quote.date);
}

// =============================================================================
// Multi-Symbol Loading
// =============================================================================

/// Load daily quotes for multiple symbols from `<SYMBOL>.csv` (or `.json`)
/// files in a directory
///
/// Symbols without a data file are skipped with a warning; loading nothing
/// at all is an error.
pub fn load_multi_symbol(
    data_dir: impl AsRef<Path>,
    symbols: &[Symbol],
) -> Result<HashMap<Symbol, Vec<DailyQuote>>> {
    let data_dir = data_dir.as_ref();
    let mut data = HashMap::new();

    for symbol in symbols {
        let path = match find_symbol_file(data_dir, symbol) {
            Some(path) => path,
            None => {
                warn!(
                    "Data file not found for {}: {}",
                    symbol,
                    data_dir.join(format!("{}.csv", symbol.as_str())).display()
                );
                continue;
            }
        };

        let quotes =
            load_quotes(&path, symbol).context(format!("Failed to load data for {}", symbol))?;
        info!("Loaded {} quotes for {}", quotes.len(), symbol);

        if !quotes.is_empty() {
            data.insert(symbol.clone(), quotes);
        }
    }

    if data.is_empty() {
        anyhow::bail!("No data loaded for any symbol");
    }

    Ok(data)
}

/// Locate a symbol's data file in a directory, trying `.csv` then `.json`
pub fn find_symbol_file(data_dir: &Path, symbol: &Symbol) -> Option<std::path::PathBuf> {
    ["csv", "json"]
        .iter()
        .map(|ext| data_dir.join(format!("{}.{}", symbol.as_str(), ext)))
        .find(|path| path.exists())
}

// =============================================================================
// Filtering and Indexing
// =============================================================================

/// Filter quotes by inclusive date range
pub fn filter_quotes_by_date(
    quotes: Vec<DailyQuote>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<DailyQuote> {
    quotes
        .into_iter()
        .filter(|quote| {
            let after_start = start.is_none_or(|s| quote.date >= s);
            let before_end = end.is_none_or(|e| quote.date <= e);
            after_start && before_end
        })
        .collect()
}

/// Parse a YYYY-MM-DD date string
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date: {}. Use YYYY-MM-DD format", date_str))
}

/// Index a quote series by date, for use as a comparison series
pub fn comparison_map(quotes: Vec<DailyQuote>) -> BTreeMap<NaiveDate, DailyQuote> {
    quotes.into_iter().map(|quote| (quote.date, quote)).collect()
}

// =============================================================================
// Data Validation
// =============================================================================

/// Validate a loaded quote series for consistency
pub fn validate_quotes(quotes: &[DailyQuote]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if quotes.is_empty() {
        errors.push("No quotes provided".to_string());
        return ValidationResult { errors, warnings };
    }

    for (i, quote) in quotes.iter().enumerate() {
        if let Err(e) = quote.validate() {
            errors.push(format!("Quote {} ({}): {}", i, quote.date, e));
        }
        if i > 0 && quote.date <= quotes[i - 1].date {
            warnings.push(format!("Quote {} ({}): not chronological", i, quote.date));
        }
    }

    ValidationResult { errors, warnings }
}

/// Result of data validation
#[derive(Debug)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
