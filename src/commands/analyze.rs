//! Analyze command implementation

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use stock_patterns::{data, Analyzer, Config, Symbol, SymbolReport};
use tracing::{debug, info, warn};

/// Format an optional price for report output
fn fmt_price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${:.2}", v),
        None => "n/a".to_string(),
    }
}

/// Format an optional ratio or percentage for report output
fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

pub fn run(
    symbol: String,
    config_path: String,
    data_dir_override: Option<String>,
    comparison_override: Option<String>,
    max_weeks_back_override: Option<usize>,
    start: Option<String>,
    end: Option<String>,
) -> Result<()> {
    let symbol = Symbol::new(symbol.trim().to_uppercase());
    info!("Starting analysis for {}", symbol);

    // Load configuration (all sections have defaults, so a missing file is fine)
    let mut config = if Path::new(&config_path).exists() {
        let config = Config::from_file(&config_path)?;
        info!("Loaded configuration from: {}", config_path);
        config
    } else {
        info!("Config file {} not found, using defaults", config_path);
        Config::default()
    };

    // Apply overrides
    if let Some(dir) = data_dir_override {
        info!("Overriding data directory to: {}", dir);
        config.data.data_dir = PathBuf::from(dir);
    }

    if let Some(comparison) = comparison_override {
        info!("Overriding comparison symbol to: {}", comparison);
        config.data.comparison_symbol = Some(Symbol::new(comparison.trim().to_uppercase()));
    }

    if let Some(weeks) = max_weeks_back_override {
        info!("Overriding max weeks back to: {}", weeks);
        config.weeks_tight.max_weeks_back = weeks;
    }

    let start_date = start.as_deref().map(data::parse_date).transpose()?;
    let end_date = end.as_deref().map(data::parse_date).transpose()?;

    // Load data
    info!("Loading data from: {}", config.data.data_dir.display());
    let path = data::find_symbol_file(&config.data.data_dir, &symbol).with_context(|| {
        format!(
            "No data file for {} in {}",
            symbol,
            config.data.data_dir.display()
        )
    })?;
    let quotes = data::load_quotes(&path, &symbol)
        .context(format!("Failed to load data for {}", symbol))?;
    let quotes = data::filter_quotes_by_date(quotes, start_date, end_date);
    info!("Loaded {} quotes for {}", quotes.len(), symbol);

    let validation = data::validate_quotes(&quotes);
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    if !validation.is_valid() {
        for error in &validation.errors {
            warn!("{}", error);
        }
        anyhow::bail!("Quote data for {} failed validation", symbol);
    }

    // Build the analyzer, attaching the comparison series when configured
    let mut analyzer = Analyzer::new(&config);
    if let Some(comparison_symbol) = &config.data.comparison_symbol {
        debug!("Loading comparison series: {}", comparison_symbol);
        let load_result = data::find_symbol_file(&config.data.data_dir, comparison_symbol)
            .with_context(|| format!("No data file for {}", comparison_symbol))
            .and_then(|path| data::load_quotes(&path, comparison_symbol));
        match load_result {
            Ok(comparison_quotes) => {
                let comparison_quotes =
                    data::filter_quotes_by_date(comparison_quotes, start_date, end_date);
                info!(
                    "Loaded {} comparison quotes for {}",
                    comparison_quotes.len(),
                    comparison_symbol
                );
                analyzer = analyzer.with_comparison(data::comparison_map(comparison_quotes));
            }
            Err(e) => {
                warn!(
                    "Skipping beta and relative strength, comparison data unavailable: {}",
                    e
                );
            }
        }
    }

    let report = match analyzer.analyze(&symbol, &quotes) {
        Some(report) => report,
        None => anyhow::bail!("No quotes for {} in the requested range", symbol),
    };

    print_report(&config, &report);

    Ok(())
}

fn print_report(config: &Config, report: &SymbolReport) {
    let ind = &config.indicators;

    println!("\n{}", "=".repeat(60));
    println!("ANALYSIS: {}", report.symbol);
    println!("{}", "=".repeat(60));
    println!(
        "Quotes:             {} ({} to {})",
        report.quote_count, report.first_date, report.last_date
    );
    println!("Weeks:              {}", report.week_count);
    println!("Last Close:         ${:.2}", report.last_close);
    println!("{}", "-".repeat(60));
    println!(
        "SMA ({}):           {}",
        ind.sma_period,
        fmt_price(report.sma)
    );
    println!(
        "EMA ({}):           {}",
        ind.ema_period,
        fmt_price(report.ema)
    );
    println!(
        "ATR ({}):           {}",
        ind.atr_period,
        fmt_price(report.average_true_range)
    );
    println!(
        "Avg Range ({}):     {}%",
        ind.atr_period,
        fmt_value(report.average_percent_range.map(|r| r * 100.0))
    );
    println!(
        "Avg Volume ({}):    {}",
        ind.volume_period,
        report
            .average_volume
            .map_or_else(|| "n/a".to_string(), |v| v.to_string())
    );
    println!(
        "Up/Down Vol ({}):   {}",
        ind.up_down_period,
        fmt_value(report.up_down_volume_ratio)
    );
    println!("Beta:               {}", fmt_value(report.beta));
    println!(
        "Rel Strength ({}y): {}",
        ind.rs_years,
        fmt_value(report.relative_strength)
    );
    println!("{}", "-".repeat(60));
    println!("Max Price:          {}", fmt_price(report.max_price));
    match &report.price_range {
        Some(range) => {
            println!(
                "Price Range:        ${:.2} ({}) to ${:.2} ({})",
                range.min_price, range.min_date, range.max_price, range.max_date
            );
        }
        None => println!("Price Range:        n/a"),
    }
    println!("{}", "-".repeat(60));
    match &report.weeks_tight {
        Some(pattern) => {
            println!("WEEKS TIGHT FOUND");
            println!("  Ending:           {}", pattern.pattern_ending);
            println!("  Length:           {} weeks", pattern.length);
            println!(
                "  Price Range:      ${:.2} - ${:.2}",
                pattern.lowest_price, pattern.highest_price
            );
            println!(
                "  Close Range:      {:.2}%",
                pattern.max_close_range_percent
            );
            println!("  Buy Point:        ${:.2}", pattern.buy_point());
        }
        None => {
            println!(
                "No weeks tight within the last {} weeks",
                config.weeks_tight.max_weeks_back
            );
        }
    }
    println!("{}\n", "=".repeat(60));
}
