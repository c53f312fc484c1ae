//! Screen command implementation with progress tracking

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use stock_patterns::{data, Analyzer, Config, DailyQuote, Symbol, SymbolReport};
use tracing::{info, warn};

/// Parse comma-separated ticker symbols
fn parse_symbol_list(s: &str) -> Vec<Symbol> {
    s.split(',')
        .map(|sym| sym.trim().to_uppercase())
        .filter(|sym| !sym.is_empty())
        .map(Symbol::new)
        .collect()
}

/// Read ticker symbols from a file, one per line; `#` starts a comment
fn read_symbol_file(path: &str) -> Result<Vec<Symbol>> {
    let contents = std::fs::read_to_string(path)
        .context(format!("Failed to read symbol file: {}", path))?;

    Ok(contents
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim().to_uppercase())
        .filter(|line| !line.is_empty())
        .map(Symbol::new)
        .collect())
}

/// Collect symbols from the quote files present in the data directory
fn discover_symbols(data_dir: &Path) -> Result<Vec<Symbol>> {
    let entries = std::fs::read_dir(data_dir)
        .context(format!("Failed to read data directory: {}", data_dir.display()))?;

    let mut symbols: Vec<Symbol> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("csv") | Some("json")
            )
        })
        .filter_map(|path| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .map(Symbol::new)
        })
        .collect();

    symbols.sort();
    symbols.dedup();
    Ok(symbols)
}

pub fn run(
    symbols: Option<String>,
    symbol_file: Option<String>,
    config_path: String,
    data_dir_override: Option<String>,
    comparison_override: Option<String>,
    max_weeks_back_override: Option<usize>,
    sequential: bool,
) -> Result<()> {
    info!("Starting weeks tight screen");

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
        config.data.data_dir = PathBuf::from(dir);
    }
    if let Some(comparison) = comparison_override {
        config.data.comparison_symbol = Some(Symbol::new(comparison.trim().to_uppercase()));
    }
    if let Some(weeks) = max_weeks_back_override {
        config.weeks_tight.max_weeks_back = weeks;
    }

    // Determine symbols to screen
    let mut symbol_list: Vec<Symbol> = if let Some(ref list) = symbols {
        parse_symbol_list(list)
    } else if let Some(ref path) = symbol_file {
        read_symbol_file(path)?
    } else {
        info!(
            "No symbols given, screening every quote file in {}",
            config.data.data_dir.display()
        );
        discover_symbols(&config.data.data_dir)?
    };

    // The comparison index is an input, not a screening candidate
    if let Some(comparison_symbol) = &config.data.comparison_symbol {
        symbol_list.retain(|symbol| symbol != comparison_symbol);
    }

    if symbol_list.is_empty() {
        anyhow::bail!("No symbols to screen");
    }

    let requested = symbol_list.len();
    info!("Screening {} symbols", requested);

    // Load all quote files up front; missing files are logged and skipped
    let quote_data = data::load_multi_symbol(&config.data.data_dir, &symbol_list)?;

    // Build the analyzer, attaching the comparison series when configured
    let mut analyzer = Analyzer::new(&config);
    if let Some(comparison_symbol) = &config.data.comparison_symbol {
        let load_result = data::find_symbol_file(&config.data.data_dir, comparison_symbol)
            .with_context(|| format!("No data file for {}", comparison_symbol))
            .and_then(|path| data::load_quotes(&path, comparison_symbol));
        match load_result {
            Ok(comparison_quotes) => {
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

    // Stable task order so parallel and sequential runs report identically
    let mut tasks: Vec<(&Symbol, &Vec<DailyQuote>)> = quote_data.iter().collect();
    tasks.sort_by(|a, b| a.0.cmp(b.0));

    // Print summary
    println!("\n{}", "=".repeat(60));
    println!("WEEKS TIGHT SCREEN");
    println!("{}", "=".repeat(60));
    println!("  Data dir:       {}", config.data.data_dir.display());
    println!("  Symbols:        {} requested, {} loaded", requested, tasks.len());
    println!(
        "  Comparison:     {}",
        config
            .data
            .comparison_symbol
            .as_ref()
            .map_or("none", |s| s.as_str())
    );
    println!(
        "  Band:           {:.2}% over {}+ weeks",
        config.weeks_tight.scanner.close_range_percent, config.weeks_tight.scanner.min_weeks
    );
    println!("  Max weeks back: {}", config.weeks_tight.max_weeks_back);
    println!(
        "  Mode:           {}",
        if sequential { "sequential" } else { "parallel" }
    );
    println!("{}\n", "=".repeat(60));

    // Create single progress bar (tqdm style)
    let pb = ProgressBar::new(tasks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{percent:>3}%|{bar:40}| {pos}/{len} [{elapsed}<{eta}, {per_sec}] ✓ {msg}")
            .unwrap()
            .progress_chars("█░ "),
    );
    pb.set_message("starting...");
    pb.tick();

    let found_count = Arc::new(AtomicUsize::new(0));
    let found_count_clone = found_count.clone();

    // Run all analyses
    let reports: Vec<SymbolReport> = if sequential {
        tasks
            .iter()
            .filter_map(|(symbol, quotes)| {
                let report = analyzer.analyze(symbol, quotes);
                pb.inc(1);
                if let Some(ref r) = report {
                    if r.weeks_tight.is_some() {
                        let count = found_count.fetch_add(1, Ordering::Relaxed) + 1;
                        pb.set_message(format!("{} found", count));
                    }
                }
                report
            })
            .collect()
    } else {
        tasks
            .par_iter()
            .filter_map(|(symbol, quotes)| {
                let report = analyzer.analyze(symbol, quotes);
                pb.inc(1);
                if let Some(ref r) = report {
                    if r.weeks_tight.is_some() {
                        let count = found_count_clone.fetch_add(1, Ordering::Relaxed) + 1;
                        pb.set_message(format!("{} found", count));
                    }
                }
                report
            })
            .collect()
    };

    pb.finish_with_message(format!("{} found", found_count.load(Ordering::Relaxed)));
    println!();

    // Keep only symbols with a detected pattern, most recent endings first
    let mut patterns: Vec<&SymbolReport> = reports
        .iter()
        .filter(|report| report.weeks_tight.is_some())
        .collect();
    patterns.sort_by(|a, b| {
        let ending_a = a.weeks_tight.as_ref().map(|p| p.pattern_ending);
        let ending_b = b.weeks_tight.as_ref().map(|p| p.pattern_ending);
        ending_b.cmp(&ending_a).then(a.symbol.cmp(&b.symbol))
    });

    if patterns.is_empty() {
        println!(
            "No weeks tight patterns within the last {} weeks ({} symbols screened).\n",
            config.weeks_tight.max_weeks_back,
            reports.len()
        );
        return Ok(());
    }

    print_pattern_table(&patterns, reports.len());

    info!(
        "Screen completed: {} patterns across {} symbols",
        patterns.len(),
        reports.len()
    );

    Ok(())
}

fn print_pattern_table(patterns: &[&SymbolReport], screened: usize) {
    println!("{}", "=".repeat(90));
    println!(
        "WEEKS TIGHT PATTERNS ({} of {} symbols)",
        patterns.len(),
        screened
    );
    println!("{}", "=".repeat(90));
    println!(
        "{:<8} {:>10} {:>12} {:>5} {:>8} {:>11} {:>12} {:>8}",
        "Symbol", "Close", "Ending", "Weeks", "Range%", "Buy Point", "Avg Volume", "RS"
    );
    println!("{}", "-".repeat(90));

    for report in patterns {
        // Filtered to Some above
        let Some(pattern) = report.weeks_tight.as_ref() else {
            continue;
        };

        println!(
            "{:<8} {:>10.2} {:>12} {:>5} {:>8.2} {:>11.2} {:>12} {:>8}",
            report.symbol.as_str(),
            report.last_close,
            pattern.pattern_ending.to_string(),
            pattern.length,
            pattern.max_close_range_percent,
            pattern.buy_point(),
            report
                .average_volume
                .map_or_else(|| "n/a".to_string(), |v| v.to_string()),
            report
                .relative_strength
                .map_or_else(|| "n/a".to_string(), |rs| format!("{:.1}", rs)),
        );
    }
    println!("{}\n", "=".repeat(90));
}
