//! Stock pattern screener - main entry point
//!
//! This binary provides two subcommands:
//! - analyze: Full indicator and pattern report for a single symbol
//! - screen: Scan many symbols in parallel for weeks tight patterns

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "stock-patterns")]
#[command(about = "Stock chart indicators and weeks tight pattern detection", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a single symbol and print a full report
    Analyze {
        /// Ticker symbol to analyze
        symbol: String,

        /// Path to configuration file
        #[arg(short, long, default_value = "configs/default.json")]
        config: String,

        /// Data directory (overrides config file)
        #[arg(short, long)]
        data_dir: Option<String>,

        /// Comparison symbol for beta and relative strength (overrides config file)
        #[arg(long)]
        comparison: Option<String>,

        /// Maximum weeks between pattern end and the latest week (overrides config file)
        #[arg(long)]
        max_weeks_back: Option<usize>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },

    /// Screen multiple symbols for weeks tight patterns
    Screen {
        /// Ticker symbols to screen (comma-separated). E.g., "AAPL,MSFT,NVDA"
        #[arg(short, long)]
        symbols: Option<String>,

        /// File with one ticker symbol per line
        #[arg(long)]
        symbol_file: Option<String>,

        /// Path to configuration file
        #[arg(short, long, default_value = "configs/default.json")]
        config: String,

        /// Data directory (overrides config file)
        #[arg(short, long)]
        data_dir: Option<String>,

        /// Comparison symbol for beta and relative strength (overrides config file)
        #[arg(long)]
        comparison: Option<String>,

        /// Maximum weeks between pattern end and the latest week (overrides config file)
        #[arg(long)]
        max_weeks_back: Option<usize>,

        /// Run sequentially instead of parallel
        #[arg(long)]
        sequential: bool,
    },
}

fn setup_logging(verbose: bool, command_name: &str, file_only: bool) -> Result<()> {
    // Create logs directory
    std::fs::create_dir_all("logs")?;

    // Create log file with naming pattern: {command}_{date}.log
    let log_filename = format!(
        "{}_{}.log",
        command_name,
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let log_path = PathBuf::from("logs").join(&log_filename);

    // Set log level
    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // File appender
    let file_appender = tracing_appender::rolling::never("logs", &log_filename);

    if file_only {
        // For the screener: only log to file, keep console clean for progress bar
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(file_appender)
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .init();
    } else {
        let console_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(true);

        // File layer - same format but without ANSI colors
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(file_appender)
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();

        info!("Logging initialized");
        info!("Log file: {}", log_path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine command name and whether to use file-only logging
    let (command_name, file_only) = match &cli.command {
        Commands::Analyze { .. } => ("analyze", false),
        Commands::Screen { .. } => ("screen", true), // File-only for clean progress bar
    };

    // Setup logging
    setup_logging(cli.verbose, command_name, file_only)?;

    // Execute command
    match cli.command {
        Commands::Analyze {
            symbol,
            config,
            data_dir,
            comparison,
            max_weeks_back,
            start,
            end,
        } => commands::analyze::run(
            symbol,
            config,
            data_dir,
            comparison,
            max_weeks_back,
            start,
            end,
        ),

        Commands::Screen {
            symbols,
            symbol_file,
            config,
            data_dir,
            comparison,
            max_weeks_back,
            sequential,
        } => commands::screen::run(
            symbols,
            symbol_file,
            config,
            data_dir,
            comparison,
            max_weeks_back,
            sequential,
        ),
    }
}
