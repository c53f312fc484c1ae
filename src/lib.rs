//! Stock Patterns
//!
//! Technical-analysis toolkit for daily stock quote history: scalar
//! indicators (moving averages, volatility, volume behavior, relative
//! strength against an index), price extremes, weekly aggregation, and a
//! scanner for the Weeks Tight consolidation pattern.
//!
//! All calculators are pure functions over ascending-by-date quote slices;
//! data loading and reporting live in their own modules around that core.
//!
//! ## Example
//! ```no_run
//! use stock_patterns::data::load_csv;
//! use stock_patterns::{aggregate_to_weekly, indicators, scan_for_weeks_tight, Symbol};
//!
//! fn main() -> anyhow::Result<()> {
//!     let symbol = Symbol::new("CMG");
//!     let quotes = load_csv("data/CMG.csv", &symbol)?;
//!
//!     let sma = indicators::sma(&quotes, 50)?;
//!     println!("50-day SMA: {:.2}", sma);
//!
//!     let weekly = aggregate_to_weekly(&quotes);
//!     if let Some(pattern) = scan_for_weeks_tight(&weekly, 4) {
//!         println!(
//!             "Weeks Tight ending {}, buy point {:.2}",
//!             pattern.pattern_ending,
//!             pattern.buy_point()
//!         );
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod data;
pub mod dates;
pub mod indicators;
pub mod patterns;
pub mod types;
pub mod weekly;

pub use analysis::{Analyzer, SymbolReport};
pub use config::Config;
pub use indicators::IndicatorError;
pub use patterns::{scan_for_weeks_tight, WeeksTightConfig, WeeksTightScanner};
pub use types::*;
pub use weekly::aggregate_to_weekly;
