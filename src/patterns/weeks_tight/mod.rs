//! Weeks Tight pattern
//!
//! A multi-week consolidation: three or more consecutive weekly closes
//! holding inside a tight percentage band of the run's first close. The
//! scanner reports the run together with a buy point just above its
//! highest price.

pub mod config;
pub mod scanner;

pub use config::WeeksTightConfig;
pub use scanner::{scan_for_weeks_tight, WeeksTightScanner};
