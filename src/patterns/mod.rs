//! Chart pattern scanners over weekly quote sequences

pub mod weeks_tight;

pub use weeks_tight::{scan_for_weeks_tight, WeeksTightConfig, WeeksTightScanner};
