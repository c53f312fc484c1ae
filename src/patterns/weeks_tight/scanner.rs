//! Weeks Tight detection
//!
//! Candidate runs are grown forward from every anchor week, then the most
//! recent qualifying run wins; equal endings go to the longer run.

use crate::{WeeklyQuote, WeeksTight};

use super::config::WeeksTightConfig;

pub struct WeeksTightScanner {
    config: WeeksTightConfig,
}

impl WeeksTightScanner {
    pub fn new(config: WeeksTightConfig) -> Self {
        Self { config }
    }

    /// Find the best qualifying consolidation whose final week lies within
    /// `max_weeks_back` weeks of the latest quote
    ///
    /// A qualifying run is at least `min_weeks` consecutive weeks whose
    /// closes all stay inside the configured band around the run's first
    /// close. Returns `None` when nothing qualifies; that is a normal
    /// outcome, not an error.
    pub fn scan(&self, weeks: &[WeeklyQuote], max_weeks_back: usize) -> Option<WeeksTight> {
        if weeks.is_empty() || weeks.len() < self.config.min_weeks {
            return None;
        }
        let last_index = weeks.len() - 1;

        let mut best: Option<(usize, usize)> = None;
        for start in 0..weeks.len() {
            let anchor = weeks[start].close;

            // Maximal run anchored at `start`: stop at the first close
            // outside the band
            let mut end = start;
            while end + 1 < weeks.len() && self.within_band(weeks[end + 1].close, anchor) {
                end += 1;
            }

            if end - start + 1 < self.config.min_weeks {
                continue;
            }
            if last_index - end > max_weeks_back {
                continue;
            }

            let replace = match best {
                None => true,
                Some((best_start, best_end)) => {
                    end > best_end || (end == best_end && start < best_start)
                }
            };
            if replace {
                best = Some((start, end));
            }
        }

        best.map(|(start, end)| self.build_pattern(&weeks[start..=end]))
    }

    fn within_band(&self, close: f64, anchor: f64) -> bool {
        deviation_percent(close, anchor) <= self.config.close_range_percent
    }

    fn build_pattern(&self, run: &[WeeklyQuote]) -> WeeksTight {
        let anchor = run[0].close;
        let mut highest_price = run[0].high;
        let mut lowest_price = run[0].low;
        let mut max_close_range_percent: f64 = 0.0;

        for week in run {
            highest_price = highest_price.max(week.high);
            lowest_price = lowest_price.min(week.low);
            max_close_range_percent =
                max_close_range_percent.max(deviation_percent(week.close, anchor));
        }

        WeeksTight {
            symbol: run[0].symbol.clone(),
            pattern_ending: run[run.len() - 1].week_ending,
            length: run.len(),
            highest_price,
            lowest_price,
            max_close_range_percent,
        }
    }
}

fn deviation_percent(close: f64, anchor: f64) -> f64 {
    ((close - anchor) / anchor).abs() * 100.0
}

/// Scan with the default tightness settings
pub fn scan_for_weeks_tight(weeks: &[WeeklyQuote], max_weeks_back: usize) -> Option<WeeksTight> {
    WeeksTightScanner::new(WeeksTightConfig::default()).scan(weeks, max_weeks_back)
}
