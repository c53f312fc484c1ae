//! Weeks Tight scanner parameters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeksTightConfig {
    /// Band around the run's first close that every weekly close must stay
    /// inside, in percent (default: 1.5)
    #[serde(default = "default_close_range_percent")]
    pub close_range_percent: f64,

    /// Minimum run length in weeks (default: 3)
    #[serde(default = "default_min_weeks")]
    pub min_weeks: usize,
}

fn default_close_range_percent() -> f64 {
    1.5
}

fn default_min_weeks() -> usize {
    3
}

impl Default for WeeksTightConfig {
    fn default() -> Self {
        Self {
            close_range_percent: default_close_range_percent(),
            min_weeks: default_min_weeks(),
        }
    }
}
