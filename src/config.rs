//! Configuration management
//!
//! Handles loading and parsing of JSON configuration files. Every section
//! and field has a default, so a minimal `{}` config is valid.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::patterns::WeeksTightConfig;
use crate::Symbol;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub indicators: IndicatorConfig,
    #[serde(default)]
    pub weeks_tight: WeeksTightSection,
}

impl Config {
    /// Load configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config JSON")?;
        Ok(config)
    }
}

/// Data directory and comparison-index settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding `<SYMBOL>.csv` / `<SYMBOL>.json` quote files
    /// (default: "data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Index symbol used as the comparison series for beta and relative
    /// strength; those indicators are skipped when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_symbol: Option<Symbol>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            comparison_symbol: None,
        }
    }
}

/// Lookback periods for the scalar indicators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Simple moving average period in sessions (default: 50)
    #[serde(default = "default_sma_period")]
    pub sma_period: usize,

    /// Exponential moving average period in sessions (default: 21)
    #[serde(default = "default_ema_period")]
    pub ema_period: usize,

    /// Average true range period in day-pairs (default: 14)
    #[serde(default = "default_atr_period")]
    pub atr_period: usize,

    /// Average daily volume period in sessions (default: 50)
    #[serde(default = "default_volume_period")]
    pub volume_period: usize,

    /// Up/down volume ratio period in day-pairs (default: 50)
    #[serde(default = "default_up_down_period")]
    pub up_down_period: usize,

    /// Relative-strength lookback in years (default: 1)
    #[serde(default = "default_rs_years")]
    pub rs_years: u32,
}

fn default_sma_period() -> usize {
    50
}

fn default_ema_period() -> usize {
    21
}

fn default_atr_period() -> usize {
    14
}

fn default_volume_period() -> usize {
    50
}

fn default_up_down_period() -> usize {
    50
}

fn default_rs_years() -> u32 {
    1
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_period: default_sma_period(),
            ema_period: default_ema_period(),
            atr_period: default_atr_period(),
            volume_period: default_volume_period(),
            up_down_period: default_up_down_period(),
            rs_years: default_rs_years(),
        }
    }
}

/// Weeks Tight scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeksTightSection {
    /// Scanner parameters (band width, minimum run length), inlined so the
    /// JSON section stays flat
    #[serde(flatten)]
    pub scanner: WeeksTightConfig,

    /// How far back from the latest week a pattern may end, in weeks
    /// (default: 4)
    #[serde(default = "default_max_weeks_back")]
    pub max_weeks_back: usize,
}

fn default_max_weeks_back() -> usize {
    4
}

impl Default for WeeksTightSection {
    fn default() -> Self {
        Self {
            scanner: WeeksTightConfig::default(),
            max_weeks_back: default_max_weeks_back(),
        }
    }
}
