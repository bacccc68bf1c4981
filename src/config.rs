use std::time::Duration;

use serde::Deserialize;

use crate::domain::errors::ChartError;
use crate::domain::logging::LogLevel;
use crate::domain::market_data::{Symbol, Timeframe};
use crate::domain::state::SelectionState;

/// Page configuration. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    /// Prefix for API requests; empty means same origin
    pub api_base: String,
    pub default_symbol: String,
    pub default_benchmark: String,
    pub default_timeframe: Timeframe,
    /// Delay before the first load so layout can settle
    pub startup_delay_ms: u32,
    /// Interval between container size checks
    pub poll_interval_ms: u32,
    /// Size checks after the first before giving up
    pub max_size_polls: u32,
    pub log_level: LogLevel,
    /// Wire the page on module start; turn off to drive `CandleChartApp` by hand
    pub auto_mount: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            default_symbol: "AAPL".to_string(),
            default_benchmark: "QQQ".to_string(),
            default_timeframe: Timeframe::OneDay,
            startup_delay_ms: 500,
            poll_interval_ms: 200,
            max_size_polls: 50,
            log_level: LogLevel::Debug,
            auto_mount: true,
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn initial_selection(&self) -> Result<SelectionState, ChartError> {
        Ok(SelectionState::new(
            Symbol::new(&self.default_symbol)?,
            Symbol::new(&self.default_benchmark)?,
            self.default_timeframe,
        ))
    }

    pub fn readiness(&self) -> ReadinessPolicy {
        ReadinessPolicy {
            poll_interval: Duration::from_millis(u64::from(self.poll_interval_ms)),
            max_polls: self.max_size_polls,
        }
    }
}

/// How long the chart adapter waits for its container to be laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub poll_interval: Duration,
    pub max_polls: u32,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        ChartConfig::default().readiness()
    }
}
