use super::value_objects::CandleTime;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ChartError;

/// Domain entity - one OHLC bar.
///
/// Serializes to the `{time, open, high, low, close}` shape the
/// candlestick series consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: CandleTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(time: impl Into<CandleTime>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { time: time.into(), open, high, low, close }
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// Success body of `GET /api/candles/{symbol}/{timeframe}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CandleEnvelope {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub benchmark: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
    /// `None` when the field is absent; treated the same as empty
    #[serde(default)]
    pub candles: Option<Vec<Candle>>,
}

impl CandleEnvelope {
    pub fn candle_count(&self) -> usize {
        self.candles.as_ref().map_or(0, Vec::len)
    }

    /// Take the bars out, failing with `NoData` when there are none
    pub fn take_candles(&mut self) -> Result<Vec<Candle>, ChartError> {
        match self.candles.take() {
            Some(candles) if !candles.is_empty() => Ok(candles),
            _ => Err(ChartError::NoData),
        }
    }
}

/// What a successful load reports back to the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSummary {
    pub symbol: String,
    pub benchmark: String,
    pub timeframe: String,
    pub candle_count: usize,
}

impl LoadSummary {
    pub fn title(&self) -> String {
        format!("{} vs {} - {}", self.symbol, self.benchmark, self.timeframe)
    }
}
