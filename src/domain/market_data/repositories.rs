use crate::domain::errors::ChartError;
use crate::domain::market_data::{CandleEnvelope, Symbol, Timeframe};
use crate::domain::state::SelectionState;

/// One candle query, snapshotted from the selection when a load starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleRequest {
    pub symbol: Symbol,
    pub benchmark: Symbol,
    pub timeframe: Timeframe,
}

impl CandleRequest {
    pub fn new(symbol: Symbol, benchmark: Symbol, timeframe: Timeframe) -> Self {
        Self { symbol, benchmark, timeframe }
    }

    /// Path and query relative to the API base
    pub fn path(&self) -> String {
        format!(
            "/api/candles/{}/{}?benchmark={}",
            self.symbol.value(),
            self.timeframe.as_path_segment(),
            self.benchmark.value()
        )
    }
}

impl From<&SelectionState> for CandleRequest {
    fn from(selection: &SelectionState) -> Self {
        Self::new(
            selection.symbol().clone(),
            selection.benchmark().clone(),
            selection.timeframe(),
        )
    }
}

/// Source of candle data. One call is one request; no retries.
#[allow(async_fn_in_trait)]
pub trait CandleSource {
    async fn fetch(&self, request: &CandleRequest) -> Result<CandleEnvelope, ChartError>;
}
