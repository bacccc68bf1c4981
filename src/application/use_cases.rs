use std::cell::Cell;

use crate::application::chart_service::ChartAdapter;
use crate::domain::{
    chart::{ChartSurface, Pause},
    errors::ChartError,
    logging::LogComponent,
    market_data::{CandleRequest, CandleSource, LoadSummary},
};
use crate::{log_debug, log_info};

/// Sequence number of one load, checked against the newest issued load
#[derive(Clone, Copy, Debug)]
pub struct LoadTicket<'a> {
    sequence: u64,
    latest: &'a Cell<u64>,
}

impl<'a> LoadTicket<'a> {
    /// Issue the next sequence number, superseding every earlier ticket
    pub fn issue(latest: &'a Cell<u64>) -> Self {
        let sequence = latest.get() + 1;
        latest.set(sequence);
        Self { sequence, latest }
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn is_current(&self) -> bool {
        self.latest.get() == self.sequence
    }

    pub fn ensure_current(&self) -> Result<(), ChartError> {
        if self.is_current() {
            Ok(())
        } else {
            Err(ChartError::Stale { sequence: self.sequence })
        }
    }
}

/// Use Case: fetch one candle set and push it into the chart
pub struct LoadCandlesUseCase<C: CandleSource> {
    source: C,
}

impl<C: CandleSource> LoadCandlesUseCase<C> {
    pub fn new(source: C) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    /// adapter ready → fetch → validate → render, strictly in that order.
    ///
    /// The response is only rendered if `ticket` is still the newest load.
    pub async fn execute<S: ChartSurface, P: Pause>(
        &self,
        adapter: &ChartAdapter<S, P>,
        request: &CandleRequest,
        ticket: &LoadTicket<'_>,
    ) -> Result<LoadSummary, ChartError> {
        adapter.ready().await?;

        log_info!(
            LogComponent::Application("LoadCandles"),
            "🌐 Fetching #{}: {}",
            ticket.sequence(),
            request.path()
        );
        let mut envelope = self.source.fetch(request).await?;
        log_debug!(
            LogComponent::Application("LoadCandles"),
            "Got candles: {}",
            envelope.candle_count()
        );

        ticket.ensure_current()?;
        let candles = envelope.take_candles()?;
        adapter.set_data(&candles)?;

        Ok(LoadSummary {
            symbol: envelope.symbol.unwrap_or_else(|| request.symbol.to_string()),
            benchmark: envelope.benchmark.unwrap_or_else(|| request.benchmark.to_string()),
            timeframe: envelope.timeframe.unwrap_or_else(|| request.timeframe.to_string()),
            candle_count: candles.len(),
        })
    }
}
