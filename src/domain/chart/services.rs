use std::time::Duration;

use crate::domain::chart::{ChartTheme, ContainerSize};
use crate::domain::errors::ChartError;
use crate::domain::market_data::Candle;

/// Capability interface over the charting widget.
///
/// Methods take `&self`: the surface is shared between overlapping loads on
/// one event loop, so implementations keep their handles behind interior
/// mutability.
pub trait ChartSurface {
    /// Current size of the element the chart lives in
    fn container_size(&self) -> ContainerSize;

    /// Create the chart and its single candlestick series
    fn initialize(&self, size: ContainerSize, theme: &ChartTheme) -> Result<(), ChartError>;

    fn resize(&self, size: ContainerSize) -> Result<(), ChartError>;

    /// Replace the series data wholesale
    fn set_data(&self, candles: &[Candle]) -> Result<(), ChartError>;

    /// Fit the visible time range to the loaded data
    fn fit_view(&self) -> Result<(), ChartError>;
}

/// Suspends the current task; `gloo-timers` in the browser.
#[allow(async_fn_in_trait)]
pub trait Pause {
    async fn pause(&self, duration: Duration);
}
