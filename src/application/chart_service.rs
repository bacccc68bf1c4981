use std::cell::Cell;

use crate::config::ReadinessPolicy;
use crate::domain::{
    chart::{ChartSurface, ChartTheme, ContainerSize, Pause},
    errors::ChartError,
    logging::LogComponent,
    market_data::Candle,
};
use crate::{log_debug, log_info, log_warn};

/// Owns the single chart widget and its candlestick series.
///
/// The widget is created on the first successful [`ready`](Self::ready) and
/// only resized afterwards.
pub struct ChartAdapter<S: ChartSurface, P: Pause> {
    surface: S,
    pause: P,
    theme: ChartTheme,
    policy: ReadinessPolicy,
    created: Cell<bool>,
}

impl<S: ChartSurface, P: Pause> ChartAdapter<S, P> {
    pub fn new(surface: S, pause: P, policy: ReadinessPolicy) -> Self {
        Self {
            surface,
            pause,
            theme: ChartTheme::default(),
            policy,
            created: Cell::new(false),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_created(&self) -> bool {
        self.created.get()
    }

    /// Make sure a correctly sized chart exists.
    ///
    /// Waits for the container to be laid out, polling at most
    /// `max_polls` more times before giving up.
    pub async fn ready(&self) -> Result<ContainerSize, ChartError> {
        let size = self.wait_for_layout().await?;

        // No await between the check and the set: overlapping callers on the
        // event loop cannot both create a chart.
        if self.created.get() {
            self.surface.resize(size)?;
            return Ok(size);
        }

        log_info!(
            LogComponent::Application("ChartAdapter"),
            "📐 Creating chart with size: {}x{}",
            size.width,
            size.height
        );
        self.surface.initialize(size, &self.theme)?;
        self.created.set(true);
        log_info!(LogComponent::Application("ChartAdapter"), "✅ Chart created successfully");

        Ok(size)
    }

    async fn wait_for_layout(&self) -> Result<ContainerSize, ChartError> {
        let mut polls = 0;
        loop {
            let size = self.surface.container_size();
            if size.is_laid_out() {
                return Ok(size);
            }
            if polls >= self.policy.max_polls {
                log_warn!(
                    LogComponent::Application("ChartAdapter"),
                    "Chart container still has no size after {} checks",
                    polls + 1
                );
                return Err(ChartError::ContainerNotSized { attempts: polls + 1 });
            }
            log_debug!(
                LogComponent::Application("ChartAdapter"),
                "Chart container has no size, waiting {:?}...",
                self.policy.poll_interval
            );
            self.pause.pause(self.policy.poll_interval).await;
            polls += 1;
        }
    }

    /// Replace the series with `candles` and fit the time scale to them
    pub fn set_data(&self, candles: &[Candle]) -> Result<(), ChartError> {
        if !self.created.get() {
            return Err(ChartError::Rendering("chart has not been created".to_string()));
        }
        if let Some(first) = candles.first() {
            log_debug!(LogComponent::Application("ChartAdapter"), "First candle: {:?}", first);
        }
        self.surface.set_data(candles)?;
        self.surface.fit_view()
    }
}
