use std::cell::{Cell, RefCell};

use crate::application::{
    chart_service::ChartAdapter,
    use_cases::{LoadCandlesUseCase, LoadTicket},
};
use crate::domain::{
    chart::{ChartSurface, Pause},
    errors::ChartError,
    logging::LogComponent,
    market_data::{CandleRequest, CandleSource, LoadSummary, Symbol, Timeframe},
    state::SelectionState,
};
use crate::infrastructure::ui::StatusView;
use crate::time_utils::last_updated_label;
use crate::{log_debug, log_error, log_info};

/// Page session: selection state, the chart, and the status regions.
///
/// Loads may overlap. Each one takes a sequence number and only the newest
/// is allowed to touch the chart or the status text.
pub struct ChartSession<S, P, C, V>
where
    S: ChartSurface,
    P: Pause,
    C: CandleSource,
    V: StatusView,
{
    selection: RefCell<SelectionState>,
    adapter: ChartAdapter<S, P>,
    loader: LoadCandlesUseCase<C>,
    view: V,
    latest: Cell<u64>,
}

impl<S, P, C, V> ChartSession<S, P, C, V>
where
    S: ChartSurface,
    P: Pause,
    C: CandleSource,
    V: StatusView,
{
    pub fn new(selection: SelectionState, adapter: ChartAdapter<S, P>, source: C, view: V) -> Self {
        Self {
            selection: RefCell::new(selection),
            adapter,
            loader: LoadCandlesUseCase::new(source),
            view,
            latest: Cell::new(0),
        }
    }

    pub fn selection(&self) -> SelectionState {
        self.selection.borrow().clone()
    }

    pub fn adapter(&self) -> &ChartAdapter<S, P> {
        &self.adapter
    }

    pub fn source(&self) -> &C {
        self.loader.source()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Sequence number of the newest load issued so far
    pub fn latest_sequence(&self) -> u64 {
        self.latest.get()
    }

    /// Accept the symbol field and benchmark picker.
    ///
    /// A blank symbol prompts the user and leaves the selection alone. A
    /// blank benchmark keeps the current one.
    pub fn submit_symbol(&self, raw_symbol: &str, raw_benchmark: &str) -> Result<(), ChartError> {
        let symbol = match Symbol::new(raw_symbol) {
            Ok(symbol) => symbol,
            Err(err) => {
                self.view.prompt(&err.user_message());
                return Err(err);
            }
        };

        let mut selection = self.selection.borrow_mut();
        selection.set_symbol(symbol);
        if let Ok(benchmark) = Symbol::new(raw_benchmark) {
            selection.set_benchmark(benchmark);
        }
        Ok(())
    }

    pub fn select_timeframe(&self, timeframe: Timeframe) {
        self.selection.borrow_mut().set_timeframe(timeframe);
        self.view.mark_active_timeframe(timeframe);
    }

    /// Load the current selection into the chart.
    ///
    /// Returns `Stale` when a newer load was issued before this one finished;
    /// in that case nothing on the page was changed by this call.
    pub async fn reload(&self) -> Result<LoadSummary, ChartError> {
        let ticket = LoadTicket::issue(&self.latest);
        let request = CandleRequest::from(&*self.selection.borrow());

        log_info!(
            LogComponent::Application("ChartSession"),
            "Loading #{}: {} {} {}",
            ticket.sequence(),
            request.symbol,
            request.timeframe,
            request.benchmark
        );

        self.view.clear_error();
        let _loading = LoadingIndicator::show(&self.view, ticket);

        let outcome = self.loader.execute(&self.adapter, &request, &ticket).await;

        if !ticket.is_current() {
            log_debug!(
                LogComponent::Application("ChartSession"),
                "Dropping response for #{}, newest is #{}",
                ticket.sequence(),
                self.latest.get()
            );
            return Err(ChartError::Stale { sequence: ticket.sequence() });
        }

        match &outcome {
            Ok(summary) => {
                self.view.set_title(&summary.title());
                self.view.set_last_update(&last_updated_label());
                log_info!(
                    LogComponent::Application("ChartSession"),
                    "✅ Chart updated with {} candles",
                    summary.candle_count
                );
            }
            Err(err) => {
                log_error!(LogComponent::Application("ChartSession"), "❌ {}", err);
                self.view.show_error(&err.user_message());
            }
        }

        outcome
    }
}

/// Hides the loading indicator when dropped, on every exit path, unless a
/// newer load has taken the indicator over.
struct LoadingIndicator<'a, V: StatusView> {
    view: &'a V,
    ticket: LoadTicket<'a>,
}

impl<'a, V: StatusView> LoadingIndicator<'a, V> {
    fn show(view: &'a V, ticket: LoadTicket<'a>) -> Self {
        view.set_loading(true);
        Self { view, ticket }
    }
}

impl<V: StatusView> Drop for LoadingIndicator<'_, V> {
    fn drop(&mut self) {
        if self.ticket.is_current() {
            self.view.set_loading(false);
        }
    }
}
