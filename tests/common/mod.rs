#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use candle_chart_wasm::application::{ChartAdapter, ChartSession};
use candle_chart_wasm::config::ReadinessPolicy;
use candle_chart_wasm::domain::chart::{ChartSurface, ChartTheme, ContainerSize, Pause};
use candle_chart_wasm::domain::errors::ChartError;
use candle_chart_wasm::domain::market_data::{
    Candle, CandleEnvelope, CandleRequest, CandleSource, Symbol, Timeframe,
};
use candle_chart_wasm::domain::state::SelectionState;
use candle_chart_wasm::infrastructure::ui::StatusView;
use futures::channel::oneshot;

/// Ordered record of everything the fakes were asked to do
pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn candles(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let base = 100.0 + i as f64;
            Candle::new(1_700_000_000 + i as i64 * 86_400, base, base + 2.0, base - 1.0, base + 1.0)
        })
        .collect()
}

pub fn envelope(symbol: &str, benchmark: &str, timeframe: &str, candles: Vec<Candle>) -> CandleEnvelope {
    CandleEnvelope {
        symbol: Some(symbol.to_string()),
        benchmark: Some(benchmark.to_string()),
        timeframe: Some(timeframe.to_string()),
        candles: Some(candles),
    }
}

pub fn default_selection() -> SelectionState {
    SelectionState::new(
        Symbol::new("AAPL").unwrap(),
        Symbol::new("QQQ").unwrap(),
        Timeframe::OneDay,
    )
}

pub fn policy(max_polls: u32) -> ReadinessPolicy {
    ReadinessPolicy { poll_interval: Duration::from_millis(200), max_polls }
}

/// Widget stand-in. Reports queued container sizes, repeating the last one.
pub struct FakeSurface {
    sizes: RefCell<VecDeque<ContainerSize>>,
    pub journal: Journal,
    pub initialized: Cell<u32>,
    pub resizes: RefCell<Vec<ContainerSize>>,
    pub data: RefCell<Vec<Vec<Candle>>>,
    pub fits: Cell<u32>,
}

impl FakeSurface {
    pub fn sized(width: u32, height: u32, journal: Journal) -> Self {
        Self::with_sizes(vec![ContainerSize::new(width, height)], journal)
    }

    pub fn with_sizes(sizes: Vec<ContainerSize>, journal: Journal) -> Self {
        Self {
            sizes: RefCell::new(sizes.into()),
            journal,
            initialized: Cell::new(0),
            resizes: RefCell::new(Vec::new()),
            data: RefCell::new(Vec::new()),
            fits: Cell::new(0),
        }
    }
}

impl ChartSurface for FakeSurface {
    fn container_size(&self) -> ContainerSize {
        let mut sizes = self.sizes.borrow_mut();
        if sizes.len() > 1 {
            sizes.pop_front().unwrap()
        } else {
            sizes.front().copied().unwrap_or_default()
        }
    }

    fn initialize(&self, size: ContainerSize, _theme: &ChartTheme) -> Result<(), ChartError> {
        self.initialized.set(self.initialized.get() + 1);
        self.journal
            .borrow_mut()
            .push(format!("initialize {}x{}", size.width, size.height));
        Ok(())
    }

    fn resize(&self, size: ContainerSize) -> Result<(), ChartError> {
        self.resizes.borrow_mut().push(size);
        self.journal
            .borrow_mut()
            .push(format!("resize {}x{}", size.width, size.height));
        Ok(())
    }

    fn set_data(&self, candles: &[Candle]) -> Result<(), ChartError> {
        self.data.borrow_mut().push(candles.to_vec());
        self.journal.borrow_mut().push(format!("set_data {}", candles.len()));
        Ok(())
    }

    fn fit_view(&self) -> Result<(), ChartError> {
        self.fits.set(self.fits.get() + 1);
        self.journal.borrow_mut().push("fit_view".to_string());
        Ok(())
    }
}

/// Returns immediately, counting how often it was asked to wait
#[derive(Default)]
pub struct InstantPause {
    pub pauses: Cell<u32>,
}

impl Pause for InstantPause {
    async fn pause(&self, _duration: Duration) {
        self.pauses.set(self.pauses.get() + 1);
    }
}

/// Answers fetches from a queue, in order
pub struct ScriptedSource {
    responses: RefCell<VecDeque<Result<CandleEnvelope, ChartError>>>,
    pub requests: RefCell<Vec<CandleRequest>>,
    journal: Journal,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<CandleEnvelope, ChartError>>, journal: Journal) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
            journal,
        }
    }
}

impl CandleSource for ScriptedSource {
    async fn fetch(&self, request: &CandleRequest) -> Result<CandleEnvelope, ChartError> {
        self.requests.borrow_mut().push(request.clone());
        self.journal.borrow_mut().push(format!("fetch {}", request.path()));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ChartError::Network("no scripted response".to_string())))
    }
}

/// Each fetch waits until the test releases its gate
pub struct GatedSource {
    gates: RefCell<VecDeque<oneshot::Receiver<Result<CandleEnvelope, ChartError>>>>,
    pub requests: RefCell<Vec<CandleRequest>>,
}

impl GatedSource {
    pub fn new(gates: Vec<oneshot::Receiver<Result<CandleEnvelope, ChartError>>>) -> Self {
        Self { gates: RefCell::new(gates.into()), requests: RefCell::new(Vec::new()) }
    }
}

impl CandleSource for GatedSource {
    async fn fetch(&self, request: &CandleRequest) -> Result<CandleEnvelope, ChartError> {
        self.requests.borrow_mut().push(request.clone());
        let gate = self.gates.borrow_mut().pop_front();
        match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Err(ChartError::Network("gate dropped".to_string()))),
            None => Err(ChartError::Network("no gate".to_string())),
        }
    }
}

/// Status regions as plain fields
pub struct RecordingView {
    pub journal: Journal,
    pub loading: Cell<bool>,
    pub error: RefCell<Option<String>>,
    pub title: RefCell<String>,
    pub last_update: RefCell<String>,
    pub active: Cell<Option<Timeframe>>,
    pub prompts: RefCell<Vec<String>>,
}

impl RecordingView {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            loading: Cell::new(false),
            error: RefCell::new(None),
            title: RefCell::new(String::new()),
            last_update: RefCell::new(String::new()),
            active: Cell::new(None),
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl StatusView for RecordingView {
    fn set_loading(&self, visible: bool) {
        self.loading.set(visible);
        self.journal.borrow_mut().push(format!("loading {}", visible));
    }

    fn show_error(&self, message: &str) {
        *self.error.borrow_mut() = Some(message.to_string());
        self.journal.borrow_mut().push(format!("error {}", message));
    }

    fn clear_error(&self) {
        *self.error.borrow_mut() = None;
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
        self.journal.borrow_mut().push(format!("title {}", title));
    }

    fn set_last_update(&self, text: &str) {
        *self.last_update.borrow_mut() = text.to_string();
    }

    fn mark_active_timeframe(&self, timeframe: Timeframe) {
        self.active.set(Some(timeframe));
    }

    fn prompt(&self, message: &str) {
        self.prompts.borrow_mut().push(message.to_string());
    }
}

pub type TestSession<C> = ChartSession<FakeSurface, InstantPause, C, RecordingView>;

pub fn session_with<C: CandleSource>(source: C, journal: Journal) -> TestSession<C> {
    let adapter = ChartAdapter::new(
        FakeSurface::sized(800, 600, journal.clone()),
        InstantPause::default(),
        policy(5),
    );
    ChartSession::new(default_selection(), adapter, source, RecordingView::new(journal))
}
