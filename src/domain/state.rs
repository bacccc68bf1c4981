use crate::domain::market_data::{Symbol, Timeframe};

/// What the page is currently asking for. Mutated only by user events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionState {
    symbol: Symbol,
    benchmark: Symbol,
    timeframe: Timeframe,
}

impl SelectionState {
    pub fn new(symbol: Symbol, benchmark: Symbol, timeframe: Timeframe) -> Self {
        Self { symbol, benchmark, timeframe }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn benchmark(&self) -> &Symbol {
        &self.benchmark
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn set_symbol(&mut self, symbol: Symbol) {
        self.symbol = symbol;
    }

    pub fn set_benchmark(&mut self, benchmark: Symbol) {
        self.benchmark = benchmark;
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        self.timeframe = timeframe;
    }
}
