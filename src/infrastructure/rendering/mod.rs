pub mod lightweight_charts;

pub use lightweight_charts::LightweightChartSurface;
