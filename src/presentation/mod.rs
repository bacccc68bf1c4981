//! Browser entry points: page wiring and the exported JS handle.

pub mod controls;
pub mod wasm_api;

use std::rc::Rc;

use gloo::utils::format::JsValueSerdeExt;
use js_sys::Reflect;
use wasm_bindgen::JsValue;

use crate::application::{ChartAdapter, ChartSession};
use crate::config::ChartConfig;
use crate::domain::{errors::ChartError, logging::LogComponent};
use crate::infrastructure::{
    http::ApiCandleSource,
    rendering::LightweightChartSurface,
    services::TimerPause,
    ui::{DomStatusView, StatusView, ids},
};
use crate::log_info;

/// Optional global the page may set before the module loads
pub const CONFIG_GLOBAL: &str = "CANDLE_CHART_CONFIG";

pub type BrowserSession =
    ChartSession<LightweightChartSurface, TimerPause, ApiCandleSource, DomStatusView>;

/// Decode a config object; `undefined`/`null` means defaults
pub fn config_from_js(value: &JsValue) -> Result<ChartConfig, ChartError> {
    if value.is_undefined() || value.is_null() {
        return Ok(ChartConfig::default());
    }
    Ok(value.into_serde::<ChartConfig>()?)
}

/// `window.CANDLE_CHART_CONFIG`, if the page set one
pub fn read_page_config() -> Result<ChartConfig, ChartError> {
    let Some(window) = web_sys::window() else {
        return Ok(ChartConfig::default());
    };
    let value = Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))?;
    config_from_js(&value)
}

pub fn build_session(config: &ChartConfig) -> Result<Rc<BrowserSession>, ChartError> {
    let surface = LightweightChartSurface::from_element_id(ids::CHART)?;
    let adapter = ChartAdapter::new(surface, TimerPause, config.readiness());
    let source = ApiCandleSource::new(config.api_base.clone());
    let view = DomStatusView::from_window()?;
    Ok(Rc::new(ChartSession::new(config.initial_selection()?, adapter, source, view)))
}

/// Build the session, bind the page controls and schedule the first load
pub fn mount(config: &ChartConfig) -> Result<Rc<BrowserSession>, ChartError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ChartError::Rendering("Document not available".to_string()))?;

    let session = build_session(config)?;
    controls::bind_controls(&session, &document)?;
    session.view().mark_active_timeframe(session.selection().timeframe());
    controls::schedule_initial_load(&session, config.startup_delay_ms);

    log_info!(
        LogComponent::Presentation("Mount"),
        "🚀 Chart page mounted, first load in {}ms",
        config.startup_delay_ms
    );
    Ok(session)
}
