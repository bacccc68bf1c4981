use std::rc::Rc;
use std::str::FromStr;

use gloo::utils::format::JsValueSerdeExt;
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::domain::{errors::ChartError, market_data::Timeframe};
use crate::presentation::{BrowserSession, config_from_js, mount};

fn to_js(err: ChartError) -> JsValue {
    JsValue::from_str(&err.user_message())
}

/// Reload and resolve with `{symbol, benchmark, timeframe, candleCount}`
fn reload_promise(session: Rc<BrowserSession>) -> Promise {
    future_to_promise(async move {
        let summary = session.reload().await.map_err(to_js)?;
        JsValue::from_serde(&summary).map_err(|e| to_js(e.into()))
    })
}

/// Handle for pages that drive the chart from their own scripts.
///
/// Set `autoMount: false` in the config so the module does not also wire
/// the page on start.
#[wasm_bindgen]
pub struct CandleChartApp {
    session: Rc<BrowserSession>,
}

#[wasm_bindgen]
impl CandleChartApp {
    /// Mount on the current page. `config` has the shape of
    /// `window.CANDLE_CHART_CONFIG`; pass `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CandleChartApp, JsValue> {
        let config = config_from_js(&config).map_err(to_js)?;
        let session = mount(&config).map_err(to_js)?;
        Ok(Self { session })
    }

    /// Same as typing a symbol and pressing Load
    #[wasm_bindgen(js_name = loadSymbol)]
    pub fn load_symbol(&self, symbol: String, benchmark: String) -> Promise {
        if let Err(err) = self.session.submit_symbol(&symbol, &benchmark) {
            return Promise::reject(&to_js(err));
        }
        reload_promise(Rc::clone(&self.session))
    }

    /// Same as clicking the matching timeframe button
    #[wasm_bindgen(js_name = setTimeframe)]
    pub fn set_timeframe(&self, timeframe: String) -> Promise {
        match Timeframe::from_str(&timeframe) {
            Ok(timeframe) => {
                self.session.select_timeframe(timeframe);
                reload_promise(Rc::clone(&self.session))
            }
            Err(_) => Promise::reject(&to_js(ChartError::Validation(format!(
                "Unknown timeframe '{}'",
                timeframe
            )))),
        }
    }

    pub fn reload(&self) -> Promise {
        reload_promise(Rc::clone(&self.session))
    }

    #[wasm_bindgen(getter)]
    pub fn symbol(&self) -> String {
        self.session.selection().symbol().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn benchmark(&self) -> String {
        self.session.selection().benchmark().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn timeframe(&self) -> String {
        self.session.selection().timeframe().to_string()
    }
}
