use std::cell::RefCell;

use gloo::utils::format::JsValueSerdeExt;
use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use crate::domain::{
    chart::{ChartOptions, ChartSurface, ChartTheme, ContainerSize},
    errors::ChartError,
    logging::LogComponent,
    market_data::Candle,
};
use crate::event_utils::{EventListenerHandle, EventOptions, window_event_listener_with_options};
use crate::log_warn;

/// Global the lightweight-charts standalone bundle installs
const LIBRARY_GLOBAL: &str = "LightweightCharts";

#[derive(Serialize)]
struct CreateChartOptions<'a> {
    width: u32,
    height: u32,
    #[serde(flatten)]
    options: &'a ChartOptions,
}

struct Widget {
    chart: JsValue,
    series: JsValue,
    _resize: Option<EventListenerHandle>,
}

/// [`ChartSurface`] backed by TradingView lightweight-charts (3.x API)
pub struct LightweightChartSurface {
    container: Element,
    widget: RefCell<Option<Widget>>,
}

impl LightweightChartSurface {
    pub fn new(container: Element) -> Self {
        Self { container, widget: RefCell::new(None) }
    }

    pub fn from_element_id(id: &str) -> Result<Self, ChartError> {
        let container = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(id))
            .ok_or_else(|| ChartError::Rendering(format!("Chart container '#{}' not found", id)))?;
        Ok(Self::new(container))
    }

    fn with_widget<T>(&self, f: impl FnOnce(&Widget) -> Result<T, ChartError>) -> Result<T, ChartError> {
        match self.widget.borrow().as_ref() {
            Some(widget) => f(widget),
            None => Err(ChartError::Rendering("chart has not been created".to_string())),
        }
    }
}

fn measure(container: &Element) -> ContainerSize {
    ContainerSize::new(
        container.client_width().max(0) as u32,
        container.client_height().max(0) as u32,
    )
}

fn call_method(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, ChartError> {
    let method = Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into::<Function>()
        .map_err(|_| ChartError::Rendering(format!("`{}` is not a function", name)))?;
    let args: Array = args.iter().collect();
    Ok(method.apply(target, &args)?)
}

fn resize_chart(chart: &JsValue, size: ContainerSize) -> Result<(), ChartError> {
    call_method(
        chart,
        "resize",
        &[JsValue::from(size.width), JsValue::from(size.height)],
    )?;
    Ok(())
}

impl ChartSurface for LightweightChartSurface {
    fn container_size(&self) -> ContainerSize {
        measure(&self.container)
    }

    fn initialize(&self, size: ContainerSize, theme: &ChartTheme) -> Result<(), ChartError> {
        let library = Reflect::get(&js_sys::global(), &JsValue::from_str(LIBRARY_GLOBAL))?;
        if library.is_undefined() {
            return Err(ChartError::Rendering(format!("{} is not loaded", LIBRARY_GLOBAL)));
        }

        let options = JsValue::from_serde(&CreateChartOptions {
            width: size.width,
            height: size.height,
            options: &theme.chart,
        })?;
        let style = JsValue::from_serde(&theme.candles)?;

        let chart = call_method(&library, "createChart", &[self.container.clone().into(), options])?;
        // The chart is already mounted in the container; take it down again
        // so the next attempt starts from an empty element.
        let series = match call_method(&chart, "addCandlestickSeries", &[style]) {
            Ok(series) => series,
            Err(err) => {
                if let Err(cleanup) = call_method(&chart, "remove", &[]) {
                    log_warn!(LogComponent::Infrastructure("Chart"), "Chart removal failed: {}", cleanup);
                }
                return Err(err);
            }
        };

        let resize = {
            let chart = chart.clone();
            let container = self.container.clone();
            window_event_listener_with_options(leptos::ev::resize, &EventOptions::default(), move |_| {
                if let Err(err) = resize_chart(&chart, measure(&container)) {
                    log_warn!(LogComponent::Infrastructure("Chart"), "Resize failed: {}", err);
                }
            })
        };

        *self.widget.borrow_mut() = Some(Widget { chart, series, _resize: resize });
        Ok(())
    }

    fn resize(&self, size: ContainerSize) -> Result<(), ChartError> {
        self.with_widget(|widget| resize_chart(&widget.chart, size))
    }

    fn set_data(&self, candles: &[Candle]) -> Result<(), ChartError> {
        let data = JsValue::from_serde(candles)?;
        self.with_widget(|widget| call_method(&widget.series, "setData", &[data]).map(|_| ()))
    }

    fn fit_view(&self) -> Result<(), ChartError> {
        self.with_widget(|widget| {
            let time_scale = call_method(&widget.chart, "timeScale", &[])?;
            call_method(&time_scale, "fitContent", &[])?;
            Ok(())
        })
    }
}
