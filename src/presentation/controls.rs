use std::rc::Rc;
use std::str::FromStr;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use leptos::ev;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

use crate::domain::{errors::ChartError, logging::LogComponent, market_data::Timeframe};
use crate::event_utils::{EventOptions, event_listener_with_options};
use crate::infrastructure::ui::{activate_timeframe_button, ids, timeframe_buttons};
use crate::presentation::BrowserSession;
use crate::{log_debug, log_info, log_warn};

/// Run `f` once the document has been parsed
pub fn on_dom_ready(document: &Document, f: impl FnOnce() + 'static) {
    if document.ready_state() == "loading" {
        EventListener::once(document, "DOMContentLoaded", move |_| f()).forget();
    } else {
        f();
    }
}

/// Start a reload without waiting for it. Failures are already on the page.
pub fn spawn_reload(session: &Rc<BrowserSession>) {
    let session = Rc::clone(session);
    spawn_local(async move {
        if let Err(err) = session.reload().await {
            log_debug!(LogComponent::Presentation("Controls"), "Reload ended: {}", err);
        }
    });
}

/// First load, delayed so the container has been laid out
pub fn schedule_initial_load(session: &Rc<BrowserSession>, delay_ms: u32) {
    let session = Rc::clone(session);
    Timeout::new(delay_ms, move || spawn_reload(&session)).forget();
}

fn element_by_id(document: &Document, id: &str) -> Result<Element, ChartError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ChartError::Rendering(format!("Element '#{}' not found in DOM", id)))
}

/// Current value of an `<input>` or `<select>`
fn field_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

/// Wire the load button, timeframe buttons and Enter key for the page's
/// lifetime.
pub fn bind_controls(session: &Rc<BrowserSession>, document: &Document) -> Result<(), ChartError> {
    let options = EventOptions::default();
    let load_button = element_by_id(document, ids::LOAD_BUTTON)?;
    let symbol_field = element_by_id(document, ids::SYMBOL)?;
    let benchmark_field = element_by_id(document, ids::BENCHMARK)?;

    {
        let session = Rc::clone(session);
        let symbol_field = symbol_field.clone();
        event_listener_with_options(load_button.as_ref(), ev::click, &options, move |_| {
            let symbol = field_value(&symbol_field);
            let benchmark = field_value(&benchmark_field);
            if session.submit_symbol(&symbol, &benchmark).is_ok() {
                spawn_reload(&session);
            }
        })
        .forget();
    }

    for button in timeframe_buttons(document) {
        let session = Rc::clone(session);
        let document = document.clone();
        let target = button.clone();
        event_listener_with_options(button.as_ref(), ev::click, &options, move |_| {
            let raw = target.get_attribute(ids::TIMEFRAME_ATTR).unwrap_or_default();
            match Timeframe::from_str(&raw) {
                Ok(timeframe) => {
                    session.select_timeframe(timeframe);
                    // a page may carry several buttons for one timeframe
                    activate_timeframe_button(&document, &target);
                    spawn_reload(&session);
                }
                Err(_) => {
                    log_warn!(
                        LogComponent::Presentation("Controls"),
                        "Ignoring unknown timeframe '{}'",
                        raw
                    );
                }
            }
        })
        .forget();
    }

    if let Ok(load_button) = load_button.dyn_into::<HtmlElement>() {
        event_listener_with_options(symbol_field.as_ref(), ev::keypress, &options, move |event| {
            if event.key() == "Enter" {
                load_button.click();
            }
        })
        .forget();
    }

    log_info!(LogComponent::Presentation("Controls"), "Page controls bound");
    Ok(())
}
