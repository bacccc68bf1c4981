pub mod http;
pub mod rendering;

/// Page status regions, kept apart from load orchestration
pub mod ui {
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, Window};

    use crate::domain::{
        errors::ChartError,
        logging::LogComponent,
        market_data::Timeframe,
    };
    use crate::log_warn;

    /// Element ids and classes the page provides
    pub mod ids {
        pub const CHART: &str = "chart";
        pub const LOADING: &str = "loading";
        pub const ERROR: &str = "error";
        pub const CHART_TITLE: &str = "chartTitle";
        pub const LAST_UPDATE: &str = "lastUpdate";
        pub const SYMBOL: &str = "symbol";
        pub const BENCHMARK: &str = "benchmark";
        pub const LOAD_BUTTON: &str = "loadBtn";
        pub const TIMEFRAME_BUTTONS: &str = ".tf-btn";
        pub const TIMEFRAME_ATTR: &str = "data-tf";
        pub const HIDDEN: &str = "hidden";
        pub const ACTIVE: &str = "active";
    }

    /// What the session needs from the page's status regions
    pub trait StatusView {
        fn set_loading(&self, visible: bool);
        fn show_error(&self, message: &str);
        fn clear_error(&self);
        fn set_title(&self, title: &str);
        fn set_last_update(&self, text: &str);
        /// Mark exactly the button for `timeframe` active
        fn mark_active_timeframe(&self, timeframe: Timeframe);
        /// Blocking prompt for input the user has to fix
        fn prompt(&self, message: &str);
    }

    /// [`StatusView`] over the live DOM
    #[derive(Clone)]
    pub struct DomStatusView {
        window: Window,
        document: Document,
    }

    impl DomStatusView {
        pub fn new(window: Window, document: Document) -> Self {
            Self { window, document }
        }

        pub fn from_window() -> Result<Self, ChartError> {
            let window = web_sys::window()
                .ok_or_else(|| ChartError::Rendering("Window not available".to_string()))?;
            let document = window
                .document()
                .ok_or_else(|| ChartError::Rendering("Document not available".to_string()))?;
            Ok(Self::new(window, document))
        }

        fn element(&self, id: &str) -> Option<Element> {
            let element = self.document.get_element_by_id(id);
            if element.is_none() {
                log_warn!(LogComponent::Infrastructure("UI"), "Element '#{}' not found in DOM", id);
            }
            element
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(element) = self.element(id) {
                let classes = element.class_list();
                let _ = if hidden {
                    classes.add_1(ids::HIDDEN)
                } else {
                    classes.remove_1(ids::HIDDEN)
                };
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(element) = self.element(id) {
                element.set_text_content(Some(text));
            }
        }
    }

    /// Every `.tf-btn` element on the page, in document order
    pub fn timeframe_buttons(document: &Document) -> Vec<Element> {
        let Ok(nodes) = document.query_selector_all(ids::TIMEFRAME_BUTTONS) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    /// Make `button` the only active `.tf-btn`
    pub fn activate_timeframe_button(document: &Document, button: &Element) {
        for candidate in timeframe_buttons(document) {
            let _ = candidate.class_list().toggle_with_force(ids::ACTIVE, &candidate == button);
        }
    }

    impl StatusView for DomStatusView {
        fn set_loading(&self, visible: bool) {
            self.set_hidden(ids::LOADING, !visible);
        }

        fn show_error(&self, message: &str) {
            self.set_text(ids::ERROR, message);
            self.set_hidden(ids::ERROR, false);
        }

        fn clear_error(&self) {
            self.set_hidden(ids::ERROR, true);
        }

        fn set_title(&self, title: &str) {
            self.set_text(ids::CHART_TITLE, title);
        }

        fn set_last_update(&self, text: &str) {
            self.set_text(ids::LAST_UPDATE, text);
        }

        /// First button carrying `timeframe`; nothing changes when the page has none
        fn mark_active_timeframe(&self, timeframe: Timeframe) {
            let button = timeframe_buttons(&self.document).into_iter().find(|button| {
                button.get_attribute(ids::TIMEFRAME_ATTR).as_deref() == Some(timeframe.as_ref())
            });
            match button {
                Some(button) => activate_timeframe_button(&self.document, &button),
                None => log_warn!(
                    LogComponent::Infrastructure("UI"),
                    "No '{}' button for timeframe {}",
                    ids::TIMEFRAME_BUTTONS,
                    timeframe
                ),
            }
        }

        fn prompt(&self, message: &str) {
            let _ = self.window.alert_with_message(message);
        }
    }
}

/// Browser-backed implementations of domain services
pub mod services {
    use std::time::Duration;

    use wasm_bindgen::JsValue;

    use crate::domain::{
        chart::Pause,
        logging::{LogEntry, LogLevel, Logger, TimeProvider},
    };
    use crate::time_utils::format_clock;

    /// Writes to the browser console, one console method per level
    pub struct ConsoleLogger {
        min_level: LogLevel,
    }

    impl ConsoleLogger {
        pub fn new(min_level: LogLevel) -> Self {
            Self { min_level }
        }
    }

    /// `[HH:MM:SS.mmm] LEVEL TAG | message`
    fn console_line(entry: &LogEntry) -> String {
        let date = js_sys::Date::new(&JsValue::from_f64(entry.timestamp as f64));
        format!(
            "[{}.{:03}] {} {} | {}",
            format_clock(entry.timestamp),
            date.get_milliseconds(),
            entry.level,
            entry.component,
            entry.message
        )
    }

    impl Logger for ConsoleLogger {
        fn min_level(&self) -> LogLevel {
            self.min_level
        }

        fn write(&self, entry: &LogEntry) {
            let line = JsValue::from_str(&console_line(entry));
            match entry.level {
                LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&line),
                LogLevel::Info => web_sys::console::info_1(&line),
                LogLevel::Warn => web_sys::console::warn_1(&line),
                LogLevel::Error => web_sys::console::error_1(&line),
            }
        }
    }

    /// `Date.now()` clock
    pub struct BrowserTimeProvider;

    impl BrowserTimeProvider {
        pub fn new() -> Self {
            Self
        }
    }

    impl Default for BrowserTimeProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TimeProvider for BrowserTimeProvider {
        fn current_timestamp(&self) -> u64 {
            js_sys::Date::now() as u64
        }

        fn format_timestamp(&self, timestamp: u64) -> String {
            format_clock(timestamp)
        }
    }

    /// [`Pause`] on top of `setTimeout`
    #[derive(Clone, Copy, Debug, Default)]
    pub struct TimerPause;

    impl Pause for TimerPause {
        async fn pause(&self, duration: Duration) {
            gloo_timers::future::sleep(duration).await;
        }
    }
}
