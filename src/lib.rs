use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, LogLevel};

pub mod application;
pub mod config;
pub mod domain;
pub mod event_utils;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;

/// Module entry point: install logging, read the page config and, unless the
/// page opted out, wire the chart once the DOM is ready.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let config = presentation::read_page_config();
    let log_level = config.as_ref().map_or(LogLevel::Debug, |c| c.log_level);
    domain::logging::init_logger(Box::new(infrastructure::services::ConsoleLogger::new(log_level)));
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));

    let config = config.unwrap_or_else(|err| {
        crate::log_warn!(
            LogComponent::Presentation("Initialize"),
            "Ignoring malformed {}: {}",
            presentation::CONFIG_GLOBAL,
            err
        );
        config::ChartConfig::default()
    });

    crate::log_info!(LogComponent::Presentation("Initialize"), "🚀 Page loaded");

    if !config.auto_mount {
        return;
    }

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    presentation::controls::on_dom_ready(&document, move || {
        if let Err(err) = presentation::mount(&config) {
            crate::log_error!(LogComponent::Presentation("Initialize"), "❌ Failed to mount chart: {}", err);
        }
    });
}
