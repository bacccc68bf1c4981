use js_sys::Date;
use wasm_bindgen::JsValue;

use crate::domain::logging::get_time_provider;

/// Local wall-clock `HH:MM:SS` for a millisecond timestamp.
pub fn format_clock(timestamp: u64) -> String {
    let date = Date::new(&JsValue::from_f64(timestamp as f64));
    format!(
        "{:02}:{:02}:{:02}",
        date.get_hours(),
        date.get_minutes(),
        date.get_seconds()
    )
}

/// Text for the `#lastUpdate` element, stamped with the installed clock
pub fn last_updated_label() -> String {
    let clock = get_time_provider();
    format!("Last updated: {}", clock.format_timestamp(clock.current_timestamp()))
}
