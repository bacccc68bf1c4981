//! Typed DOM listeners keyed by leptos event descriptors.

use leptos::ev::EventDescriptor;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

/// Flags forwarded to `addEventListener`
#[derive(Clone, Copy, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
    pub once: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self { passive: true, capture: false, once: false }
    }
}

impl EventOptions {
    fn to_js(self) -> AddEventListenerOptions {
        let js = AddEventListenerOptions::new();
        js.set_passive(self.passive);
        js.set_capture(self.capture);
        js.set_once(self.once);
        js
    }
}

/// A registered listener. The callback lives as long as this value, unless
/// [`forget`](Self::forget) hands it to the page.
pub struct EventListenerHandle {
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListenerHandle {
    /// Keep listening for the rest of the page's life
    pub fn forget(self) {
        self.callback.forget();
    }
}

pub fn event_listener_with_options<E>(
    target: &EventTarget,
    event: E,
    options: &EventOptions,
    mut handler: impl FnMut(E::EventType) + 'static,
) -> EventListenerHandle
where
    E: EventDescriptor + 'static,
    E::EventType: JsCast,
{
    let event_name = event.name().into_owned();
    let callback: Closure<dyn FnMut(Event)> =
        Closure::new(move |raw: Event| handler(raw.unchecked_into()));

    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        &event_name,
        callback.as_ref().unchecked_ref(),
        &options.to_js(),
    );

    EventListenerHandle { callback }
}

/// Same as [`event_listener_with_options`] on `window`; `None` when there is
/// no window.
pub fn window_event_listener_with_options<E>(
    event: E,
    options: &EventOptions,
    handler: impl FnMut(E::EventType) + 'static,
) -> Option<EventListenerHandle>
where
    E: EventDescriptor + 'static,
    E::EventType: JsCast,
{
    let window = web_sys::window()?;
    Some(event_listener_with_options(window.as_ref(), event, options, handler))
}
