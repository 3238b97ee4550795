//! DOM listener handles that unregister themselves on drop.

use js_sys::Array;
use log::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Attribute carrying an animation subject's index.
pub const REVEAL_INDEX_ATTRIBUTE: &str = "data-reveal-index";

/// An `addEventListener` registration.
///
pub struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        event_type: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(callback);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
        Ok(EventListener {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref())
        {
            warn!("Failed to remove '{}' listener: {:?}", self.event_type, e);
        }
    }
}

/// An `IntersectionObserver` reporting `(index, intersecting)` for observed
/// elements tagged with [`REVEAL_INDEX_ATTRIBUTE`].
///
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    pub fn new(
        threshold: f64,
        root_margin: &str,
        mut on_entry: impl FnMut(usize, bool) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    match reveal_index(&entry.target()) {
                        Some(index) => on_entry(index, entry.is_intersecting()),
                        None => trace!("Intersection on untagged element"),
                    }
                }
            },
        );
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        options.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        Ok(RevealObserver {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element, index: usize) -> Result<(), JsValue> {
        element.set_attribute(REVEAL_INDEX_ATTRIBUTE, &index.to_string())?;
        self.observer.observe(element);
        Ok(())
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn reveal_index(element: &Element) -> Option<usize> {
    element.get_attribute(REVEAL_INDEX_ATTRIBUTE)?.parse().ok()
}
