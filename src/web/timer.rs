//! Browser timers.

use crate::events::network::Delay;
use async_trait::async_trait;
use js_sys::{Function, Promise};
use log::*;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

fn millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

/// A one-shot `setTimeout`. Dropping it clears the timeout if it has not
/// fired yet.
///
pub struct Timeout {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn schedule(after: Duration, callback: impl FnOnce() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let mut callback = Some(callback);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(callback) = callback.take() {
                callback();
            }
        });
        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            millis(after),
        )?;
        Ok(Timeout {
            handle,
            _callback: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}

/// Delay that resolves a promise from `setTimeout`.
///
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeoutDelay;

#[async_trait(?Send)]
impl Delay for TimeoutDelay {
    async fn sleep(&self, duration: Duration) {
        let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
            let scheduled = web_sys::window().map(|window| {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis(duration))
            });
            if !matches!(scheduled, Some(Ok(_))) {
                warn!("Could not schedule timeout, resolving immediately");
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        if let Err(e) = JsFuture::from(promise).await {
            warn!("Timeout promise rejected: {:?}", e);
        }
    }
}
