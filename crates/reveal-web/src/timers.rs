use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use reveal_engine::TimerHost;

/// `window.setTimeout`, fire-and-forget.
#[derive(Clone)]
pub struct WindowTimers {
    window: web_sys::Window,
}

impl WindowTimers {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl TimerHost for WindowTimers {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(move || task());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            log::error!("setTimeout failed: {:?}", e);
        }
    }
}
