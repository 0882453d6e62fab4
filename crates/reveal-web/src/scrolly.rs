//! Binding to the page's global `ScrollyVideo` constructor.
//!
//! Only the consumed contract is modelled: the constructor options, the
//! optional `onReady` callback and `setVideoPercentage`.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Reflect, JSON};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Window};

use reveal_engine::{bind_scroll_video, ScrollVideoConfig, ScrollVideoOptions, VideoSink};

use crate::dom::DomWindow;
use crate::timers::WindowTimers;

const CONSTRUCTOR: &str = "ScrollyVideo";

/// A scroll-video instance, filled in once the constructor returns.
#[derive(Clone, Default)]
pub struct ScrollyHandle {
    instance: Rc<RefCell<Option<JsValue>>>,
}

impl ScrollyHandle {
    fn set(&self, instance: JsValue) {
        *self.instance.borrow_mut() = Some(instance);
    }
}

impl VideoSink for ScrollyHandle {
    fn set_video_percentage(&self, progress: f64) -> bool {
        let instance = self.instance.borrow();
        let Some(instance) = instance.as_ref() else {
            return false;
        };
        let setter = match Reflect::get(instance, &JsValue::from_str("setVideoPercentage")) {
            Ok(value) => value,
            Err(_) => return false,
        };
        let Some(setter) = setter.dyn_ref::<Function>() else {
            return false;
        };
        if let Err(e) = setter.call1(instance, &JsValue::from_f64(progress)) {
            log::error!("setVideoPercentage failed: {:?}", e);
        }
        true
    }
}

/// The global constructor, if the library is loaded.
pub fn constructor(window: &Window) -> Option<Function> {
    Reflect::get(window, &JsValue::from_str(CONSTRUCTOR))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

/// Construct the instance inside `mount` and bind scroll progress to it.
///
/// Listeners are attached from `onReady` and again after the configured
/// fallback delay. Exceptions thrown by the library are returned as-is.
pub fn init_scroll_video(
    window: &DomWindow,
    timers: &WindowTimers,
    ctor: &Function,
    mount: &Element,
    config: &ScrollVideoConfig,
) -> Result<ScrollyHandle, JsValue> {
    let handle = ScrollyHandle::default();
    let attach = bind_scroll_video(
        window,
        timers,
        Rc::new(handle.clone()),
        config.fallback_attach_ms,
    );

    let json = ScrollVideoOptions::from(config)
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let options = JSON::parse(&json)?;
    Reflect::set(&options, &JsValue::from_str("scrollyVideoContainer"), mount)?;

    let on_ready = Closure::<dyn Fn()>::new(move || attach());
    Reflect::set(&options, &JsValue::from_str("onReady"), on_ready.as_ref())?;
    // The library may call onReady at any point in the page's life.
    on_ready.forget();

    let instance = Reflect::construct(ctor, &Array::of1(&options))?;
    handle.set(instance);
    log::info!("scroll video bound to {}", config.src);
    Ok(handle)
}
