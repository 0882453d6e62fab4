//! `web-sys` implementations of the engine's page and window hosts.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, HtmlElement, SvgElement, Window};

use reveal_engine::{
    LayerHandle, PageHost, PreparedSvg, RevealError, ScrollHost, ScrollMetrics, LAYER_SELECTOR,
};

/// Render a thrown JS value into a host error.
pub fn host_error(value: JsValue) -> RevealError {
    RevealError::Host(format!("{:?}", value))
}

pub fn window() -> Result<Window, RevealError> {
    web_sys::window().ok_or_else(|| RevealError::Host("no window".to_string()))
}

pub fn document(window: &Window) -> Result<Document, RevealError> {
    window
        .document()
        .ok_or_else(|| RevealError::Host("no document".to_string()))
}

/// A mounted layer element.
#[derive(Clone)]
pub struct DomLayer(pub Element);

impl DomLayer {
    fn set_opacity(&self, value: &str) -> Result<(), JsValue> {
        if let Some(svg) = self.0.dyn_ref::<SvgElement>() {
            svg.style().set_property("opacity", value)
        } else if let Some(html) = self.0.dyn_ref::<HtmlElement>() {
            html.style().set_property("opacity", value)
        } else {
            Ok(())
        }
    }
}

impl LayerHandle for DomLayer {
    fn reveal(&self) {
        if let Err(e) = self.set_opacity("1") {
            log::error!("failed to reveal layer: {:?}", e);
        }
    }

    fn once_transition_end(&self, callback: Box<dyn FnOnce()>) {
        let listener = Closure::once_into_js(move || callback());
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        if let Err(e) = self
            .0
            .add_event_listener_with_callback_and_add_event_listener_options(
                "transitionend",
                listener.unchecked_ref(),
                &options,
            )
        {
            log::error!("failed to listen for transitionend: {:?}", e);
        }
    }
}

/// The stage container plus the optional overlay element.
#[derive(Clone)]
pub struct DomPage {
    mount: Element,
    overlay: Option<Element>,
    overlay_class: String,
}

impl DomPage {
    pub fn new(mount: Element, overlay: Option<Element>, overlay_class: impl Into<String>) -> Self {
        Self {
            mount,
            overlay,
            overlay_class: overlay_class.into(),
        }
    }
}

impl PageHost for DomPage {
    type Layer = DomLayer;

    fn mount_svg(&self, svg: &PreparedSvg) -> Result<(), RevealError> {
        self.mount.set_inner_html("");
        self.mount.set_inner_html(&svg.markup);
        if self.mount.query_selector("svg").map_err(host_error)?.is_none() {
            return Err(RevealError::Host("SVG did not mount".to_string()));
        }
        log::debug!("mounted SVG with {} layers", svg.layer_count);
        Ok(())
    }

    fn mount_fallback(&self, html: &str) {
        self.mount.set_inner_html(html);
    }

    fn layers(&self) -> Result<Vec<DomLayer>, RevealError> {
        let nodes = self
            .mount
            .query_selector_all(LAYER_SELECTOR)
            .map_err(host_error)?;
        let layers = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(DomLayer)
            .collect();
        Ok(layers)
    }

    fn show_overlay(&self) {
        let Some(overlay) = &self.overlay else {
            return;
        };
        if let Err(e) = overlay.class_list().add_1(&self.overlay_class) {
            log::error!("failed to show overlay: {:?}", e);
        }
    }
}

/// Window scroll state and listeners.
#[derive(Clone)]
pub struct DomWindow {
    window: Window,
    document: Document,
}

impl DomWindow {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn listen(&self, event: &str, handler: Rc<dyn Fn()>, passive: bool) {
        let closure = Closure::<dyn Fn()>::new(move || handler());
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        if let Err(e) = self
            .window
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
        {
            log::error!("failed to listen for {}: {:?}", event, e);
        }
        // Listeners live as long as the page.
        closure.forget();
    }

    fn scroll_height(&self) -> f64 {
        let from_root = self
            .document
            .document_element()
            .map(|root| root.scroll_height())
            .unwrap_or(0);
        let height = if from_root > 0 {
            from_root
        } else {
            self.document.body().map(|b| b.scroll_height()).unwrap_or(0)
        };
        f64::from(height)
    }
}

impl ScrollHost for DomWindow {
    fn metrics(&self) -> ScrollMetrics {
        let scroll_y = self
            .window
            .scroll_y()
            .or_else(|_| self.window.page_y_offset())
            .unwrap_or(0.0);
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        ScrollMetrics::new(scroll_y, self.scroll_height(), viewport_height)
    }

    fn on_scroll(&self, handler: Rc<dyn Fn()>) {
        self.listen("scroll", handler, true);
    }

    fn on_resize(&self, handler: Rc<dyn Fn()>) {
        self.listen("resize", handler, false);
    }
}
