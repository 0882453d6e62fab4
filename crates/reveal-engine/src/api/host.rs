//! Host contracts the engine drives.
//!
//! The browser bridge (`reveal-web`) implements these over `web-sys`; the
//! engine's own tests implement them over a manual clock. Everything runs on
//! one thread, so callbacks are plain boxed closures without `Send`.

use std::rc::Rc;

use crate::api::error::RevealError;
use crate::assets::svg::PreparedSvg;
use crate::systems::scroll::ScrollMetrics;

/// One-shot timers.
pub trait TimerHost {
    /// Run `task` once after `delay_ms`. There is no handle and no way to
    /// cancel it.
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// A mounted layer element.
pub trait LayerHandle: Clone + 'static {
    /// Set the element's opacity to 1, starting its CSS transition.
    fn reveal(&self);

    /// Register `callback` for the element's next `transitionend` event. The
    /// listener removes itself after the first delivery.
    fn once_transition_end(&self, callback: Box<dyn FnOnce()>);
}

/// The page surface the stage mounts into.
pub trait PageHost: Clone + 'static {
    type Layer: LayerHandle;

    /// Replace the mount container's contents with the prepared SVG.
    fn mount_svg(&self, svg: &PreparedSvg) -> Result<(), RevealError>;

    /// Replace the mount container's contents with fallback markup.
    fn mount_fallback(&self, html: &str);

    /// Layer elements of the mounted SVG, in document order.
    fn layers(&self) -> Result<Vec<Self::Layer>, RevealError>;

    /// Add the visible class to the overlay element. No-op when the page has
    /// no overlay.
    fn show_overlay(&self);
}

/// Window scroll state and listeners.
pub trait ScrollHost: Clone + 'static {
    fn metrics(&self) -> ScrollMetrics;

    /// Register a passive scroll listener.
    fn on_scroll(&self, handler: Rc<dyn Fn()>);

    fn on_resize(&self, handler: Rc<dyn Fn()>);
}

/// The playback side of a scroll-video instance.
pub trait VideoSink: 'static {
    /// Forward a playback fraction in `[0, 1]`. Returns `false` when the
    /// instance does not expose a percentage setter.
    fn set_video_percentage(&self, progress: f64) -> bool;
}
