// systems/scroll.rs
//
// Maps page scroll position onto scroll-video playback.
//
// The external video instance may or may not call its ready callback, so the
// binder attaches from that callback and again, unconditionally, after a
// fixed delay. Both attachments stay registered: the handlers only recompute
// progress from the current window state, so a duplicate just forwards the
// same value twice.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::api::config::ScrollVideoConfig;
use crate::api::host::{ScrollHost, TimerHost, VideoSink};

/// Window scroll state, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    /// Full scrollable height of the document.
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            scroll_height,
            viewport_height,
        }
    }

    pub fn progress(&self) -> f64 {
        scroll_progress(*self)
    }
}

/// `clamp(scroll_y / max(1, scroll_height - viewport_height), 0, 1)`.
pub fn scroll_progress(metrics: ScrollMetrics) -> f64 {
    let max_scroll = (metrics.scroll_height - metrics.viewport_height).max(1.0);
    let progress = metrics.scroll_y / max_scroll;
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

/// Options object passed to the scroll-video constructor. The bridge adds
/// the container element and the ready callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollVideoOptions {
    pub src: String,
    pub cover: bool,
    pub sticky: bool,
    pub full: bool,
    pub track_scroll: bool,
    pub transition_speed: f64,
}

impl From<&ScrollVideoConfig> for ScrollVideoOptions {
    fn from(config: &ScrollVideoConfig) -> Self {
        Self {
            src: config.src.clone(),
            cover: config.cover,
            sticky: config.sticky,
            full: config.full,
            track_scroll: config.track_scroll,
            transition_speed: config.transition_speed,
        }
    }
}

impl ScrollVideoOptions {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Register scroll and resize handlers forwarding progress to `sink`, then
/// apply the current progress once.
pub fn attach_scroll<H, V>(host: &H, sink: Rc<V>)
where
    H: ScrollHost,
    V: VideoSink,
{
    let window = host.clone();
    let update: Rc<dyn Fn()> = Rc::new(move || {
        let progress = scroll_progress(window.metrics());
        if !sink.set_video_percentage(progress) {
            log::debug!("scroll video has no percentage setter");
        }
    });
    host.on_scroll(update.clone());
    host.on_resize(update.clone());
    update();
}

/// Attach now-or-later: returns the attach callback for the instance's ready
/// hook and schedules the same callback after `fallback_attach_ms`.
pub fn bind_scroll_video<H, V, T>(
    host: &H,
    timers: &T,
    sink: Rc<V>,
    fallback_attach_ms: u32,
) -> Rc<dyn Fn()>
where
    H: ScrollHost,
    V: VideoSink,
    T: TimerHost,
{
    let window = host.clone();
    let attach: Rc<dyn Fn()> = Rc::new(move || attach_scroll(&window, sink.clone()));

    let fallback = attach.clone();
    timers.set_timeout(fallback_attach_ms, Box::new(move || fallback()));
    attach
}
