//! Test doubles for the host traits, driven by a manual clock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Wake, Waker};

use crate::api::error::RevealError;
use crate::api::host::{LayerHandle, PageHost, ScrollHost, TimerHost, VideoSink};
use crate::assets::svg::PreparedSvg;
use crate::systems::scroll::ScrollMetrics;

/// Virtual time plus the order in which layers were revealed.
#[derive(Default)]
pub struct Clock {
    now: Cell<u64>,
    reveals: RefCell<Vec<usize>>,
}

impl Clock {
    pub fn now(&self) -> u64 {
        self.now.get()
    }
}

struct Pending {
    due: u64,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

/// Timers that only fire when the test advances the clock.
#[derive(Clone, Default)]
pub struct ManualTimers {
    clock: Rc<Clock>,
    queue: Rc<RefCell<Vec<Pending>>>,
    next_seq: Rc<Cell<u64>>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> Rc<Clock> {
        self.clock.clone()
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn reveal_log(&self) -> Vec<usize> {
        self.clock.reveals.borrow().clone()
    }

    /// Fire every timer due at or before `t`, earliest first, ties in
    /// registration order. Timers scheduled by fired tasks are honoured.
    pub fn advance_to(&self, t: u64) {
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let earliest = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= t)
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(i, _)| i);
                earliest.map(|i| queue.remove(i))
            };
            let Some(pending) = next else { break };
            self.clock.now.set(pending.due);
            (pending.task)();
        }
        self.clock.now.set(t.max(self.clock.now()));
    }

    pub fn advance_by(&self, ms: u64) {
        self.advance_to(self.now() + ms);
    }

    /// Fire everything that is queued.
    pub fn run_all(&self) {
        let last = self.queue.borrow().iter().map(|p| p.due).max();
        if let Some(last) = last {
            self.advance_to(last);
        }
    }
}

impl TimerHost for ManualTimers {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.queue.borrow_mut().push(Pending {
            due: self.now() + u64::from(delay_ms),
            seq,
            task,
        });
    }
}

/// A layer that records when it was revealed.
#[derive(Clone)]
pub struct FakeLayer {
    index: usize,
    clock: Rc<Clock>,
    revealed: Rc<RefCell<Vec<u64>>>,
    listeners: Rc<RefCell<Vec<Box<dyn FnOnce()>>>>,
}

impl FakeLayer {
    pub fn new(index: usize, clock: Rc<Clock>) -> Self {
        Self {
            index,
            clock,
            revealed: Rc::default(),
            listeners: Rc::default(),
        }
    }

    pub fn revealed_at(&self) -> Option<u64> {
        self.revealed.borrow().first().copied()
    }

    pub fn reveal_count(&self) -> usize {
        self.revealed.borrow().len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver a `transitionend` event. Returns whether any listener ran.
    pub fn fire_transition_end(&self) -> bool {
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        let ran = !listeners.is_empty();
        for listener in listeners {
            listener();
        }
        ran
    }
}

impl LayerHandle for FakeLayer {
    fn reveal(&self) {
        self.revealed.borrow_mut().push(self.clock.now());
        self.clock.reveals.borrow_mut().push(self.index);
    }

    fn once_transition_end(&self, callback: Box<dyn FnOnce()>) {
        self.listeners.borrow_mut().push(callback);
    }
}

#[derive(Default)]
pub struct PageState {
    pub mounted: Option<String>,
    pub fallback: Option<String>,
    pub overlay_shown: u32,
    pub layers: Vec<FakeLayer>,
    pub fail_mount: bool,
}

/// A stage whose mounted layers are `FakeLayer`s.
#[derive(Clone)]
pub struct FakePage {
    clock: Rc<Clock>,
    pub state: Rc<RefCell<PageState>>,
}

impl FakePage {
    pub fn new(timers: &ManualTimers) -> Self {
        Self {
            clock: timers.clock(),
            state: Rc::default(),
        }
    }

    pub fn failing_mount(timers: &ManualTimers) -> Self {
        let page = Self::new(timers);
        page.state.borrow_mut().fail_mount = true;
        page
    }

    pub fn layer(&self, index: usize) -> FakeLayer {
        self.state.borrow().layers[index].clone()
    }
}

impl PageHost for FakePage {
    type Layer = FakeLayer;

    fn mount_svg(&self, svg: &PreparedSvg) -> Result<(), RevealError> {
        let mut state = self.state.borrow_mut();
        if state.fail_mount {
            return Err(RevealError::Host("appendChild failed".to_string()));
        }
        state.fallback = None;
        state.mounted = Some(svg.markup.clone());
        state.layers = (0..svg.layer_count)
            .map(|i| FakeLayer::new(i, self.clock.clone()))
            .collect();
        Ok(())
    }

    fn mount_fallback(&self, html: &str) {
        let mut state = self.state.borrow_mut();
        state.mounted = None;
        state.layers.clear();
        state.fallback = Some(html.to_string());
    }

    fn layers(&self) -> Result<Vec<FakeLayer>, RevealError> {
        Ok(self.state.borrow().layers.clone())
    }

    fn show_overlay(&self) {
        self.state.borrow_mut().overlay_shown += 1;
    }
}

/// Window scroll state with listeners the test can fire.
#[derive(Clone, Default)]
pub struct FakeWindow {
    pub metrics: Rc<Cell<ScrollMetrics>>,
    scroll: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
    resize: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl FakeWindow {
    pub fn new(metrics: ScrollMetrics) -> Self {
        Self {
            metrics: Rc::new(Cell::new(metrics)),
            ..Self::default()
        }
    }

    pub fn scroll_to(&self, scroll_y: f64) {
        let mut metrics = self.metrics.get();
        metrics.scroll_y = scroll_y;
        self.metrics.set(metrics);
        let handlers = self.scroll.borrow().clone();
        for handler in handlers {
            handler();
        }
    }

    pub fn resize(&self, viewport_height: f64) {
        let mut metrics = self.metrics.get();
        metrics.viewport_height = viewport_height;
        self.metrics.set(metrics);
        let handlers = self.resize.borrow().clone();
        for handler in handlers {
            handler();
        }
    }

    pub fn scroll_listeners(&self) -> usize {
        self.scroll.borrow().len()
    }

    pub fn resize_listeners(&self) -> usize {
        self.resize.borrow().len()
    }
}

impl ScrollHost for FakeWindow {
    fn metrics(&self) -> ScrollMetrics {
        self.metrics.get()
    }

    fn on_scroll(&self, handler: Rc<dyn Fn()>) {
        self.scroll.borrow_mut().push(handler);
    }

    fn on_resize(&self, handler: Rc<dyn Fn()>) {
        self.resize.borrow_mut().push(handler);
    }
}

/// Records every percentage it receives.
#[derive(Default)]
pub struct FakeVideo {
    pub has_setter: bool,
    pub received: RefCell<Vec<f64>>,
}

impl FakeVideo {
    pub fn with_setter() -> Self {
        Self {
            has_setter: true,
            received: RefCell::default(),
        }
    }

    pub fn received(&self) -> Vec<f64> {
        self.received.borrow().clone()
    }
}

impl VideoSink for FakeVideo {
    fn set_video_percentage(&self, progress: f64) -> bool {
        if !self.has_setter {
            return false;
        }
        self.received.borrow_mut().push(progress);
        true
    }
}

struct NoopWake;

impl Wake for NoopWake {
    fn wake(self: Arc<Self>) {}
}

pub fn noop_waker() -> Waker {
    Waker::from(Arc::new(NoopWake))
}
