// systems/reveal.rs
//
// Staggered layer reveal. Every layer gets its own fire-and-forget timer;
// completion is observed on the last layer only, never joined over all of
// them.
//
// Usage:
//   let signal = reveal_sequentially(&timers, &layers, &RevealSchedule::new(100, 200));
//   signal.on_resolved(|| show_overlay());

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::api::config::RevealConfig;
use crate::api::host::{LayerHandle, TimerHost};

/// When each layer is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSchedule {
    /// Delay before layer 0, in milliseconds.
    pub base_delay_ms: u32,
    /// Added per layer index, in milliseconds.
    pub stagger_ms: u32,
}

impl RevealSchedule {
    pub fn new(base_delay_ms: u32, stagger_ms: u32) -> Self {
        Self {
            base_delay_ms,
            stagger_ms,
        }
    }

    /// Delay for the layer at `index`: `base + index * stagger`.
    pub fn delay_for(&self, index: usize) -> u32 {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.base_delay_ms
            .saturating_add(self.stagger_ms.saturating_mul(index))
    }
}

impl From<&RevealConfig> for RevealSchedule {
    fn from(config: &RevealConfig) -> Self {
        Self::new(config.base_delay_ms, config.stagger_ms)
    }
}

impl Default for RevealSchedule {
    fn default() -> Self {
        Self::from(&RevealConfig::default())
    }
}

#[derive(Default)]
struct SignalState {
    resolved: bool,
    callbacks: Vec<Box<dyn FnOnce()>>,
    waker: Option<Waker>,
}

/// Deferred "sequential reveal finished" value.
///
/// Clones share state. Resolves at most once; callbacks registered after
/// resolution run immediately. Also awaitable, for one task at a time.
#[derive(Clone, Default)]
pub struct RevealSignal {
    state: Rc<RefCell<SignalState>>,
}

impl RevealSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A signal that has already resolved.
    pub fn resolved() -> Self {
        let signal = Self::new();
        signal.resolve();
        signal
    }

    pub fn is_resolved(&self) -> bool {
        self.state.borrow().resolved
    }

    /// Run `callback` once the signal resolves.
    pub fn on_resolved(&self, callback: impl FnOnce() + 'static) {
        {
            let mut state = self.state.borrow_mut();
            if !state.resolved {
                state.callbacks.push(Box::new(callback));
                return;
            }
        }
        callback();
    }

    pub(crate) fn resolve(&self) {
        let (callbacks, waker) = {
            let mut state = self.state.borrow_mut();
            if state.resolved {
                return;
            }
            state.resolved = true;
            (std::mem::take(&mut state.callbacks), state.waker.take())
        };
        for callback in callbacks {
            callback();
        }
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl fmt::Debug for RevealSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealSignal")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl Future for RevealSignal {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.state.borrow_mut();
        if state.resolved {
            Poll::Ready(())
        } else {
            state.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

/// Schedule every layer's reveal and return the completion signal.
///
/// Layer `i` is revealed after `schedule.delay_for(i)`. The signal resolves
/// on the last layer's first `transitionend`, or immediately when there are
/// no layers. If that event never arrives the signal never resolves. There
/// is no cancellation, and repeated calls run independently.
pub fn reveal_sequentially<T, L>(timers: &T, layers: &[L], schedule: &RevealSchedule) -> RevealSignal
where
    T: TimerHost,
    L: LayerHandle,
{
    for (index, layer) in layers.iter().enumerate() {
        let layer = layer.clone();
        timers.set_timeout(schedule.delay_for(index), Box::new(move || layer.reveal()));
    }

    let Some(last) = layers.last() else {
        return RevealSignal::resolved();
    };

    let signal = RevealSignal::new();
    let on_end = signal.clone();
    last.once_transition_end(Box::new(move || on_end.resolve()));
    log::debug!("scheduled {} layer reveals", layers.len());
    signal
}
