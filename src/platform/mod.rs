//! Platform abstraction layer
//!
//! Frame scheduling for the driver loop:
//! - `FrameScheduler`: request/cancel a display-refresh callback
//! - `start_loop`: re-arming frame loop returning a cancellable `LoopHandle`
//! - `ManualScheduler`: headless scheduler pumped by the caller (native, tests)
//! - `web::AnimationFrames`: `requestAnimationFrame` on wasm32

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Identifier of a pending frame request
pub type FrameId = i32;

/// Callback receiving the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Source of display-refresh callbacks
pub trait FrameScheduler {
    /// Queue `callback` for the next refresh. `None` if the host refused.
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameId>;
    /// Drop a pending request; unknown ids are ignored
    fn cancel_frame(&self, id: FrameId);
}

#[derive(Debug, Default)]
struct LoopState {
    cancelled: Cell<bool>,
    pending: Cell<Option<FrameId>>,
}

/// Handle to a running frame loop.
///
/// Dropping the handle leaves the loop running; call [`LoopHandle::cancel`]
/// on unmount.
pub struct LoopHandle {
    state: Rc<LoopState>,
    scheduler: Rc<dyn FrameScheduler>,
}

impl LoopHandle {
    /// Stop the loop. The pending frame is cancelled and no frame body runs
    /// after this returns.
    pub fn cancel(&self) {
        if self.state.cancelled.replace(true) {
            return;
        }
        if let Some(id) = self.state.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        log::debug!("Frame loop cancelled");
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }

    /// Cancel only if the page is being discarded. Returns true if the loop
    /// was stopped.
    pub fn page_hidden(&self, hide: PageHide) -> bool {
        match hide {
            PageHide::Cached => false,
            PageHide::Unloaded => {
                self.cancel();
                true
            }
        }
    }
}

/// How a hidden page is leaving, from `PageTransitionEvent.persisted`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageHide {
    /// Kept in the back/forward cache; pending frames resume on return
    Cached,
    /// Discarded for good
    Unloaded,
}

impl PageHide {
    pub fn from_persisted(persisted: bool) -> Self {
        if persisted {
            PageHide::Cached
        } else {
            PageHide::Unloaded
        }
    }
}

impl std::fmt::Debug for LoopHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoopHandle")
            .field("cancelled", &self.state.cancelled.get())
            .field("pending", &self.state.pending.get())
            .finish()
    }
}

/// Run `frame` once per display refresh until the returned handle is
/// cancelled. The next frame is requested only after `frame` returns.
pub fn start_loop<F>(scheduler: Rc<dyn FrameScheduler>, frame: F) -> LoopHandle
where
    F: FnMut(f64) + 'static,
{
    let state = Rc::new(LoopState::default());
    schedule_next(Rc::clone(&scheduler), Rc::clone(&state), frame);
    LoopHandle { state, scheduler }
}

fn schedule_next<F>(scheduler: Rc<dyn FrameScheduler>, state: Rc<LoopState>, mut frame: F)
where
    F: FnMut(f64) + 'static,
{
    let next_scheduler = Rc::clone(&scheduler);
    let next_state = Rc::clone(&state);
    let id = scheduler.request_frame(Box::new(move |time| {
        next_state.pending.set(None);
        if next_state.cancelled.get() {
            return;
        }
        frame(time);
        if !next_state.cancelled.get() {
            schedule_next(next_scheduler, next_state, frame);
        }
    }));
    if id.is_none() {
        log::warn!("Frame request refused; loop stopped");
    }
    state.pending.set(id);
}

/// Headless scheduler: frames run only when [`ManualScheduler::pump`] is called
pub struct ManualScheduler {
    queue: RefCell<VecDeque<(FrameId, FrameCallback)>>,
    next_id: Cell<FrameId>,
    now_ms: Cell<f64>,
    interval_ms: f64,
}

impl ManualScheduler {
    /// Scheduler advancing a virtual clock at `refresh_hz`
    pub fn new(refresh_hz: f64) -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
            next_id: Cell::new(1),
            now_ms: Cell::new(0.0),
            interval_ms: 1000.0 / refresh_hz,
        }
    }

    /// Number of callbacks waiting for the next refresh
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Virtual time of the last refresh (ms)
    pub fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }

    /// Simulate one refresh: run every callback queued before it.
    /// Returns false if nothing was queued.
    pub fn pump(&self) -> bool {
        // Callbacks re-arm themselves, so take the batch before running it
        let batch: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        if batch.is_empty() {
            return false;
        }
        let time = self.now_ms.get() + self.interval_ms;
        self.now_ms.set(time);
        for (_, callback) in batch {
            callback(time);
        }
        true
    }

    /// Pump up to `frames` refreshes, returning how many ran
    pub fn pump_frames(&self, frames: usize) -> usize {
        (0..frames).take_while(|_| self.pump()).count()
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameId> {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        self.queue.borrow_mut().push_back((id, callback));
        Some(id)
    }

    fn cancel_frame(&self, id: FrameId) {
        self.queue.borrow_mut().retain(|(queued, _)| *queued != id);
    }
}
