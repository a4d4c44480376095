use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::{FrameCallbackId, TickerId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct TickerEntry {
    period_millis: u64,
    next_deadline_millis: u64,
    callback: Rc<dyn Fn() + 'static>,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    tickers: RefCell<FxHashMap<TickerId, TickerEntry>>,
    next_ticker_id: Cell<u64>,
    // Time base for freshly registered tickers; updated on every pump so a
    // ticker registered from inside a callback starts counting from "now".
    last_pump_millis: Cell<u64>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            tickers: RefCell::new(FxHashMap::default()),
            next_ticker_id: Cell::new(1),
            last_pump_millis: Cell::new(0),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn clear_needs_frame_if_idle(&self) {
        if self.frame_callbacks.borrow().is_empty() && self.tickers.borrow().is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        drop(callbacks);
        self.clear_needs_frame_if_idle();
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        for callback in pending {
            callback(frame_time_nanos);
        }
        self.clear_needs_frame_if_idle();
    }

    fn register_ticker(&self, period_millis: u64, callback: Rc<dyn Fn() + 'static>) -> TickerId {
        // A zero period would never advance the deadline below.
        let period_millis = period_millis.max(1);
        let id = self.next_ticker_id.get();
        self.next_ticker_id.set(id + 1);
        self.tickers.borrow_mut().insert(
            id,
            TickerEntry {
                period_millis,
                next_deadline_millis: self.last_pump_millis.get() + period_millis,
                callback,
            },
        );
        log::trace!("ticker {id} registered at {period_millis}ms");
        self.schedule();
        id
    }

    fn cancel_ticker(&self, id: TickerId) {
        if self.tickers.borrow_mut().remove(&id).is_some() {
            log::trace!("ticker {id} cancelled");
        }
        self.clear_needs_frame_if_idle();
    }

    fn has_ticker(&self, id: TickerId) -> bool {
        self.tickers.borrow().contains_key(&id)
    }

    fn has_tickers(&self) -> bool {
        !self.tickers.borrow().is_empty()
    }

    /// Fires every ticker whose deadline has passed, at fixed rate: a pump
    /// that jumps several periods ahead fires the callback once per missed
    /// period, in registration order across tickers.
    fn run_due_tickers(&self, now_millis: u64) {
        self.last_pump_millis.set(now_millis);
        let mut due: SmallVec<[(TickerId, Rc<dyn Fn() + 'static>, u32); 2]> = SmallVec::new();
        {
            let mut tickers = self.tickers.borrow_mut();
            for (id, entry) in tickers.iter_mut() {
                let mut fires = 0u32;
                while entry.next_deadline_millis <= now_millis {
                    entry.next_deadline_millis += entry.period_millis;
                    fires += 1;
                }
                if fires > 0 {
                    due.push((*id, entry.callback.clone(), fires));
                }
            }
        }
        due.sort_by_key(|(id, _, _)| *id);
        for (id, callback, fires) in due {
            if fires > 1 {
                log::trace!("ticker {id} catching up {fires} fires");
            }
            for _ in 0..fires {
                // The callback may have cancelled this ticker mid-burst.
                if !self.has_ticker(id) {
                    break;
                }
                callback();
            }
        }
        self.clear_needs_frame_if_idle();
    }

    fn next_ticker_deadline(&self) -> Option<u64> {
        self.tickers
            .borrow()
            .values()
            .map(|entry| entry.next_deadline_millis)
            .min()
    }
}

#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether any callback or ticker is waiting on a pump. Polling hosts
    /// use this to skip frame work entirely when the runtime is idle.
    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

/// Scheduler that wakes nobody. Useful for tests and manually pumped hosts.
#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub(crate) fn register_ticker(
        &self,
        period_millis: u64,
        callback: Rc<dyn Fn() + 'static>,
    ) -> Option<TickerId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_ticker(period_millis, callback))
    }

    pub(crate) fn cancel_ticker(&self, id: TickerId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_ticker(id);
        }
    }

    pub fn has_tickers(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_tickers())
            .unwrap_or(false)
    }

    /// Fires tickers whose deadlines are at or before `now_millis`.
    ///
    /// `now_millis` must come from the same timeline on every call, e.g.
    /// milliseconds since host start.
    pub fn run_due_tickers(&self, now_millis: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.run_due_tickers(now_millis);
        }
    }

    /// Earliest pending ticker deadline on the pump timeline, for hosts
    /// that sleep between events.
    pub fn next_ticker_deadline(&self) -> Option<u64> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.next_ticker_deadline())
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
