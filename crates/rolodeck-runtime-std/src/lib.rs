//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides concrete implementations of the platform
//! abstraction traits defined in `rolodeck-core`. Hosts construct a
//! [`StdRuntime`], hand its clock and runtime handle to the carousel,
//! and call [`StdRuntime::pump`] from their event loop.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use rolodeck_core::{Clock, FrameClock, Runtime, RuntimeHandle, RuntimeScheduler};
use web_time::Instant;

type FrameWaker = Arc<dyn Fn() + Send + Sync>;

/// Scheduler that records frame requests and wakes a host-provided waker.
pub struct StdScheduler {
    frame_pending: AtomicBool,
    waker: RwLock<Option<FrameWaker>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            frame_pending: AtomicBool::new(false),
            waker: RwLock::new(None),
        }
    }

    /// Consumes the pending frame request, reporting whether one was set.
    ///
    /// A polling host calls this once per loop iteration and skips frame
    /// work entirely when it returns `false`.
    pub fn take_frame_request(&self) -> bool {
        self.frame_pending.swap(false, Ordering::SeqCst)
    }

    /// Installs a waker invoked whenever new frame work is scheduled.
    ///
    /// A blocking host parks on a condvar or event loop and uses the waker
    /// to break out of the wait.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        *self.waker.write().unwrap() = Some(Arc::new(waker));
    }

    /// Removes the installed waker, if any.
    pub fn clear_frame_waker(&self) {
        *self.waker.write().unwrap() = None;
    }

    fn notify_host(&self) {
        // Clone out of the lock so a waker that re-enters the scheduler
        // cannot deadlock on the RwLock.
        let waker = { self.waker.read().unwrap().clone() };
        if let Some(wake) = waker {
            wake();
        }
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.frame_pending.store(true, Ordering::SeqCst);
        self.notify_host();
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let waker_installed = self.waker.read().map(|w| w.is_some()).unwrap_or(false);
        f.debug_struct("StdScheduler")
            .field("frame_pending", &self.frame_pending.load(Ordering::SeqCst))
            .field("waker_installed", &waker_installed)
            .finish()
    }
}

/// Clock implementation backed by [`web_time`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock;

impl StdClock {
    /// Elapsed time as a [`Duration`] for callers that want sub-millisecond
    /// resolution.
    pub fn elapsed(&self, since: Instant) -> Duration {
        since.elapsed()
    }
}

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }
}

/// Bundles a [`Runtime`] with the standard scheduler and a wall clock.
///
/// The runtime's ticker and frame timelines are both stamped from the
/// instant the bundle was constructed, so one [`StdRuntime::pump`] call
/// per loop iteration keeps them in lockstep.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
    runtime: Runtime,
    origin: Instant,
}

impl StdRuntime {
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::new());
        let runtime = Runtime::new(scheduler.clone());
        Self {
            scheduler,
            runtime,
            origin: Instant::now(),
        }
    }

    /// Handle for registering frame callbacks and tickers.
    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// The runtime's frame clock.
    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    /// Milliseconds since this runtime was constructed. This is the
    /// timeline tickers are pumped on.
    pub fn uptime_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    /// Consumes the pending frame request, reporting whether one was set.
    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    /// Installs a waker invoked whenever new frame work is scheduled.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_frame_waker(waker);
    }

    /// Removes the installed waker, if any.
    pub fn clear_frame_waker(&self) {
        self.scheduler.clear_frame_waker();
    }

    /// One host-loop iteration: fires due tickers, then drains frame
    /// callbacks, both stamped from the runtime's own clock.
    pub fn pump(&self) {
        let elapsed = self.origin.elapsed();
        let handle = self.runtime.handle();
        handle.run_due_tickers(elapsed.as_millis() as u64);
        handle.drain_frame_callbacks(elapsed.as_nanos() as u64);
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .field("uptime_millis", &self.uptime_millis())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
