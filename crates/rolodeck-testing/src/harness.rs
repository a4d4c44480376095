use rolodeck_core::{Clock, DefaultScheduler, Runtime, RuntimeHandle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Clock whose time only moves when a test advances it.
///
/// Clones share the same timeline, so the copy handed to the carousel and
/// the copy kept by the harness always agree.
#[derive(Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }

    pub fn advance_millis(&self, millis: u64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    type Instant = u64;

    fn now(&self) -> Self::Instant {
        self.now_millis()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        self.now_millis().saturating_sub(since)
    }
}

/// Manually pumped runtime for headless tests.
///
/// `advance_millis` moves the shared [`ManualClock`] forward, fires every
/// ticker that became due, then drains frame callbacks once at the new
/// time. Stepping in ticker-sized increments gives one fire per call;
/// a large jump fires the catch-up burst the runtime guarantees.
pub struct ManualRuntime {
    runtime: Runtime,
    clock: ManualClock,
}

impl ManualRuntime {
    pub fn new() -> Self {
        let harness = Self {
            runtime: Runtime::new(Arc::new(DefaultScheduler)),
            clock: ManualClock::new(),
        };
        // Put the ticker timeline on the clock's origin before anything
        // registers, so first deadlines are measured from test time zero.
        harness
            .runtime
            .handle()
            .run_due_tickers(harness.clock.now_millis());
        harness
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// A clone of the harness clock, for handing to the code under test.
    pub fn clock(&self) -> ManualClock {
        self.clock.clone()
    }

    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    pub fn advance_millis(&self, millis: u64) {
        self.clock.advance_millis(millis);
        let now = self.clock.now_millis();
        let handle = self.runtime.handle();
        handle.run_due_tickers(now);
        handle.drain_frame_callbacks(now * 1_000_000);
    }

    /// Drains frame callbacks at the current time without advancing it.
    pub fn pump_frame(&self) {
        let now = self.clock.now_millis();
        self.runtime.handle().drain_frame_callbacks(now * 1_000_000);
    }

    pub fn has_tickers(&self) -> bool {
        self.runtime.handle().has_tickers()
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.runtime.handle().has_frame_callbacks()
    }
}

impl Default for ManualRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_timeline() {
        let clock = ManualClock::new();
        let copy = clock.clone();
        clock.advance_millis(250);
        assert_eq!(copy.now_millis(), 250);
        assert_eq!(copy.elapsed_millis(100), 150);
    }

    #[test]
    fn elapsed_saturates_for_future_instants() {
        let clock = ManualClock::new();
        clock.advance_millis(10);
        assert_eq!(clock.elapsed_millis(40), 0);
    }

    #[test]
    fn advance_fires_due_tickers_and_frames() {
        use std::cell::Cell;
        use std::rc::Rc;

        let harness = ManualRuntime::new();
        let ticks = Rc::new(Cell::new(0u32));
        let frames = Rc::new(Cell::new(0u32));

        let handle = harness.handle();
        let ticks_in = Rc::clone(&ticks);
        let _ticker = handle.set_interval(16, move || {
            ticks_in.set(ticks_in.get() + 1);
        });
        let frames_in = Rc::clone(&frames);
        let _frame = handle.frame_clock().with_frame_nanos(move |_| {
            frames_in.set(frames_in.get() + 1);
        });

        harness.advance_millis(16);
        assert_eq!(ticks.get(), 1);
        assert_eq!(frames.get(), 1);

        harness.advance_millis(48);
        assert_eq!(ticks.get(), 4);
    }
}
