//! Momentum animation driver for the carousel.
//!
//! Drives the geometric decay on the runtime's ticker service: one step
//! per fired tick, regardless of how late the host pumps.

use rolodeck_animation::MomentumDecay;
use rolodeck_core::{RuntimeHandle, TickerRegistration};
use rolodeck_foundation::gesture_constants::MIN_MOMENTUM_VELOCITY;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// State for an active momentum run.
struct MomentumState {
    /// Displacement the next tick will apply, in px/tick.
    momentum: Cell<f32>,
    /// Whether the run is still active.
    is_running: Cell<bool>,
    /// Ticker registration (kept alive to keep stepping).
    registration: Option<TickerRegistration>,
}

/// Applies decaying displacement steps to a scroll target.
///
/// `start` replaces any in-flight run atomically: the previous ticker is
/// cancelled before the new state is installed, so two runs never step
/// the same target.
pub struct MomentumAnimation {
    state: Rc<RefCell<Option<MomentumState>>>,
    runtime: RuntimeHandle,
    decay: MomentumDecay,
}

impl MomentumAnimation {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self::with_decay(runtime, MomentumDecay::default())
    }

    pub fn with_decay(runtime: RuntimeHandle, decay: MomentumDecay) -> Self {
        Self {
            state: Rc::new(RefCell::new(None)),
            runtime,
            decay,
        }
    }

    /// Starts a momentum run from a release velocity in px/ms.
    ///
    /// * `on_tick` - invoked once per tick with the displacement to apply
    /// * `on_end` - invoked when the run decays below the stop threshold;
    ///   called immediately when `velocity` is too slow to animate at all
    pub fn start<F, G>(&self, velocity: f32, on_tick: F, on_end: G)
    where
        F: Fn(f32) + 'static,
        G: FnOnce() + 'static,
    {
        self.cancel();

        if velocity.abs() <= MIN_MOMENTUM_VELOCITY {
            on_end();
            return;
        }

        let seed = self.decay.seed(velocity);
        log::debug!("momentum seeded at {seed:.2} px/tick");

        #[cfg(feature = "test-helpers")]
        LAST_MOMENTUM_SEED.with(|cell| cell.set(Some(seed)));

        *self.state.borrow_mut() = Some(MomentumState {
            momentum: Cell::new(seed),
            is_running: Cell::new(true),
            registration: None,
        });

        let state = Rc::downgrade(&self.state);
        let decay = self.decay;
        let on_end = RefCell::new(Some(on_end));
        let registration = self.runtime.set_interval(decay.tick_millis, move || {
            // Weak: dropping the animation cancels the ticker through the
            // registration, so a dead run never keeps stepping.
            let Some(state) = state.upgrade() else { return };
            // Step under a short borrow; callbacks run with it released
            // so they may touch this animation again.
            let step = {
                let guard = state.borrow();
                let Some(run) = guard.as_ref() else { return };
                if !run.is_running.get() {
                    return;
                }
                let next = decay.step(run.momentum.get());
                run.momentum.set(next);
                let finished = decay.is_finished(next);
                if finished {
                    run.is_running.set(false);
                }
                (next, finished)
            };

            // The final sub-threshold step is still applied, then the run
            // stops.
            on_tick(step.0);

            if step.1 {
                if let Some(run) = state.borrow_mut().take() {
                    drop(run.registration);
                }
                if let Some(end) = on_end.borrow_mut().take() {
                    log::debug!("momentum rested");
                    end();
                }
            }
        });

        if let Some(run) = self.state.borrow_mut().as_mut() {
            run.registration = Some(registration);
        }
    }

    /// Halts the run without calling `on_end`. No further ticks fire.
    pub fn cancel(&self) {
        if let Some(state) = self.state.borrow_mut().take() {
            state.is_running.set(false);
            // Registration is dropped, cancelling the ticker
            drop(state.registration);
        }
    }

    /// Returns true if a momentum run is currently active.
    pub fn is_running(&self) -> bool {
        self.state
            .borrow()
            .as_ref()
            .is_some_and(|s| s.is_running.get())
    }
}

impl Clone for MomentumAnimation {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            runtime: self.runtime.clone(),
            decay: self.decay,
        }
    }
}

#[cfg(feature = "test-helpers")]
thread_local! {
    static LAST_MOMENTUM_SEED: Cell<Option<f32>> = const { Cell::new(None) };
}

/// Seed of the most recently started momentum run, for end-to-end test
/// verification. `None` until a run has started on this thread.
#[cfg(feature = "test-helpers")]
pub fn last_momentum_seed() -> Option<f32> {
    LAST_MOMENTUM_SEED.with(|cell| cell.get())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolodeck_core::{DefaultScheduler, Runtime};
    use std::sync::Arc;

    fn runtime() -> Runtime {
        Runtime::new(Arc::new(DefaultScheduler))
    }

    #[test]
    fn slow_release_ends_immediately_without_a_ticker() {
        let runtime = runtime();
        let handle = runtime.handle();
        let momentum = MomentumAnimation::new(handle.clone());

        let ended = Rc::new(Cell::new(false));
        let ticked = Rc::new(Cell::new(false));
        let ended_cb = ended.clone();
        let ticked_cb = ticked.clone();
        momentum.start(
            0.1,
            move |_| ticked_cb.set(true),
            move || ended_cb.set(true),
        );

        assert!(ended.get(), "on_end not called for a sub-threshold release");
        assert!(!momentum.is_running());
        assert!(!handle.has_tickers(), "a ticker was registered anyway");

        handle.run_due_tickers(1_000);
        assert!(!ticked.get());
    }

    #[test]
    fn first_tick_applies_decayed_seed() {
        let runtime = runtime();
        let handle = runtime.handle();
        let momentum = MomentumAnimation::new(handle.clone());

        let applied = Rc::new(RefCell::new(Vec::new()));
        let applied_cb = applied.clone();
        momentum.start(0.2, move |step| applied_cb.borrow_mut().push(step), || {});
        assert!(momentum.is_running());

        handle.run_due_tickers(16);
        let applied = applied.borrow();
        assert_eq!(applied.len(), 1);
        assert!((applied[0] - 22.8).abs() < 1e-4, "first step {}", applied[0]);
    }

    #[test]
    fn run_decays_to_rest_and_reports_end() {
        let runtime = runtime();
        let handle = runtime.handle();
        let momentum = MomentumAnimation::new(handle.clone());

        let total = Rc::new(Cell::new(0.0f32));
        let ended = Rc::new(Cell::new(false));
        let total_cb = total.clone();
        let ended_cb = ended.clone();
        momentum.start(
            0.2,
            move |step| total_cb.set(total_cb.get() + step),
            move || ended_cb.set(true),
        );

        // Pump far past the ~152 ticks the decay needs.
        for frame in 1..=300 {
            handle.run_due_tickers(frame * 16);
        }

        assert!(ended.get(), "run never rested");
        assert!(!momentum.is_running());
        assert!(!handle.has_tickers(), "ticker left behind after resting");
        // Geometric series sum: 24 * 0.95 / 0.05, minus the truncated tail.
        let total = total.get();
        assert!((450.0..457.0).contains(&total), "total travel {total}");
    }

    #[test]
    fn cancel_stops_future_ticks() {
        let runtime = runtime();
        let handle = runtime.handle();
        let momentum = MomentumAnimation::new(handle.clone());

        let ticks = Rc::new(Cell::new(0u32));
        let ended = Rc::new(Cell::new(false));
        let ticks_cb = ticks.clone();
        let ended_cb = ended.clone();
        momentum.start(
            1.0,
            move |_| ticks_cb.set(ticks_cb.get() + 1),
            move || ended_cb.set(true),
        );

        handle.run_due_tickers(16);
        assert_eq!(ticks.get(), 1);

        momentum.cancel();
        assert!(!momentum.is_running());
        handle.run_due_tickers(160);
        assert_eq!(ticks.get(), 1, "cancelled run kept ticking");
        assert!(!ended.get(), "cancel must not report a natural end");
    }

    #[test]
    fn restart_replaces_the_previous_run() {
        let runtime = runtime();
        let handle = runtime.handle();
        let momentum = MomentumAnimation::new(handle.clone());

        let first_ticks = Rc::new(Cell::new(0u32));
        let second_ticks = Rc::new(Cell::new(0u32));

        let first_cb = first_ticks.clone();
        momentum.start(1.0, move |_| first_cb.set(first_cb.get() + 1), || {});
        handle.run_due_tickers(16);
        assert_eq!(first_ticks.get(), 1);

        let second_cb = second_ticks.clone();
        momentum.start(-1.0, move |_| second_cb.set(second_cb.get() + 1), || {});
        handle.run_due_tickers(32);
        handle.run_due_tickers(48);

        assert_eq!(first_ticks.get(), 1, "replaced run kept receiving ticks");
        assert!(second_ticks.get() >= 1);
    }

    #[test]
    fn negative_velocity_steps_negative() {
        let runtime = runtime();
        let handle = runtime.handle();
        let momentum = MomentumAnimation::new(handle.clone());

        let last = Rc::new(Cell::new(0.0f32));
        let last_cb = last.clone();
        momentum.start(-0.2, move |step| last_cb.set(step), || {});

        handle.run_due_tickers(16);
        assert!((last.get() + 22.8).abs() < 1e-4, "first step {}", last.get());
    }
}
