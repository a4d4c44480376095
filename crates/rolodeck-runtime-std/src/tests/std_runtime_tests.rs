use super::{StdClock, StdRuntime, StdScheduler};
use rolodeck_core::{Clock, RuntimeScheduler};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn scheduler_records_and_clears_frame_requests() {
    let scheduler = StdScheduler::new();
    assert!(!scheduler.take_frame_request());

    scheduler.schedule_frame();
    assert!(scheduler.take_frame_request());
    assert!(!scheduler.take_frame_request(), "request not cleared by take");
}

#[test]
fn frame_waker_fires_until_cleared() {
    let scheduler = StdScheduler::new();
    let wakes = Arc::new(AtomicU32::new(0));

    let wakes_cb = wakes.clone();
    scheduler.set_frame_waker(move || {
        wakes_cb.fetch_add(1, Ordering::SeqCst);
    });
    scheduler.schedule_frame();
    scheduler.schedule_frame();
    assert_eq!(wakes.load(Ordering::SeqCst), 2);

    scheduler.clear_frame_waker();
    scheduler.schedule_frame();
    assert_eq!(wakes.load(Ordering::SeqCst), 2);
}

#[test]
fn registering_work_requests_a_frame() {
    let std_runtime = StdRuntime::new();
    assert!(!std_runtime.take_frame_request());

    let _registration = std_runtime.frame_clock().with_frame_nanos(|_| {});
    assert!(std_runtime.take_frame_request());

    let _ticker = std_runtime.runtime_handle().set_interval(16, || {});
    assert!(std_runtime.take_frame_request());
}

#[test]
fn runtime_waker_fires_for_new_registrations() {
    let std_runtime = StdRuntime::new();
    let wakes = Arc::new(AtomicU32::new(0));

    let wakes_cb = wakes.clone();
    std_runtime.set_frame_waker(move || {
        wakes_cb.fetch_add(1, Ordering::SeqCst);
    });
    let _registration = std_runtime.frame_clock().with_frame_nanos(|_| {});
    assert_eq!(wakes.load(Ordering::SeqCst), 1);

    std_runtime.clear_frame_waker();
    let _second = std_runtime.frame_clock().with_frame_nanos(|_| {});
    assert_eq!(wakes.load(Ordering::SeqCst), 1, "cleared waker still firing");
}

#[test]
fn uptime_tracks_real_time() {
    let std_runtime = StdRuntime::new();
    thread::sleep(Duration::from_millis(5));
    assert!(std_runtime.uptime_millis() >= 5);
}

#[test]
fn clock_reports_elapsed_millis() {
    let clock = StdClock;
    let start = clock.now();
    thread::sleep(Duration::from_millis(5));
    let elapsed = clock.elapsed_millis(start);
    assert!(elapsed >= 5, "elapsed {elapsed}ms after a 5ms sleep");
    assert!(clock.elapsed(start).as_millis() as u64 >= elapsed.saturating_sub(1));
}

#[test]
fn pump_fires_due_tickers_and_frame_callbacks() {
    let std_runtime = StdRuntime::new();
    let handle = std_runtime.runtime_handle();

    let ticks = Rc::new(Cell::new(0u32));
    let ticks_cb = ticks.clone();
    let _ticker = handle.set_interval(16, move || ticks_cb.set(ticks_cb.get() + 1));

    let frame_seen = Rc::new(Cell::new(false));
    let frame_cb = frame_seen.clone();
    let _registration = std_runtime
        .frame_clock()
        .with_frame_nanos(move |_| frame_cb.set(true));

    thread::sleep(Duration::from_millis(20));
    std_runtime.pump();

    assert!(ticks.get() >= 1, "ticker missed after 20ms of real time");
    assert!(frame_seen.get());
}
