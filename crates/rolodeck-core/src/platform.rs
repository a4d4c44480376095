//! Platform abstraction traits for the Rolodeck runtime.
//!
//! These traits let the engine delegate scheduling and clock
//! responsibilities to the host, so the same code runs against a real
//! event loop or a manually pumped test harness.

/// Schedules work for the runtime.
///
/// Implementations are responsible for waking the host loop when the
/// runtime has pending callbacks. They must be safe to use from multiple
/// threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}
