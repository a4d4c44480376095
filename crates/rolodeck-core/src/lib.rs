//! Runtime services for the Rolodeck carousel engine.
//!
//! This crate carries no UI types. It provides:
//! - platform abstraction traits ([`Clock`], [`RuntimeScheduler`]) so the
//!   engine never reads global time or talks to a host loop directly,
//! - a single-threaded [`Runtime`] with two callback registries: one-shot
//!   per-frame callbacks (drained by the host once per frame) and
//!   fixed-interval tickers (fired whenever the host pumps time past
//!   their deadlines),
//! - RAII registrations ([`FrameCallbackRegistration`],
//!   [`TickerRegistration`]) that cancel their callback on drop.

mod frame_clock;
mod platform;
mod runtime;
mod ticker;

pub(crate) type FrameCallbackId = u64;
pub(crate) type TickerId = u64;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};
pub use ticker::TickerRegistration;
