//! Pointer input and gesture foundation for the Rolodeck carousel.
//!
//! - [`PointerEvent`] and friends: the host-facing input vocabulary, with
//!   consumption tracking shared across clones.
//! - [`VelocityTracker`]: instantaneous velocity estimation in px/ms.
//! - [`DragAnchor`]: start-of-drag bookkeeping that turns pointer
//!   positions into scroll offsets.
//! - [`gesture_constants`]: the tunables gating gesture handoff.

pub mod gesture_constants;
mod drag;
mod input;
mod velocity_tracker;

pub use drag::DragAnchor;
pub use input::{PointerEvent, PointerEventKind, PointerId};
pub use velocity_tracker::VelocityTracker;
