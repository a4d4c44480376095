//! Shared gesture constants for the carousel's drag handling.
//!
//! Values are in logical pixels and milliseconds, the units the velocity
//! tracker works in.

/// Minimum release velocity, in logical pixels per millisecond, for a
/// drag to hand off into inertial scrolling.
///
/// Below this the stack simply stops where the pointer left it. The value
/// is deliberately low: 0.1 px/ms is 100 px/s, roughly the slowest motion
/// that still reads as a throw rather than a positioning adjustment.
pub const MIN_MOMENTUM_VELOCITY: f32 = 0.1;
