//! Geometric decay specification for post-release inertial scrolling.
//!
//! The model is tick-based, not time-based: every fired tick multiplies
//! the remaining momentum by a constant factor and displaces the offset
//! by that momentum. Wall-clock jitter between ticks changes *when* steps
//! land, never *how much* each step moves.

/// Fraction of momentum surviving each tick.
const DECAY_PER_TICK: f32 = 0.95;

/// Momentum magnitude, in px/tick, below which the animation rests.
const STOP_THRESHOLD: f32 = 0.01;

/// Converts release velocity (px/ms) into the seed displacement (px/tick).
const SEED_SCALE: f32 = 120.0;

/// Period of the ticker driving the decay.
const TICK_MILLIS: u64 = 16;

/// Momentum decay parameters plus the pure stepping functions.
///
/// `Default` wires up the stock carousel feel; the fields are public so
/// tests (and adventurous hosts) can tune them as a unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MomentumDecay {
    pub decay_per_tick: f32,
    pub stop_threshold: f32,
    pub seed_scale: f32,
    pub tick_millis: u64,
}

impl Default for MomentumDecay {
    fn default() -> Self {
        Self {
            decay_per_tick: DECAY_PER_TICK,
            stop_threshold: STOP_THRESHOLD,
            seed_scale: SEED_SCALE,
            tick_millis: TICK_MILLIS,
        }
    }
}

impl MomentumDecay {
    /// Seed displacement for a drag released at `velocity` px/ms.
    pub fn seed(&self, velocity: f32) -> f32 {
        velocity * self.seed_scale
    }

    /// Momentum carried into the next tick.
    pub fn step(&self, momentum: f32) -> f32 {
        momentum * self.decay_per_tick
    }

    /// Whether `momentum` is too small to keep animating.
    ///
    /// Strict comparison: a momentum of exactly the threshold still gets
    /// applied for one more tick.
    pub fn is_finished(&self, momentum: f32) -> bool {
        momentum.abs() < self.stop_threshold
    }
}
