//! Instantaneous velocity estimation for drag gestures.
//!
//! Deliberately simpler than regression-based trackers: the estimate is
//! whatever the last pair of usable samples said. A flick therefore takes
//! its velocity from the final movement before release, which is exactly
//! the feel this carousel wants.

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_millis: u64,
    position: f32,
}

/// Tracks the velocity of a scalar position over time, in units per
/// millisecond. Feed it the quantity you intend to animate (here: the
/// scroll offset), one sample per pointer event.
#[derive(Debug, Default)]
pub struct VelocityTracker {
    last_sample: Option<Sample>,
    velocity: f32,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a position sample. `time_millis` must be monotonic within
    /// one gesture.
    ///
    /// A sample that lands on the same millisecond as the previous one is
    /// skipped: it carries no usable rate, and skipping keeps the earlier
    /// sample as the baseline so the next event sees the accumulated
    /// delta.
    pub fn add_sample(&mut self, time_millis: u64, position: f32) {
        let Some(previous) = self.last_sample else {
            self.last_sample = Some(Sample {
                time_millis,
                position,
            });
            return;
        };

        let delta_time = time_millis.saturating_sub(previous.time_millis);
        if delta_time == 0 {
            log::trace!("velocity sample at {time_millis}ms skipped (no time elapsed)");
            return;
        }

        self.velocity = (position - previous.position) / delta_time as f32;
        self.last_sample = Some(Sample {
            time_millis,
            position,
        });
    }

    /// Latest velocity estimate in units per millisecond. Zero until two
    /// usable samples have been seen.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn reset(&mut self) {
        self.last_sample = None;
        self.velocity = 0.0;
    }
}
