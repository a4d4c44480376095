//! Headless test harness for the carousel: a manually advanced clock and
//! runtime, a recording render surface, and robot-style drag helpers.

mod harness;
mod robot;
mod surface;

pub use harness::{ManualClock, ManualRuntime};
pub use robot::{drive_vertical_drag, pump_until_rest, press, release};
pub use surface::{RecordingSurface, SurfaceRejected};
