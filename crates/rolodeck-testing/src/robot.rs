//! Robot-style pointer drivers: scripted drags against a mounted
//! carousel, expressed the way a host adapter would deliver them.

use crate::harness::{ManualClock, ManualRuntime};
use crate::surface::RecordingSurface;
use rolodeck_foundation::PointerEvent;
use rolodeck_ui::{Carousel, CarouselPhase};
use rolodeck_ui_graphics::Point;

// X never affects a vertical carousel; any plausible column works.
const POINTER_X: f32 = 160.0;

pub fn press(carousel: &Carousel<RecordingSurface, ManualClock>, y: f32) {
    carousel
        .on_pointer_event(&PointerEvent::down(Point::new(POINTER_X, y)))
        .expect("pointer down rejected");
}

pub fn release(carousel: &Carousel<RecordingSurface, ManualClock>, y: f32) {
    carousel
        .on_pointer_event(&PointerEvent::up(Point::new(POINTER_X, y)))
        .expect("pointer up rejected");
}

/// Presses at `start_y`, then for each `(advance_millis, y)` step moves
/// the clock and the pointer, and releases at the final position.
pub fn drive_vertical_drag(
    carousel: &Carousel<RecordingSurface, ManualClock>,
    runtime: &ManualRuntime,
    start_y: f32,
    steps: &[(u64, f32)],
) {
    press(carousel, start_y);
    let mut last_y = start_y;
    for &(advance, y) in steps {
        runtime.advance_millis(advance);
        carousel
            .on_pointer_event(&PointerEvent::moved(Point::new(POINTER_X, y)))
            .expect("pointer move rejected");
        last_y = y;
    }
    release(carousel, last_y);
}

/// Advances the runtime in 16ms ticks until the carousel reports
/// [`CarouselPhase::Idle`], returning how many ticks that took.
///
/// Panics if the carousel is still animating after `max_ticks`.
pub fn pump_until_rest(
    carousel: &Carousel<RecordingSurface, ManualClock>,
    runtime: &ManualRuntime,
    max_ticks: usize,
) -> usize {
    for tick in 0..max_ticks {
        if carousel.phase() == CarouselPhase::Idle {
            return tick;
        }
        runtime.advance_millis(16);
    }
    panic!("carousel did not come to rest within {max_ticks} ticks");
}
