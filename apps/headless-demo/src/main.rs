//! Terminal demo: mounts the carousel on a text-only surface, scripts a
//! drag through it, and pumps the runtime in real time until the release
//! momentum spins down.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use rolodeck_foundation::PointerEvent;
use rolodeck_runtime_std::{StdClock, StdRuntime};
use rolodeck_ui::{Carousel, CarouselPhase, CursorIcon, RenderSurface};
use rolodeck_ui_graphics::{CardLayer, Point};

const FRAME: Duration = Duration::from_millis(16);

struct TerminalState {
    layers: RefCell<Vec<CardLayer>>,
    cursor: Cell<CursorIcon>,
    viewport_height: Cell<f32>,
}

/// Surface that keeps the latest layer per card and prints snapshots on
/// demand. Clones share state so the demo can inspect what the carousel
/// painted.
#[derive(Clone)]
struct TerminalSurface {
    state: Rc<TerminalState>,
}

impl TerminalSurface {
    fn new(viewport_height: f32) -> Self {
        Self {
            state: Rc::new(TerminalState {
                layers: RefCell::new(Vec::new()),
                cursor: Cell::new(CursorIcon::Grab),
                viewport_height: Cell::new(viewport_height),
            }),
        }
    }

    fn print_snapshot(&self, label: &str) {
        println!("{label} (cursor: {:?})", self.state.cursor.get());
        for (index, layer) in self.state.layers.borrow().iter().enumerate() {
            println!(
                "  card {index}: y {:8.1}  scale {:.2}  alpha {:.2}  z {:4}  blur {:4.1}",
                layer.translation_y, layer.scale, layer.alpha, layer.z_index, layer.blur_radius
            );
        }
    }
}

impl RenderSurface for TerminalSurface {
    type Error = Infallible;

    fn create_cards(&mut self, count: usize) -> Result<(), Self::Error> {
        self.state
            .layers
            .borrow_mut()
            .resize(count, CardLayer::default());
        Ok(())
    }

    fn apply_layer(&mut self, index: usize, layer: &CardLayer) -> Result<(), Self::Error> {
        if let Some(slot) = self.state.layers.borrow_mut().get_mut(index) {
            *slot = *layer;
        }
        Ok(())
    }

    fn viewport_height(&self) -> f32 {
        self.state.viewport_height.get()
    }

    fn set_cursor(&mut self, cursor: CursorIcon) -> Result<(), Self::Error> {
        self.state.cursor.set(cursor);
        Ok(())
    }
}

#[cfg(feature = "logging")]
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

#[cfg(not(feature = "logging"))]
fn init_logging() {}

fn main() -> anyhow::Result<()> {
    init_logging();

    println!("=== Rolodeck Headless Demo ===");
    println!("Scripts a pointer drag through a 900px deck, then pumps the");
    println!("runtime at 16ms until the release momentum rests.");
    println!("Run with RUST_LOG=debug to watch the engine's decisions.");
    println!();

    let runtime = StdRuntime::new();
    let surface = TerminalSurface::new(900.0);
    let carousel = Carousel::mount(surface.clone(), StdClock, runtime.runtime_handle())?;
    carousel.start();
    runtime.pump();
    surface.print_snapshot("at rest");

    // Eight upward pulls of 18px, one per frame. Fast enough that the
    // release hands off to momentum.
    let mut y = 640.0;
    carousel.on_pointer_event(&PointerEvent::down(Point::new(160.0, y)))?;
    for _ in 0..8 {
        thread::sleep(FRAME);
        runtime.pump();
        y -= 18.0;
        carousel.on_pointer_event(&PointerEvent::moved(Point::new(160.0, y)))?;
    }
    carousel.on_pointer_event(&PointerEvent::up(Point::new(160.0, y)))?;
    println!();
    println!(
        "released in {:?} at offset {:.1}",
        carousel.phase(),
        carousel.offset()
    );

    let mut frames = 0u32;
    while carousel.phase() != CarouselPhase::Idle {
        thread::sleep(FRAME);
        runtime.pump();
        frames += 1;
        if frames % 64 == 0 {
            log::debug!("frame {frames}: still spinning at {:.1}", carousel.offset());
        }
        if frames > 1_000 {
            anyhow::bail!("momentum never came to rest");
        }
    }
    println!(
        "rested after {frames} frames ({}ms) at offset {:.1}",
        runtime.uptime_millis(),
        carousel.offset()
    );
    println!();
    surface.print_snapshot("after the fling");

    carousel.stop();
    Ok(())
}
