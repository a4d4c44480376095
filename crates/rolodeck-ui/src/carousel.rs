//! The carousel engine: interaction state machine plus the continuous
//! redraw loop.
//!
//! One scalar offset is the source of truth. Pointer drags write it
//! directly, momentum ticks push it after release, and every layout pass
//! recomputes all card layers from it, so there is no per-card state to
//! drift out of sync.

use crate::deck::DeckGeometry;
use crate::momentum::MomentumAnimation;
use crate::surface::{CursorIcon, RenderSurface};
use rolodeck_core::{Clock, FrameCallbackRegistration, FrameClock, RuntimeHandle};
use rolodeck_foundation::gesture_constants::MIN_MOMENTUM_VELOCITY;
use rolodeck_foundation::{DragAnchor, PointerEvent, PointerEventKind, VelocityTracker};
use rolodeck_ui_graphics::CardLayer;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Interaction phase of the carousel.
///
/// `Dragging` owns the offset while a pointer is down; `Momentum` owns it
/// between release and rest. Entering `Dragging` always cancels a running
/// momentum ticker, so the two never write the offset concurrently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselPhase {
    Idle,
    Dragging,
    Momentum,
}

#[derive(Debug)]
pub enum CarouselError<E> {
    /// The host surface rejected a call.
    Surface(E),
}

impl<E: fmt::Debug> fmt::Display for CarouselError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarouselError::Surface(err) => write!(f, "surface call failed: {err:?}"),
        }
    }
}

impl<E: fmt::Debug> std::error::Error for CarouselError<E> {}

struct CarouselInner<S: RenderSurface, C: Clock> {
    surface: S,
    clock: C,
    time_origin: C::Instant,
    geometry: DeckGeometry,
    frame_clock: FrameClock,
    momentum: MomentumAnimation,
    phase: CarouselPhase,
    offset: f32,
    anchor: Option<DragAnchor>,
    tracker: VelocityTracker,
    redraw: Option<FrameCallbackRegistration>,
    running: bool,
}

impl<S: RenderSurface, C: Clock> CarouselInner<S, C> {
    fn now_millis(&self) -> u64 {
        self.clock.elapsed_millis(self.time_origin)
    }

    /// One layout pass: recomputes every card from the current offset and
    /// the surface's current viewport height, then pushes the layers out.
    fn apply_layout(&mut self) -> Result<(), S::Error> {
        let viewport_height = self.surface.viewport_height();
        let geometry = self.geometry;
        let layers: SmallVec<[CardLayer; 8]> = (0..geometry.card_count)
            .map(|index| geometry.layer_for(index, self.offset, viewport_height))
            .collect();
        for (index, layer) in layers.iter().enumerate() {
            self.surface.apply_layer(index, layer)?;
        }
        Ok(())
    }
}

/// A mounted card carousel.
///
/// `mount` creates the cards and paints the initial layout; `start` runs
/// the per-frame redraw loop until `stop` (dropping the carousel tears
/// everything down the same way). Pointer events go through
/// [`on_pointer_event`](Carousel::on_pointer_event).
pub struct Carousel<S: RenderSurface, C: Clock> {
    inner: Rc<RefCell<CarouselInner<S, C>>>,
}

impl<S, C> Carousel<S, C>
where
    S: RenderSurface + 'static,
    C: Clock + 'static,
    S::Error: fmt::Debug,
{
    /// Mounts a deck with the default geometry (8 cards of 320px, 20px
    /// apart).
    pub fn mount(
        surface: S,
        clock: C,
        runtime: RuntimeHandle,
    ) -> Result<Self, CarouselError<S::Error>> {
        Self::mount_with(surface, clock, runtime, DeckGeometry::default())
    }

    pub fn mount_with(
        mut surface: S,
        clock: C,
        runtime: RuntimeHandle,
        geometry: DeckGeometry,
    ) -> Result<Self, CarouselError<S::Error>> {
        surface
            .create_cards(geometry.card_count)
            .map_err(CarouselError::Surface)?;
        surface
            .set_cursor(CursorIcon::Grab)
            .map_err(CarouselError::Surface)?;

        let time_origin = clock.now();
        let inner = Rc::new(RefCell::new(CarouselInner {
            surface,
            clock,
            time_origin,
            geometry,
            frame_clock: runtime.frame_clock(),
            momentum: MomentumAnimation::new(runtime),
            phase: CarouselPhase::Idle,
            offset: 0.0,
            anchor: None,
            tracker: VelocityTracker::new(),
            redraw: None,
            running: false,
        }));

        inner
            .borrow_mut()
            .apply_layout()
            .map_err(CarouselError::Surface)?;
        log::debug!("carousel mounted with {} cards", geometry.card_count);

        Ok(Self { inner })
    }

    /// Starts the run-until-stopped redraw loop: one layout pass per
    /// pumped frame, reading the viewport height fresh each time.
    pub fn start(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.running {
                return;
            }
            inner.running = true;
        }
        log::debug!("redraw loop started");
        Self::schedule_redraw(&self.inner);
    }

    /// Stops the redraw loop and any momentum run. Idempotent; dropping
    /// the carousel has the same effect through the owned registrations.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.running = false;
        inner.redraw = None;
        inner.momentum.cancel();
        if inner.phase != CarouselPhase::Idle {
            inner.phase = CarouselPhase::Idle;
            inner.anchor = None;
        }
        log::debug!("carousel stopped at offset {}", inner.offset);
    }

    fn schedule_redraw(inner: &Rc<RefCell<CarouselInner<S, C>>>) {
        let frame_clock = inner.borrow().frame_clock.clone();
        let weak = Rc::downgrade(inner);
        let registration = frame_clock.with_frame_nanos(move |_frame_time_nanos| {
            let Some(inner) = weak.upgrade() else { return };
            let keep_running = {
                let mut guard = inner.borrow_mut();
                if !guard.running {
                    return;
                }
                match guard.apply_layout() {
                    Ok(()) => true,
                    Err(err) => {
                        log::error!("redraw failed, stopping loop: {err:?}");
                        guard.running = false;
                        false
                    }
                }
            };
            if keep_running {
                Self::schedule_redraw(&inner);
            }
        });
        inner.borrow_mut().redraw = Some(registration);
    }

    /// Feeds one host pointer event through the interaction state
    /// machine. Move events are consumed while a drag is in progress.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> Result<(), CarouselError<S::Error>> {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event),
            PointerEventKind::Move => self.pointer_move(event),
            PointerEventKind::Up => self.pointer_up(),
            PointerEventKind::Cancel => self.pointer_cancel(),
        }
    }

    fn pointer_down(&self, event: &PointerEvent) -> Result<(), CarouselError<S::Error>> {
        let mut inner = self.inner.borrow_mut();
        // A fresh touch claims the stack no matter what was animating.
        inner.momentum.cancel();

        let now = inner.now_millis();
        let offset = inner.offset;
        inner.phase = CarouselPhase::Dragging;
        inner.anchor = Some(DragAnchor::new(event.position.y, offset));
        inner.tracker.reset();
        inner.tracker.add_sample(now, offset);
        inner
            .surface
            .set_cursor(CursorIcon::Grabbing)
            .map_err(CarouselError::Surface)?;
        log::trace!("drag anchored at y={} offset={offset}", event.position.y);
        Ok(())
    }

    fn pointer_move(&self, event: &PointerEvent) -> Result<(), CarouselError<S::Error>> {
        let mut inner = self.inner.borrow_mut();
        if inner.phase != CarouselPhase::Dragging {
            return Ok(());
        }
        let Some(anchor) = inner.anchor else {
            return Ok(());
        };

        let now = inner.now_millis();
        let offset = anchor.offset_for(event.position.y);
        inner.offset = offset;
        inner.tracker.add_sample(now, offset);
        inner.apply_layout().map_err(CarouselError::Surface)?;
        event.consume();
        Ok(())
    }

    fn pointer_up(&self) -> Result<(), CarouselError<S::Error>> {
        let (momentum, velocity) = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != CarouselPhase::Dragging {
                return Ok(());
            }
            inner.anchor = None;
            inner
                .surface
                .set_cursor(CursorIcon::Grab)
                .map_err(CarouselError::Surface)?;

            let velocity = inner.tracker.velocity();
            if velocity.abs() > MIN_MOMENTUM_VELOCITY {
                inner.phase = CarouselPhase::Momentum;
                (inner.momentum.clone(), velocity)
            } else {
                inner.phase = CarouselPhase::Idle;
                return Ok(());
            }
        };

        log::debug!("momentum handoff at {velocity:.3} px/ms");
        let weak_tick = Rc::downgrade(&self.inner);
        let weak_end = Rc::downgrade(&self.inner);
        momentum.start(
            velocity,
            move |step| {
                let Some(inner) = weak_tick.upgrade() else { return };
                let mut guard = inner.borrow_mut();
                guard.offset += step;
                if let Err(err) = guard.apply_layout() {
                    log::error!("momentum layout failed, halting run: {err:?}");
                    guard.phase = CarouselPhase::Idle;
                    guard.momentum.cancel();
                }
            },
            move || {
                let Some(inner) = weak_end.upgrade() else { return };
                let mut guard = inner.borrow_mut();
                guard.phase = CarouselPhase::Idle;
                log::debug!("momentum rested at offset {}", guard.offset);
            },
        );
        Ok(())
    }

    fn pointer_cancel(&self) -> Result<(), CarouselError<S::Error>> {
        let mut inner = self.inner.borrow_mut();
        if inner.phase != CarouselPhase::Dragging {
            return Ok(());
        }
        inner.anchor = None;
        inner.tracker.reset();
        inner.phase = CarouselPhase::Idle;
        inner
            .surface
            .set_cursor(CursorIcon::Grab)
            .map_err(CarouselError::Surface)?;
        log::trace!("drag cancelled, no momentum");
        Ok(())
    }

    /// Current scroll offset of the stack.
    pub fn offset(&self) -> f32 {
        self.inner.borrow().offset
    }

    pub fn phase(&self) -> CarouselPhase {
        self.inner.borrow().phase
    }

    pub fn geometry(&self) -> DeckGeometry {
        self.inner.borrow().geometry
    }

    /// Whether the redraw loop is currently running.
    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }
}
