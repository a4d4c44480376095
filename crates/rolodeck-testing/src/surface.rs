use rolodeck_ui::{CursorIcon, RenderSurface};
use rolodeck_ui_graphics::CardLayer;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Error the recording surface returns when a test asks it to reject a
/// call, or when the carousel addresses a card it never created.
#[derive(Debug, PartialEq, Eq)]
pub struct SurfaceRejected;

#[derive(Default)]
struct RecordingState {
    card_count: Cell<usize>,
    viewport_height: Cell<f32>,
    applied: RefCell<Vec<(usize, CardLayer)>>,
    cursor_log: RefCell<Vec<CursorIcon>>,
    reject_next_apply: Cell<bool>,
}

/// Render surface that records every call instead of drawing.
///
/// Clones share state: hand one to the carousel, keep another to assert
/// on what was applied. The viewport height can be changed mid-test to
/// model a window resize.
#[derive(Clone)]
pub struct RecordingSurface {
    state: Rc<RecordingState>,
}

impl RecordingSurface {
    pub fn new(viewport_height: f32) -> Self {
        let state = RecordingState::default();
        state.viewport_height.set(viewport_height);
        Self {
            state: Rc::new(state),
        }
    }

    pub fn card_count(&self) -> usize {
        self.state.card_count.get()
    }

    pub fn set_viewport_height(&self, height: f32) {
        self.state.viewport_height.set(height);
    }

    /// Number of `apply_layer` calls recorded so far.
    pub fn applied_count(&self) -> usize {
        self.state.applied.borrow().len()
    }

    /// The most recently applied layer for `index`, if any.
    pub fn last_layer_for(&self, index: usize) -> Option<CardLayer> {
        self.state
            .applied
            .borrow()
            .iter()
            .rev()
            .find(|(i, _)| *i == index)
            .map(|(_, layer)| *layer)
    }

    pub fn clear_applied(&self) {
        self.state.applied.borrow_mut().clear();
    }

    pub fn cursor_log(&self) -> Vec<CursorIcon> {
        self.state.cursor_log.borrow().clone()
    }

    /// Makes the next `apply_layer` call fail with [`SurfaceRejected`].
    pub fn reject_next_apply(&self) {
        self.state.reject_next_apply.set(true);
    }
}

impl RenderSurface for RecordingSurface {
    type Error = SurfaceRejected;

    fn create_cards(&mut self, count: usize) -> Result<(), Self::Error> {
        self.state.card_count.set(count);
        Ok(())
    }

    fn apply_layer(&mut self, index: usize, layer: &CardLayer) -> Result<(), Self::Error> {
        if self.state.reject_next_apply.take() {
            return Err(SurfaceRejected);
        }
        if index >= self.state.card_count.get() {
            return Err(SurfaceRejected);
        }
        self.state.applied.borrow_mut().push((index, *layer));
        Ok(())
    }

    fn viewport_height(&self) -> f32 {
        self.state.viewport_height.get()
    }

    fn set_cursor(&mut self, cursor: CursorIcon) -> Result<(), Self::Error> {
        self.state.cursor_log.borrow_mut().push(cursor);
        Ok(())
    }
}
