//! The contract between the carousel engine and whatever owns real
//! pixels and input.

use rolodeck_ui_graphics::CardLayer;

/// Pointer cursor the surface should show over the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorIcon {
    /// An open hand: the deck is grabbable.
    Grab,
    /// A closed hand: a drag is in progress.
    Grabbing,
}

/// Abstraction implemented by concrete hosts.
///
/// The engine creates the deck's cards once through
/// [`create_cards`](RenderSurface::create_cards) and from then on only
/// pushes freshly computed [`CardLayer`]s at them. `viewport_height` is
/// read again on every layout pass, so a host that resizes just reports
/// the new value.
pub trait RenderSurface {
    type Error;

    /// Creates the deck's cards, indexed `0..count`. Called exactly once,
    /// before the first layout pass.
    fn create_cards(&mut self, count: usize) -> Result<(), Self::Error>;

    /// Applies a visual layer to the card at `index`.
    fn apply_layer(&mut self, index: usize, layer: &CardLayer) -> Result<(), Self::Error>;

    /// Current viewport height in logical pixels.
    fn viewport_height(&self) -> f32;

    /// Updates the pointer cursor shown over the deck.
    fn set_cursor(&mut self, cursor: CursorIcon) -> Result<(), Self::Error>;
}
