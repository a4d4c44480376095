//! Card carousel UI: layer math for the stacked deck, the drag and
//! momentum interaction engine, and the surface trait hosts implement
//! to put pixels on screen.

mod carousel;
mod deck;
mod momentum;
mod surface;

pub use carousel::{Carousel, CarouselError, CarouselPhase};
pub use deck::{
    DeckGeometry, DEFAULT_CARD_COUNT, DEFAULT_CARD_HEIGHT, DEFAULT_CARD_SPACING,
};
pub use momentum::MomentumAnimation;
pub use surface::{CursorIcon, RenderSurface};

#[cfg(feature = "test-helpers")]
pub use momentum::last_momentum_seed;
