//! Pure math/data types shared across the Rolodeck crates.
//!
//! No runtime, no host dependencies. Everything here is `Copy`-friendly
//! value types consumed by the layout code and the host surface.

mod geometry;

pub use geometry::{CardLayer, Point, Size};
