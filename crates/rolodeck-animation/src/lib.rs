//! Inertial scroll physics for the Rolodeck carousel.
//!
//! Pure math only; the ticker-driven animation driver lives in
//! `rolodeck-ui` next to the widget it animates.

mod decay;

pub use decay::MomentumDecay;
