//! Deck geometry and the depth falloff applied to each card.
//!
//! A card's visual layer is a pure function of its index, the stack's
//! scroll offset, and the viewport height. Nothing here touches state;
//! the engine recomputes every card from scratch each frame.

use rolodeck_ui_graphics::CardLayer;

/// Default card height in logical pixels.
pub const DEFAULT_CARD_HEIGHT: f32 = 320.0;

/// Default vertical gap between adjacent cards.
pub const DEFAULT_CARD_SPACING: f32 = 20.0;

/// Default number of cards in the deck.
pub const DEFAULT_CARD_COUNT: usize = 8;

/// How much scale a card sheds per viewport-third of distance from the
/// midline, and the floor it lands on. 1.0 - 0.6 keeps the two continuous
/// at exactly one viewport-third.
const SCALE_FALLOFF: f32 = 0.6;
const MIN_SCALE: f32 = 0.4;

const ALPHA_FALLOFF: f32 = 0.7;
const MIN_ALPHA: f32 = 0.3;

/// Stacking base; cards lose one stacking unit per pixel of distance.
const Z_BASE: i32 = 1000;

const BLUR_BASE: f32 = 10.0;
const BLUR_FALLOFF: f32 = 5.0;
const BLUR_RANGE: f32 = 10.0;

/// Fixed layout parameters of the card stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeckGeometry {
    pub card_height: f32,
    pub spacing: f32,
    pub card_count: usize,
}

impl Default for DeckGeometry {
    fn default() -> Self {
        Self {
            card_height: DEFAULT_CARD_HEIGHT,
            spacing: DEFAULT_CARD_SPACING,
            card_count: DEFAULT_CARD_COUNT,
        }
    }
}

impl DeckGeometry {
    /// Vertical distance between the tops of adjacent cards.
    pub fn slot_extent(&self) -> f32 {
        self.card_height + self.spacing
    }

    /// Computes the visual layer for one card.
    ///
    /// The card sits at `index * slot_extent - offset`. Its distance from
    /// the viewport's vertical midline, normalized by a third of the
    /// viewport height, drives the falloff: scale shrinks to 0.4, alpha
    /// fades to 0.3, blur grows from 10 to at most 20 px, and stacking
    /// order drops one unit per pixel of raw distance.
    pub fn layer_for(&self, index: usize, offset: f32, viewport_height: f32) -> CardLayer {
        let translation_y = index as f32 * self.slot_extent() - offset;
        let distance = translation_y - viewport_height / 2.0;
        let normalized = distance.abs() / (viewport_height / 3.0);

        let scale = if normalized <= 1.0 {
            1.0 - normalized * SCALE_FALLOFF
        } else {
            MIN_SCALE
        };
        let alpha = (1.0 - normalized * ALPHA_FALLOFF).max(MIN_ALPHA);
        let z_index = Z_BASE - distance.abs().round() as i32;
        let blur_radius = BLUR_BASE + (normalized * BLUR_FALLOFF).min(BLUR_RANGE);

        CardLayer {
            translation_y,
            scale,
            alpha,
            z_index,
            blur_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(actual: f32, expected: f32, what: &str) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "{what}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn first_card_at_rest_in_a_900px_viewport() {
        let deck = DeckGeometry::default();
        let layer = deck.layer_for(0, 0.0, 900.0);

        // Sits at 0, a full 450px above the midline: normalized distance
        // 450 / 300 = 1.5, past every falloff knee.
        assert_eq!(layer.translation_y, 0.0);
        assert_eq!(layer.scale, 0.4);
        assert_near(layer.alpha, 0.3, "alpha");
        assert_eq!(layer.z_index, 550);
        assert_near(layer.blur_radius, 17.5, "blur");
    }

    #[test]
    fn a_card_a_full_viewport_from_the_midline() {
        let deck = DeckGeometry::default();
        // Push the first card 450px above its rest position: it now sits
        // 900px from the midline, normalized distance 3.
        let layer = deck.layer_for(0, 450.0, 900.0);

        assert_eq!(layer.translation_y, -450.0);
        assert_eq!(layer.scale, 0.4);
        assert_near(layer.alpha, 0.3, "alpha");
        assert_eq!(layer.z_index, 100);
        assert_eq!(layer.blur_radius, 20.0, "blur saturates at 20");
    }

    #[test]
    fn centered_card_is_untouched() {
        let deck = DeckGeometry::default();
        let layer = deck.layer_for(0, -450.0, 900.0);

        assert_eq!(layer.translation_y, 450.0);
        assert_eq!(layer.scale, 1.0);
        assert_eq!(layer.alpha, 1.0);
        assert_eq!(layer.z_index, 1000);
        assert_eq!(layer.blur_radius, 10.0);
    }

    #[test]
    fn halfway_to_the_falloff_knee() {
        let deck = DeckGeometry::default();
        // 150px below the midline of a 900px viewport: normalized 0.5.
        let layer = deck.layer_for(0, -600.0, 900.0);

        assert_near(layer.scale, 0.7, "scale");
        assert_near(layer.alpha, 0.65, "alpha");
        assert_near(layer.blur_radius, 12.5, "blur");
    }

    #[test]
    fn stacking_order_rounds_pixel_distance() {
        let deck = DeckGeometry::default();
        assert_eq!(deck.layer_for(0, -460.4, 900.0).z_index, 990);
        assert_eq!(deck.layer_for(0, -460.6, 900.0).z_index, 989);
        assert_eq!(deck.layer_for(0, -439.4, 900.0).z_index, 989);
    }

    #[test]
    fn adjacent_cards_sit_one_slot_apart() {
        let deck = DeckGeometry::default();
        assert_eq!(deck.slot_extent(), 340.0);
        let a = deck.layer_for(3, 25.0, 900.0);
        let b = deck.layer_for(4, 25.0, 900.0);
        assert_near(b.translation_y - a.translation_y, 340.0, "slot spacing");
    }

    #[test]
    fn outputs_stay_inside_their_ranges_everywhere() {
        let deck = DeckGeometry::default();
        let mut offset = -2_000.0f32;
        while offset < 4_000.0 {
            for index in 0..deck.card_count {
                for viewport in [480.0, 900.0, 1440.0] {
                    let layer = deck.layer_for(index, offset, viewport);
                    assert!((0.4..=1.0).contains(&layer.scale), "scale {}", layer.scale);
                    assert!((0.3..=1.0).contains(&layer.alpha), "alpha {}", layer.alpha);
                    assert!(
                        (10.0..=20.0).contains(&layer.blur_radius),
                        "blur {}",
                        layer.blur_radius
                    );
                    assert!(layer.z_index <= Z_BASE);
                }
            }
            offset += 37.0;
        }
    }

    #[test]
    fn layer_for_is_pure() {
        let deck = DeckGeometry::default();
        let first = deck.layer_for(5, 123.4, 768.0);
        let second = deck.layer_for(5, 123.4, 768.0);
        assert_eq!(first, second);
    }
}
