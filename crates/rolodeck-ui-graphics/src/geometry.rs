//! Geometric primitives: Point, Size, and the per-card visual layer.

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };
}

/// Visual transform applied to a single card by the host surface.
///
/// `translation_y` positions the card's top edge inside the viewport,
/// `z_index` orders overlapping cards (higher draws on top), and
/// `blur_radius` is in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardLayer {
    pub translation_y: f32,
    pub scale: f32,
    pub alpha: f32,
    pub z_index: i32,
    pub blur_radius: f32,
}

impl Default for CardLayer {
    fn default() -> Self {
        Self {
            translation_y: 0.0,
            scale: 1.0,
            alpha: 1.0,
            z_index: 0,
            blur_radius: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layer_is_neutral() {
        let layer = CardLayer::default();
        assert_eq!(layer.translation_y, 0.0);
        assert_eq!(layer.scale, 1.0);
        assert_eq!(layer.alpha, 1.0);
        assert_eq!(layer.z_index, 0);
        assert_eq!(layer.blur_radius, 0.0);
    }

    #[test]
    fn point_and_size_zero_constants() {
        assert_eq!(Point::ZERO, Point::new(0.0, 0.0));
        assert_eq!(Size::ZERO, Size::new(0.0, 0.0));
    }
}
