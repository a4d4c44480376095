//! Start-of-drag bookkeeping.

/// Snapshot taken on pointer-down that maps later pointer positions to
/// scroll offsets: dragging the pointer up moves the offset forward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragAnchor {
    start_y: f32,
    offset_at_start: f32,
}

impl DragAnchor {
    pub fn new(start_y: f32, offset_at_start: f32) -> Self {
        Self {
            start_y,
            offset_at_start,
        }
    }

    pub fn start_y(&self) -> f32 {
        self.start_y
    }

    pub fn offset_at_start(&self) -> f32 {
        self.offset_at_start
    }

    /// Offset the stack should have while the pointer sits at `y`.
    pub fn offset_for(&self, y: f32) -> f32 {
        self.offset_at_start + (self.start_y - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_unchanged_at_the_anchor() {
        let anchor = DragAnchor::new(500.0, 120.0);
        assert_eq!(anchor.offset_for(500.0), 120.0);
    }

    #[test]
    fn dragging_up_advances_the_offset() {
        let anchor = DragAnchor::new(500.0, 120.0);
        assert_eq!(anchor.offset_for(460.0), 160.0);
    }

    #[test]
    fn dragging_down_rewinds_the_offset() {
        let anchor = DragAnchor::new(500.0, 120.0);
        assert_eq!(anchor.offset_for(620.0), 0.0);
        assert_eq!(anchor.offset_for(700.0), -80.0, "offset is not clamped");
    }
}
