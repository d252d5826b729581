//! Pointer event shapes delivered by the hosting view.

/// A raw pointer position in screen (display) coordinates.
///
/// Mouse events carry a single position; touch events carry every active
/// contact point. Both shapes feed the coordinate mapper the same way.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// Mouse or single-pointer event
    Mouse { x: f64, y: f64 },
    /// Multi-touch event with all active contact points
    Touch { points: Vec<(f64, f64)> },
}

impl PointerInput {
    /// The position that drives drawing: the mouse position, or the first
    /// touch point when several fingers are down. An empty touch list has no
    /// drawable position.
    pub fn primary(&self) -> Option<(f64, f64)> {
        match self {
            PointerInput::Mouse { x, y } => Some((*x, *y)),
            PointerInput::Touch { points } => points.first().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_primary_is_its_position() {
        let input = PointerInput::Mouse { x: 12.5, y: 40.0 };
        assert_eq!(input.primary(), Some((12.5, 40.0)));
    }

    #[test]
    fn touch_primary_is_first_point() {
        let input = PointerInput::Touch {
            points: vec![(5.0, 6.0), (100.0, 200.0)],
        };
        assert_eq!(input.primary(), Some((5.0, 6.0)));
    }

    #[test]
    fn empty_touch_has_no_primary() {
        let input = PointerInput::Touch { points: vec![] };
        assert_eq!(input.primary(), None);
    }
}
