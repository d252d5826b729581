//! Maps screen-space pointer positions into buffer coordinates.

use super::events::PointerInput;
use crate::util::Point;

/// The displayed box of the canvas element plus the logical buffer size.
///
/// Layout may stretch the element non-uniformly, so each axis scales
/// independently by `buffer / displayed`. The mapping is linear and
/// unclamped; out-of-bounds positions pass through and drawing clips at the
/// buffer edges naturally.
#[derive(Debug, Clone, Copy)]
pub struct DisplayGeometry {
    /// Left edge of the displayed element in screen coordinates
    pub left: f64,
    /// Top edge of the displayed element in screen coordinates
    pub top: f64,
    /// Displayed width in screen pixels
    pub display_width: f64,
    /// Displayed height in screen pixels
    pub display_height: f64,
    /// Logical buffer width in buffer units
    pub buffer_width: u32,
    /// Logical buffer height in buffer units
    pub buffer_height: u32,
}

impl DisplayGeometry {
    /// Maps a pointer event to buffer coordinates, or `None` when the event
    /// carries no position (an empty touch list).
    pub fn map(&self, input: &PointerInput) -> Option<Point> {
        let (sx, sy) = input.primary()?;
        let scale_x = f64::from(self.buffer_width) / self.display_width;
        let scale_y = f64::from(self.buffer_height) / self.display_height;
        Some(Point::new(
            (sx - self.left) * scale_x,
            (sy - self.top) * scale_y,
        ))
    }
}
