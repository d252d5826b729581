//! Geometry helpers shared by the drawing surface, renderer, and tests.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// A point in buffer coordinates.
///
/// Buffer coordinates are continuous: the coordinate mapper produces fractional
/// positions when the displayed element is scaled, and Cairo consumes them as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Normalizes two drag corners into an `(x, y, w, h)` rectangle with
/// non-negative extents, so shapes behave the same when dragged in any
/// direction.
pub fn normalized_rect(a: Point, b: Point) -> (f64, f64, f64, f64) {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    let w = (a.x - b.x).abs();
    let h = (a.y - b.y).abs();
    (x, y, w, h)
}

/// Opposite corners of a square of side `size` centered on `center`.
///
/// Used for the click-without-drag shape commit: a tap places a default-sized
/// shape as though the user had dragged across this box.
pub fn centered_square(center: Point, size: f64) -> (Point, Point) {
    let half = size / 2.0;
    (
        Point::new(center.x - half, center.y - half),
        Point::new(center.x + half, center.y + half),
    )
}

/// Encodes PNG bytes as a `data:image/png;base64,…` URL, the submission
/// format the gallery frontend historically used.
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn normalized_rect_handles_reverse_drag() {
        let (x, y, w, h) = normalized_rect(Point::new(50.0, 80.0), Point::new(10.0, 20.0));
        assert_eq!((x, y, w, h), (10.0, 20.0, 40.0, 60.0));
    }

    #[test]
    fn centered_square_spans_the_size() {
        let (a, b) = centered_square(Point::new(100.0, 100.0), 150.0);
        assert_eq!(a, Point::new(25.0, 25.0));
        assert_eq!(b, Point::new(175.0, 175.0));
    }

    #[test]
    fn png_data_url_has_prefix() {
        let url = png_data_url(&[1, 2, 3]);
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.len() > "data:image/png;base64,".len());
    }
}
