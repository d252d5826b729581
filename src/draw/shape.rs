//! Shape definitions for the drawing tools.

use crate::util::{Point, normalized_rect};

/// Fraction of the box width the gem's top edge is inset from each side.
pub const GEM_TOP_INSET: f64 = 0.25;

/// Fraction of the box height at which the gem is widest (the girdle).
pub const GEM_GIRDLE_HEIGHT: f64 = 0.35;

/// Stamp glyphs available to the stamp tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampKind {
    /// Five-pointed star
    Star,
    /// Classic doodle heart
    Heart,
    /// Lightning bolt
    Bolt,
}

/// Represents a drawable shape on the canvas.
///
/// Each variant carries only its geometry; color, stroke width, and the fill
/// flag come from the tool state at render time, so the same shape value can
/// be previewed repeatedly while the user adjusts tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Straight line between two points
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    /// Axis-aligned rectangle (normalized: w and h are non-negative)
    Rect { x: f64, y: f64, w: f64, h: f64 },
    /// Ellipse inscribed in the drag rectangle
    Circle { cx: f64, cy: f64, rx: f64, ry: f64 },
    /// Five-apex gem outline inscribed in the bounding box
    Diamond { x: f64, y: f64, w: f64, h: f64 },
    /// Procedural glyph centered on a point
    Stamp { kind: StampKind, cx: f64, cy: f64, size: f64 },
}

impl Shape {
    pub fn line(a: Point, b: Point) -> Self {
        Shape::Line {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
        }
    }

    /// Rectangle from two drag corners, normalized for any drag direction.
    pub fn rect_from_corners(a: Point, b: Point) -> Self {
        let (x, y, w, h) = normalized_rect(a, b);
        Shape::Rect { x, y, w, h }
    }

    /// Ellipse inscribed in the drag rectangle.
    pub fn circle_from_corners(a: Point, b: Point) -> Self {
        let (x, y, w, h) = normalized_rect(a, b);
        Shape::Circle {
            cx: x + w / 2.0,
            cy: y + h / 2.0,
            rx: w / 2.0,
            ry: h / 2.0,
        }
    }

    /// Gem bounding box from two drag corners.
    pub fn diamond_from_corners(a: Point, b: Point) -> Self {
        let (x, y, w, h) = normalized_rect(a, b);
        Shape::Diamond { x, y, w, h }
    }

    pub fn stamp(kind: StampKind, center: Point, size: f64) -> Self {
        Shape::Stamp {
            kind,
            cx: center.x,
            cy: center.y,
            size,
        }
    }
}

/// The five apexes of the gem outline for a bounding box, clockwise from the
/// top-left apex: top edge inset [`GEM_TOP_INSET`] from each side, widest
/// points at [`GEM_GIRDLE_HEIGHT`], bottom apex centered.
pub fn gem_outline(x: f64, y: f64, w: f64, h: f64) -> [Point; 5] {
    let girdle_y = y + h * GEM_GIRDLE_HEIGHT;
    [
        Point::new(x + w * GEM_TOP_INSET, y),
        Point::new(x + w * (1.0 - GEM_TOP_INSET), y),
        Point::new(x + w, girdle_y),
        Point::new(x + w / 2.0, y + h),
        Point::new(x, girdle_y),
    ]
}

/// The three interior facet lines drawn on an unfilled gem: the girdle across
/// the widest points plus one line from each top apex down to the bottom apex.
pub fn gem_facets(x: f64, y: f64, w: f64, h: f64) -> [(Point, Point); 3] {
    let girdle_y = y + h * GEM_GIRDLE_HEIGHT;
    let culet = Point::new(x + w / 2.0, y + h);
    [
        (Point::new(x, girdle_y), Point::new(x + w, girdle_y)),
        (Point::new(x + w * GEM_TOP_INSET, y), culet),
        (Point::new(x + w * (1.0 - GEM_TOP_INSET), y), culet),
    ]
}
