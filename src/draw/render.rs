//! Cairo-based rendering functions for strokes and shapes.

use super::color::Color;
use super::shape::{Shape, StampKind, gem_facets, gem_outline};
use crate::util::Point;

/// Paints one freehand segment from `from` to `to`.
///
/// Round caps and joins keep consecutive segments visually continuous; the
/// caller restarts the path at `to` after each call so joins stay round no
/// matter how many move events arrive.
pub fn render_segment(ctx: &cairo::Context, from: Point, to: Point, color: Color, width: f64) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    let _ = ctx.stroke();
}

/// Renders a single shape to a Cairo context.
///
/// Dispatches on the shape variant. `fill` selects solid rendering for closed
/// shapes; lines ignore it and stamps are always solid glyphs.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape, color: Color, width: f64, fill: bool) {
    match *shape {
        Shape::Line { x1, y1, x2, y2 } => render_line(ctx, x1, y1, x2, y2, color, width),
        Shape::Rect { x, y, w, h } => render_rect(ctx, x, y, w, h, color, width, fill),
        Shape::Circle { cx, cy, rx, ry } => render_circle(ctx, cx, cy, rx, ry, color, width, fill),
        Shape::Diamond { x, y, w, h } => render_diamond(ctx, x, y, w, h, color, width, fill),
        Shape::Stamp { kind, cx, cy, size } => render_stamp(ctx, kind, cx, cy, size, color),
    }
}

/// Render a straight line (the fill flag never applies).
fn render_line(ctx: &cairo::Context, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, width: f64) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);

    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    let _ = ctx.stroke();
}

#[allow(clippy::too_many_arguments)]
fn render_rect(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    color: Color,
    width: f64,
    fill: bool,
) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
    ctx.set_line_join(cairo::LineJoin::Miter);

    ctx.rectangle(x, y, w, h);
    if fill {
        let _ = ctx.fill();
    } else {
        let _ = ctx.stroke();
    }
}

/// Render an ellipse using Cairo's arc with scaling.
///
/// The path is built under a scaled transform but stroked outside it so the
/// stroke width stays uniform.
#[allow(clippy::too_many_arguments)]
fn render_circle(
    ctx: &cairo::Context,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    color: Color,
    width: f64,
    fill: bool,
) {
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);

    ctx.save().ok();
    ctx.translate(cx, cy);
    ctx.scale(rx, ry);
    ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * std::f64::consts::PI);
    ctx.restore().ok();

    if fill {
        let _ = ctx.fill();
    } else {
        let _ = ctx.stroke();
    }
}

/// Render the gem: five-apex outline, with the three facet lines only when
/// unfilled (a solid gem reads better without interior lines).
#[allow(clippy::too_many_arguments)]
fn render_diamond(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    color: Color,
    width: f64,
    fill: bool,
) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
    ctx.set_line_join(cairo::LineJoin::Round);

    let apexes = gem_outline(x, y, w, h);
    ctx.move_to(apexes[0].x, apexes[0].y);
    for apex in &apexes[1..] {
        ctx.line_to(apex.x, apex.y);
    }
    ctx.close_path();

    if fill {
        let _ = ctx.fill();
        return;
    }

    let _ = ctx.stroke();

    ctx.set_line_cap(cairo::LineCap::Round);
    for (from, to) in gem_facets(x, y, w, h) {
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        let _ = ctx.stroke();
    }
}

/// Render a stamp glyph, solid in the current color.
fn render_stamp(ctx: &cairo::Context, kind: StampKind, cx: f64, cy: f64, size: f64, color: Color) {
    if size <= 0.0 {
        return;
    }

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);

    match kind {
        StampKind::Star => star_path(ctx, cx, cy, size / 2.0),
        StampKind::Heart => heart_path(ctx, cx, cy, size / 2.0),
        StampKind::Bolt => bolt_path(ctx, cx, cy, size / 2.0),
    }

    ctx.close_path();
    let _ = ctx.fill();
}

/// Five-pointed star: alternating outer/inner vertices starting at the top.
fn star_path(ctx: &cairo::Context, cx: f64, cy: f64, radius: f64) {
    let inner = radius * 0.4;
    for i in 0..10 {
        let r = if i % 2 == 0 { radius } else { inner };
        let angle = -std::f64::consts::FRAC_PI_2 + f64::from(i) * std::f64::consts::PI / 5.0;
        let px = cx + r * angle.cos();
        let py = cy + r * angle.sin();
        if i == 0 {
            ctx.move_to(px, py);
        } else {
            ctx.line_to(px, py);
        }
    }
}

/// Two mirrored cubic lobes meeting at the bottom tip.
fn heart_path(ctx: &cairo::Context, cx: f64, cy: f64, half: f64) {
    ctx.move_to(cx, cy + half * 0.7);
    ctx.curve_to(
        cx - half * 1.1,
        cy + half * 0.1,
        cx - half * 0.9,
        cy - half * 0.8,
        cx,
        cy - half * 0.3,
    );
    ctx.curve_to(
        cx + half * 0.9,
        cy - half * 0.8,
        cx + half * 1.1,
        cy + half * 0.1,
        cx,
        cy + half * 0.7,
    );
}

/// Hand-authored zigzag polygon, fractions of the half-size box.
fn bolt_path(ctx: &cairo::Context, cx: f64, cy: f64, half: f64) {
    let points: [(f64, f64); 7] = [
        (-0.2, -1.0),
        (0.45, -1.0),
        (0.05, -0.15),
        (0.5, -0.15),
        (-0.35, 1.0),
        (-0.05, 0.2),
        (-0.5, 0.2),
    ];
    for (i, (fx, fy)) in points.iter().enumerate() {
        let px = cx + fx * half;
        let py = cy + fy * half;
        if i == 0 {
            ctx.move_to(px, py);
        } else {
            ctx.line_to(px, py);
        }
    }
}
