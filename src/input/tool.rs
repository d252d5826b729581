//! Drawing tool selection and tool state.

use crate::draw::{Color, StampKind, color};

/// Drawing tool selection.
///
/// The active tool determines what a press-drag-release gesture produces:
/// freehand paint, a rubber-banded shape, or a stamp placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Freehand drawing - follows the pointer path (default)
    Brush,
    /// Freehand erasure - paints with the canvas background color
    Eraser,
    /// Straight line - between start and end points
    Line,
    /// Rectangle - from corner to corner
    Rect,
    /// Circle/ellipse - inscribed in the drag rectangle
    Circle,
    /// Faceted gem - inscribed in the drag rectangle
    Diamond,
    /// Stamp glyph placed at the release point
    Stamp(StampKind),
}

impl Tool {
    /// Freehand tools paint immediately on every move; everything else
    /// rubber-bands over the pre-gesture snapshot.
    pub fn is_freehand(&self) -> bool {
        matches!(self, Tool::Brush | Tool::Eraser)
    }
}

/// Current tool parameters, passed explicitly into every drawing-surface call.
///
/// Mutated only by explicit user tool selection; the stroke renderer reads it
/// on every draw operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    /// Active tool
    pub tool: Tool,
    /// Stroke color
    pub color: Color,
    /// Stroke/eraser width in buffer units
    pub thickness: f64,
    /// Whether closed shapes are filled solid instead of outlined
    pub fill: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            color: color::BLACK,
            thickness: 5.0,
            fill: false,
        }
    }
}
