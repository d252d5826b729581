//! The drawing surface: gesture handling, shape preview, and undo.

use anyhow::Result;
use log::debug;

use super::buffer::{PixelBuffer, Snapshot};
use super::history::{DEFAULT_HISTORY_CAP, HistoryStack};
use crate::draw::{Color, Shape, color, render_segment, render_shape};
use crate::input::{Tool, ToolState};
use crate::util::{Point, centered_square};

/// Mount-time parameters of a drawing surface.
///
/// The resolution is fixed for the surface's lifetime; display scaling is the
/// coordinate mapper's concern. The click threshold and default shape size
/// govern the tap-to-place behavior of the shape tools.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceSettings {
    /// Logical buffer width in buffer units
    pub width: u32,
    /// Logical buffer height in buffer units
    pub height: u32,
    /// Canvas background color (also the eraser paint color)
    pub background: Color,
    /// Maximum retained undo snapshots
    pub history_cap: usize,
    /// Gesture displacement below which a shape tool counts as a tap
    pub click_threshold: f64,
    /// Side length of the bounding box for tap-placed shapes and stamps
    pub default_shape_size: f64,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 1200,
            background: color::WHITE,
            history_cap: DEFAULT_HISTORY_CAP,
            click_threshold: 10.0,
            default_shape_size: 150.0,
        }
    }
}

/// Transient per-gesture state.
///
/// Exists only between press and release; dropped at gesture end regardless
/// of outcome. The baseline snapshot taken at press is never mutated, only
/// restored into the live buffer.
struct Gesture {
    tool: Tool,
    start: Point,
    last: Point,
    baseline: Snapshot,
}

/// Interactive canvas with snapshot-based undo.
///
/// All handlers are synchronous and run to completion; the surface is owned
/// by a single UI thread for its lifetime and needs no locking. Tool
/// parameters are passed into every call rather than stored, so the renderer
/// always sees the current selection.
pub struct DrawingSurface {
    buffer: PixelBuffer,
    history: HistoryStack,
    gesture: Option<Gesture>,
    settings: SurfaceSettings,
}

impl DrawingSurface {
    /// Mounts a surface: creates the buffer at the configured resolution and
    /// seeds the history with the blank baseline.
    pub fn new(settings: SurfaceSettings) -> Result<Self> {
        let mut buffer = PixelBuffer::new(settings.width, settings.height, settings.background)?;
        let baseline = buffer.snapshot()?;
        Ok(Self {
            buffer,
            history: HistoryStack::new(baseline, settings.history_cap),
            gesture: None,
            settings,
        })
    }

    pub fn settings(&self) -> &SurfaceSettings {
        &self.settings
    }

    /// True while a gesture is in progress. Hosts use this to suppress
    /// default scroll/zoom touch behavior for the duration.
    pub fn gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Begins a gesture with the current tool. A press while another gesture
    /// is active is ignored (secondary touch points do not restart drawing).
    pub fn pointer_pressed(&mut self, tools: &ToolState, at: Point) -> Result<()> {
        if self.gesture.is_some() {
            return Ok(());
        }
        let baseline = self.buffer.snapshot()?;
        debug!(
            "gesture start: {:?} at ({:.1}, {:.1})",
            tools.tool, at.x, at.y
        );
        self.gesture = Some(Gesture {
            tool: tools.tool,
            start: at,
            last: at,
            baseline,
        });
        Ok(())
    }

    /// Extends the active gesture to a new position.
    ///
    /// Freehand tools paint the segment from the previous point immediately
    /// and restart the path there, keeping joins round. Shape tools restore
    /// the pre-gesture baseline and redraw the whole shape, so each preview
    /// frame is rendered over a clean base instead of layering on the last.
    pub fn pointer_moved(&mut self, tools: &ToolState, at: Point) -> Result<()> {
        let Some(gesture) = self.gesture.as_mut() else {
            return Ok(());
        };

        if gesture.tool.is_freehand() {
            let from = gesture.last;
            gesture.last = at;
            let paint = match gesture.tool {
                Tool::Eraser => self.settings.background,
                _ => tools.color,
            };
            self.buffer
                .with_ctx(|ctx| render_segment(ctx, from, at, paint, tools.thickness))?;
        } else {
            gesture.last = at;
            let shape = shape_between(
                gesture.tool,
                gesture.start,
                at,
                self.settings.default_shape_size,
            );
            self.buffer.restore(&gesture.baseline)?;
            if let Some(shape) = shape {
                self.buffer.with_ctx(|ctx| {
                    render_shape(ctx, &shape, tools.color, tools.thickness, tools.fill)
                })?;
            }
        }
        Ok(())
    }

    /// Ends the active gesture and commits the result to history.
    ///
    /// Shape tools whose total displacement stayed under the click threshold
    /// commit a default-sized shape centered on the press point, so single
    /// taps place shapes instead of producing nothing. Freehand strokes were
    /// already painted by the move events.
    pub fn pointer_released(&mut self, tools: &ToolState, at: Point) -> Result<()> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(());
        };

        if !gesture.tool.is_freehand() {
            self.buffer.restore(&gesture.baseline)?;
            let tapped = gesture.start.distance(at) < self.settings.click_threshold;
            let (a, b) = if tapped {
                match gesture.tool {
                    Tool::Stamp(_) => (gesture.start, gesture.start),
                    _ => centered_square(gesture.start, self.settings.default_shape_size),
                }
            } else {
                (gesture.start, at)
            };
            if let Some(shape) = shape_between(gesture.tool, a, b, self.settings.default_shape_size)
            {
                self.buffer.with_ctx(|ctx| {
                    render_shape(ctx, &shape, tools.color, tools.thickness, tools.fill)
                })?;
            }
        }

        let snapshot = self.buffer.snapshot()?;
        self.history.commit(snapshot);
        debug!(
            "gesture committed: {:?}, history depth {}",
            gesture.tool,
            self.history.len()
        );
        Ok(())
    }

    /// Restores the previous committed state. Returns `false` when already at
    /// the baseline floor.
    pub fn undo(&mut self) -> Result<bool> {
        if let Some(snapshot) = self.history.undo() {
            self.buffer.restore(snapshot)?;
            debug!("undo: history depth {}", self.history.len());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Clears the canvas and resets history to a single blank entry.
    pub fn clear(&mut self) -> Result<()> {
        self.gesture = None;
        self.buffer.fill(self.settings.background)?;
        let baseline = self.buffer.snapshot()?;
        self.history.reset(baseline);
        debug!("canvas cleared");
        Ok(())
    }

    /// Encodes the current drawing as PNG for the save flow. What happens to
    /// the image afterward is the host's decision.
    pub fn export_png(&mut self) -> Result<Vec<u8>> {
        self.buffer.export_png()
    }

    /// Captures the current pixel contents (used by hosts and tests).
    pub fn snapshot(&mut self) -> Result<Snapshot> {
        self.buffer.snapshot()
    }

    /// Raw bytes of one pixel; see [`PixelBuffer::pixel`].
    pub fn pixel(&mut self, x: u32, y: u32) -> Result<[u8; 4]> {
        self.buffer.pixel(x, y)
    }
}

/// Shape geometry for a non-freehand tool between two gesture points.
///
/// Corner tools treat `a` and `b` as opposite drag corners; stamps are
/// centered on `b` at the default size.
fn shape_between(tool: Tool, a: Point, b: Point, default_size: f64) -> Option<Shape> {
    match tool {
        Tool::Line => Some(Shape::line(a, b)),
        Tool::Rect => Some(Shape::rect_from_corners(a, b)),
        Tool::Circle => Some(Shape::circle_from_corners(a, b)),
        Tool::Diamond => Some(Shape::diamond_from_corners(a, b)),
        Tool::Stamp(kind) => Some(Shape::stamp(kind, b, default_size)),
        Tool::Brush | Tool::Eraser => None,
    }
}
