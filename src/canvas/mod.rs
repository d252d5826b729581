//! The drawing surface and its snapshot/undo model.
//!
//! - [`PixelBuffer`]: the fixed-size raster the user draws into
//! - [`Snapshot`]: an immutable full copy of the buffer at one instant
//! - [`HistoryStack`]: capacity-bounded undo history of snapshots
//! - [`DrawingSurface`]: gesture handling, shape preview, commit/undo/clear

pub mod buffer;
pub mod history;
pub mod surface;


pub use buffer::{PixelBuffer, Snapshot};
pub use history::{DEFAULT_HISTORY_CAP, HistoryStack};
pub use surface::{DrawingSurface, SurfaceSettings};
