//! Pointer input handling: event shapes, coordinate mapping, tool state.

pub mod events;
pub mod mapper;
pub mod tool;

pub use events::PointerInput;
pub use mapper::DisplayGeometry;
pub use tool::{Tool, ToolState};
