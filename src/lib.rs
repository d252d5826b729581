//! Library exports for the gemsketch subsystems.
//!
//! Exposes the drawing-surface core alongside the gallery and feedback
//! collaborators so that embedding hosts (and the `gemsketch` binary) share
//! the same configuration, validation, and rendering code.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod feedback;
pub mod gallery;
pub mod input;
pub mod util;

pub use config::Config;
