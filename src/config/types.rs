//! Configuration type definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::enums::ColorSpec;
use crate::canvas::SurfaceSettings;
use crate::input::{Tool, ToolState};

/// Canvas sizing and behavior settings.
///
/// The resolution is the logical pixel-buffer size, fixed at mount; how large
/// the canvas is displayed is the host's concern.
#[derive(Debug, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Logical buffer width in buffer units (valid range: 16 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Logical buffer height in buffer units (valid range: 16 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Canvas background color; also what the eraser paints with
    #[serde(default = "default_background")]
    pub background: ColorSpec,

    /// Maximum retained undo snapshots (valid range: 1 - 200)
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    /// Gesture displacement in buffer units below which a shape tool counts
    /// as a tap (valid range: 0 - 100)
    #[serde(default = "default_click_threshold")]
    pub click_threshold: f64,

    /// Side length of the box used for tap-placed shapes (valid range: 10 - 1000)
    #[serde(default = "default_shape_size")]
    pub default_shape_size: f64,
}

impl CanvasConfig {
    /// Mount-time settings for a [`crate::canvas::DrawingSurface`].
    pub fn surface_settings(&self) -> SurfaceSettings {
        SurfaceSettings {
            width: self.width,
            height: self.height,
            background: self.background.to_color(),
            history_cap: self.history_cap,
            click_threshold: self.click_threshold,
            default_shape_size: self.default_shape_size,
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background: default_background(),
            history_cap: default_history_cap(),
            click_threshold: default_click_threshold(),
            default_shape_size: default_shape_size(),
        }
    }
}

/// Drawing tool defaults applied when the canvas first opens.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Default stroke color - a named color or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke/eraser width in buffer units (valid range: 1.0 - 20.0)
    #[serde(default = "default_thickness")]
    pub default_thickness: f64,

    /// Whether closed shapes start out filled instead of outlined
    #[serde(default)]
    pub default_fill: bool,
}

impl DrawingConfig {
    /// The tool state a fresh canvas session starts with.
    pub fn initial_tool_state(&self) -> ToolState {
        ToolState {
            tool: Tool::Brush,
            color: self.default_color.to_color(),
            thickness: self.default_thickness,
            fill: self.default_fill,
        }
    }
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_thickness: default_thickness(),
            default_fill: false,
        }
    }
}

/// Gallery backend settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Address the API server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port the API server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the drawings store; defaults to the platform data dir
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Maximum retained submissions; the oldest is evicted past this
    /// (valid range: 1 - 1000)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Minimum accepted `imageData` length; shorter payloads are rejected
    #[serde(default = "default_min_payload_len")]
    pub min_payload_len: usize,
}

impl GalleryConfig {
    /// The store directory, falling back to `<platform data dir>/gemsketch`.
    pub fn resolved_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("gemsketch"),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            data_dir: None,
            max_entries: default_max_entries(),
            min_payload_len: default_min_payload_len(),
        }
    }
}

/// AI feedback client settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Base URL of the generative AI API
    #[serde(default = "default_feedback_endpoint")]
    pub endpoint: String,

    /// Model invoked for critiques
    #[serde(default = "default_feedback_model")]
    pub model: String,

    /// Environment variable the API key is read from
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            endpoint: default_feedback_endpoint(),
            model: default_feedback_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_canvas_width() -> u32 {
    2000
}

fn default_canvas_height() -> u32 {
    1200
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_history_cap() -> usize {
    20
}

fn default_click_threshold() -> f64 {
    10.0
}

fn default_shape_size() -> f64 {
    150.0
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_thickness() -> f64 {
    5.0
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_max_entries() -> usize {
    50
}

fn default_min_payload_len() -> usize {
    20
}

fn default_feedback_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_feedback_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}
