//! Configuration file support for gemsketch.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/gemsketch/config.toml`. Settings
//! include canvas sizing, drawing defaults, the gallery backend, and the AI
//! feedback client.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CanvasConfig, DrawingConfig, FeedbackConfig, GalleryConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML
/// file. All fields have sensible defaults and will use those if not
/// specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 2000
/// height = 1200
/// history_cap = 20
///
/// [drawing]
/// default_color = "black"
/// default_thickness = 5.0
///
/// [gallery]
/// port = 3001
/// max_entries = 50
///
/// [feedback]
/// model = "gemini-2.5-flash"
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Canvas sizing and gesture behavior
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Drawing tool defaults (color, thickness, fill)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Gallery backend settings
    #[serde(default)]
    pub gallery: GalleryConfig,

    /// AI feedback client settings
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is
    /// logged, so a hand-edited config never aborts startup.
    fn validate_and_clamp(&mut self) {
        // Canvas resolution: 16 - 8192 per axis
        if !(16..=8192).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 16-8192 range",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(16, 8192);
        }
        if !(16..=8192).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 16-8192 range",
                self.canvas.height
            );
            self.canvas.height = self.canvas.height.clamp(16, 8192);
        }

        // History cap: 1 - 200
        if !(1..=200).contains(&self.canvas.history_cap) {
            log::warn!(
                "Invalid history_cap {}, clamping to 1-200 range",
                self.canvas.history_cap
            );
            self.canvas.history_cap = self.canvas.history_cap.clamp(1, 200);
        }

        // Click threshold: 0.0 - 100.0
        if !(0.0..=100.0).contains(&self.canvas.click_threshold) {
            log::warn!(
                "Invalid click_threshold {:.1}, clamping to 0.0-100.0 range",
                self.canvas.click_threshold
            );
            self.canvas.click_threshold = self.canvas.click_threshold.clamp(0.0, 100.0);
        }

        // Default shape size: 10.0 - 1000.0
        if !(10.0..=1000.0).contains(&self.canvas.default_shape_size) {
            log::warn!(
                "Invalid default_shape_size {:.1}, clamping to 10.0-1000.0 range",
                self.canvas.default_shape_size
            );
            self.canvas.default_shape_size = self.canvas.default_shape_size.clamp(10.0, 1000.0);
        }

        // Thickness: 1.0 - 20.0
        if !(1.0..=20.0).contains(&self.drawing.default_thickness) {
            log::warn!(
                "Invalid default_thickness {:.1}, clamping to 1.0-20.0 range",
                self.drawing.default_thickness
            );
            self.drawing.default_thickness = self.drawing.default_thickness.clamp(1.0, 20.0);
        }

        // Gallery entry cap: 1 - 1000
        if !(1..=1000).contains(&self.gallery.max_entries) {
            log::warn!(
                "Invalid max_entries {}, clamping to 1-1000 range",
                self.gallery.max_entries
            );
            self.gallery.max_entries = self.gallery.max_entries.clamp(1, 1000);
        }

        // Minimum payload length: 1 - 1024
        if !(1..=1024).contains(&self.gallery.min_payload_len) {
            log::warn!(
                "Invalid min_payload_len {}, clamping to 1-1024 range",
                self.gallery.min_payload_len
            );
            self.gallery.min_payload_len = self.gallery.min_payload_len.clamp(1, 1024);
        }

        if self.gallery.port == 0 {
            log::warn!("Invalid gallery port 0, falling back to 3001");
            self.gallery.port = 3001;
        }

        // Feedback endpoint must be an absolute URL
        if url::Url::parse(&self.feedback.endpoint).is_err() {
            log::warn!(
                "Invalid feedback endpoint '{}', falling back to default",
                self.feedback.endpoint
            );
            self.feedback.endpoint = FeedbackConfig::default().endpoint;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/gemsketch/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g.,
    /// HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("gemsketch");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if
    /// no file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML
    /// syntax.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to the default location.
    ///
    /// Creates the parent directory if it doesn't exist. Kept for runtime
    /// config editing by embedding hosts.
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let config = Config::default();
        assert_eq!(config.canvas.history_cap, 20);
        assert_eq!(config.canvas.click_threshold, 10.0);
        assert_eq!(config.canvas.default_shape_size, 150.0);
        assert_eq!(config.gallery.max_entries, 50);
        assert_eq!(config.gallery.min_payload_len, 20);
        assert_eq!(config.gallery.port, 3001);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [canvas]
            width = 800

            [gallery]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.canvas.height, 1200);
        assert_eq!(config.gallery.port, 8080);
        assert_eq!(config.gallery.max_entries, 50);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config: Config = toml::from_str(
            r#"
            [canvas]
            width = 4
            history_cap = 5000

            [drawing]
            default_thickness = 99.0

            [feedback]
            endpoint = "not a url"
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.canvas.width, 16);
        assert_eq!(config.canvas.history_cap, 200);
        assert_eq!(config.drawing.default_thickness, 20.0);
        assert_eq!(config.feedback.endpoint, FeedbackConfig::default().endpoint);
    }

    #[test]
    fn load_from_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [drawing]
            default_color = [255, 0, 0]
            default_fill = true
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        let tools = config.drawing.initial_tool_state();
        assert!(tools.fill);
        assert_eq!(tools.color, crate::draw::color::RED);
    }
}
