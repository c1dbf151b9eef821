//! Configuration file support.
//!
//! Settings are read from `~/.config/vkeyboard/config.toml`. Every field has a
//! default, so a missing file (or a missing section) is not an error.

pub mod types;

pub use types::{AnchorConfig, FeedbackConfig, KeyboardConfig, LayoutConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration.
///
/// # Example TOML
/// ```toml
/// [keyboard]
/// hide_on_start = false
/// platform = "mobile"
/// backspace_repeat_ms = 100
///
/// [anchor]
/// position = [0.0, 1.2, 0.5]
/// look_at = [0.0, 1.6, 0.0]
/// world_up = [0.0, 1.0, 0.0]
///
/// [feedback]
/// enabled = true
/// sound = "/usr/share/sounds/keystroke.ogg"
/// volume = 0.6
///
/// [layout]
/// romaji_rows = ["qwertyuiop", "asdfghjkl", "zxcvbnm"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    #[serde(default)]
    pub keyboard: KeyboardConfig,

    #[serde(default)]
    pub anchor: AnchorConfig,

    #[serde(default)]
    pub feedback: FeedbackConfig,

    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Config {
    /// Validates and clamps values to acceptable ranges, logging a warning
    /// for every value that had to change.
    ///
    /// Validated ranges:
    /// - `keyboard.backspace_repeat_ms`: 10 - 1000
    /// - `feedback.volume`: 0.0 - 1.0
    /// - `layout.*_rows`: at least one non-whitespace character
    fn validate_and_clamp(&mut self) {
        if !(10..=1000).contains(&self.keyboard.backspace_repeat_ms) {
            log::warn!(
                "Invalid backspace_repeat_ms {}, clamping to 10-1000 range",
                self.keyboard.backspace_repeat_ms
            );
            self.keyboard.backspace_repeat_ms = self.keyboard.backspace_repeat_ms.clamp(10, 1000);
        }

        if !(0.0..=1.0).contains(&self.feedback.volume) {
            log::warn!(
                "Invalid feedback volume {:.2}, clamping to 0.0-1.0 range",
                self.feedback.volume
            );
            self.feedback.volume = if self.feedback.volume.is_nan() {
                1.0
            } else {
                self.feedback.volume.clamp(0.0, 1.0)
            };
        }

        let defaults = LayoutConfig::default();
        if !has_keys(&self.layout.romaji_rows) {
            log::warn!("romaji_rows defines no keys, falling back to default rows");
            self.layout.romaji_rows = defaults.romaji_rows;
        }
        if !has_keys(&self.layout.symbol_rows) {
            log::warn!("symbol_rows defines no keys, falling back to default rows");
            self.layout.symbol_rows = defaults.symbol_rows;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("vkeyboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads the user configuration, or defaults if the file does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates the configuration at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn has_keys(rows: &[String]) -> bool {
    rows.iter().flat_map(|row| row.chars()).any(|c| !c.is_whitespace())
}
