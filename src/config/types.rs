//! Configuration type definitions.

use crate::platform::Platform;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Keyboard behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeyboardConfig {
    /// Hide the on-screen keyboard right after setup
    #[serde(default)]
    pub hide_on_start: bool,

    /// Force the input path ("mobile" or "desktop") instead of detecting it
    #[serde(default)]
    pub platform: Option<Platform>,

    /// Minimum time between repeated backspaces while the desktop key is held,
    /// in milliseconds (valid range: 10 - 1000)
    #[serde(default = "default_backspace_repeat_ms")]
    pub backspace_repeat_ms: u64,
}

impl KeyboardConfig {
    pub fn backspace_repeat_interval(&self) -> Duration {
        Duration::from_millis(self.backspace_repeat_ms)
    }
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            hide_on_start: false,
            platform: None,
            backspace_repeat_ms: default_backspace_repeat_ms(),
        }
    }
}

/// Placement of the keyboard surface in the host scene.
///
/// Purely spatial; has no influence on key dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnchorConfig {
    /// Surface origin [x, y, z]
    #[serde(default = "default_anchor_position")]
    pub position: [f32; 3],

    /// Point the surface faces [x, y, z]
    #[serde(default = "default_anchor_look_at")]
    pub look_at: [f32; 3],

    /// Up direction used to orient the surface [x, y, z]
    #[serde(default = "default_anchor_world_up")]
    pub world_up: [f32; 3],
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            position: default_anchor_position(),
            look_at: default_anchor_look_at(),
            world_up: default_anchor_world_up(),
        }
    }
}

/// Keystroke sound settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FeedbackConfig {
    /// Play a cue for every dispatched key
    #[serde(default = "default_feedback_enabled")]
    pub enabled: bool,

    /// Sound file played as the cue (wav, ogg, mp3, flac)
    #[serde(default)]
    pub sound: Option<PathBuf>,

    /// Cue volume (valid range: 0.0 - 1.0)
    #[serde(default = "default_feedback_volume")]
    pub volume: f32,

    /// Also play the cue for physical keys in desktop mode
    #[serde(default)]
    pub on_desktop: bool,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            enabled: default_feedback_enabled(),
            sound: None,
            volume: default_feedback_volume(),
            on_desktop: false,
        }
    }
}

/// Character rows of the on-screen layouts.
///
/// Every non-whitespace character becomes one key; letters get an
/// upper-case face for shift.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LayoutConfig {
    /// Rows of the letter layout
    #[serde(default = "default_romaji_rows")]
    pub romaji_rows: Vec<String>,

    /// Rows of the digit/punctuation layout
    #[serde(default = "default_symbol_rows")]
    pub symbol_rows: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            romaji_rows: default_romaji_rows(),
            symbol_rows: default_symbol_rows(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_backspace_repeat_ms() -> u64 {
    100
}

fn default_anchor_position() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_anchor_look_at() -> [f32; 3] {
    [0.0, 0.0, 1.0]
}

fn default_anchor_world_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_feedback_enabled() -> bool {
    true
}

fn default_feedback_volume() -> f32 {
    1.0
}

fn default_romaji_rows() -> Vec<String> {
    ["qwertyuiop", "asdfghjkl", "zxcvbnm"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_symbol_rows() -> Vec<String> {
    ["1234567890", "-/:;()$&@\"", ".,?!'#%*+="]
        .into_iter()
        .map(String::from)
        .collect()
}
