//! Configuration for vizij-text-core.
//!
//! Every struct accepts partial camelCase JSON from a JS host; missing fields
//! fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Timing options for the typewriter cycle. All durations are milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypewriterConfig {
    pub typing_speed_ms: f64,
    pub deleting_speed_ms: f64,
    /// Pause with the full phrase displayed before deletion begins.
    pub hold_full_ms: f64,
    pub initial_delay_ms: f64,
    /// Phrases strictly longer than this (in chars) use the speed multiplier.
    pub long_phrase_length_threshold: usize,
    /// Applied to both typing and deleting speeds for long phrases.
    pub long_phrase_speed_multiplier: f64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            typing_speed_ms: 90.0,
            deleting_speed_ms: 40.0,
            hold_full_ms: 8000.0,
            initial_delay_ms: 100.0,
            long_phrase_length_threshold: 25,
            long_phrase_speed_multiplier: 0.8,
        }
    }
}

/// When a debounced resize should reset the typewriter cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RestartPolicy {
    /// Restart after every resize burst.
    #[default]
    Always,
    /// Restart only when the burst crosses the mobile/desktop breakpoint.
    OnClassChange,
}

/// Viewport breakpoint, per-class styling and resize debounce.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponsiveConfig {
    /// Widths strictly below this select the mobile style.
    pub breakpoint: f64,
    pub mobile_font_size: String,
    pub desktop_font_size: String,
    pub color: String,
    pub font_family: String,
    pub debounce_ms: f64,
    pub restart_policy: RestartPolicy,
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            breakpoint: 768.0,
            mobile_font_size: "1.8em".to_string(),
            desktop_font_size: "2.2em".to_string(),
            color: "#E0E0E0".to_string(),
            font_family: "Sacramento, cursive".to_string(),
            debounce_ms: 250.0,
            restart_policy: RestartPolicy::Always,
        }
    }
}

/// Symbol set and frame windows for the scramble transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrambleConfig {
    pub symbols: String,
    /// Start frames are drawn uniformly from `[0, max_start_frame)`.
    pub max_start_frame: u32,
    /// Window lengths are drawn uniformly from `[0, max_window_frames)`.
    pub max_window_frames: u32,
    /// Per-frame chance that an in-flight cell picks a new symbol.
    pub flicker_probability: f64,
    pub frame_interval_ms: f64,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            symbols: "!<>-_/:~;[]{}\u{2014}=+*^?#________".to_string(),
            max_start_frame: 20,
            max_window_frames: 20,
            flicker_probability: 0.28,
            frame_interval_ms: 16.0,
        }
    }
}

/// Count-up label timing. All durations are milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CounterConfig {
    /// Time from 0 to the target value.
    pub duration_ms: f64,
    pub frame_interval_ms: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1000.0,
            frame_interval_ms: 16.0,
        }
    }
}

/// Combined configuration document for a host page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub typewriter: TypewriterConfig,
    pub responsive: ResponsiveConfig,
    pub scramble: ScrambleConfig,
    pub counter: CounterConfig,
}

impl Config {
    /// Parse a (possibly partial) JSON configuration document.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
