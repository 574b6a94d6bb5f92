//! Configuration settings for visioncare.
//!
//! Settings are loaded from `~/.visioncare/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::VisionError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Session timing settings.
    pub session: SessionConfig,
    /// Initial break policy, used when no policy has been stored yet.
    pub breaks: BreakConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// Log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Session timing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Real seconds per tracking tick. Each tick accrues `tick_seconds / 60` minutes.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
    /// Start tracking as soon as a session is opened.
    #[serde(default = "default_true")]
    pub auto_start: bool,
    /// Reset the daily counter when the local date changes.
    #[serde(default = "default_true")]
    pub day_rollover: bool,
}

/// Break reminder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakConfig {
    /// Minutes of screen time between breaks (1-120).
    #[serde(default = "default_interval")]
    pub interval_minutes: u32,
    /// Break length in minutes (1-30).
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    /// Whether break reminders fire at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_tick_seconds() -> u64 {
    60
}

const fn default_interval() -> u32 {
    20
}

const fn default_duration() -> u32 {
    5
}

const fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
            log_level: default_log_level(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_seconds: default_tick_seconds(),
            auto_start: default_true(),
            day_rollover: default_true(),
        }
    }
}

impl Default for BreakConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval(),
            duration_minutes: default_duration(),
            enabled: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, VisionError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            VisionError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            VisionError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }
}
