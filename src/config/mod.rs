//! Configuration management for visioncare.
//!
//! This module handles loading and saving configuration from `~/.visioncare/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{BreakConfig, ColorSetting, Config, GeneralConfig, SessionConfig};
