//! GCanvas Settings Crate
//!
//! Handles canvas configuration: tool, cutting depths, fill tuning, motion heights and
//! the default font, stored as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, CanvasConfig, CuttingSettings, FillConfig, MotionConfig, TextSettings,
    ToolSettings, CONFIG_FILE_NAME,
};
pub use error::{SettingsError, SettingsResult};
