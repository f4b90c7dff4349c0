//! Canvas configuration
//!
//! Provides configuration file handling and validation for a canvas session.
//! Supports JSON and TOML file formats; the default location lives in the
//! platform-specific configuration directory.
//!
//! Configuration is organized into logical sections:
//! - Tool (cutter diameter)
//! - Cutting (total depth, depth of cut)
//! - Fill (strategy, flattening and offsetting tuning)
//! - Motion (travel height, native arc capabilities)
//! - Text (default font shorthand)

use crate::error::{SettingsError, SettingsResult};
use gcanvas_camtools::{FillSettings, FillStrategy};
use gcanvas_core::{validate_depth, validate_tool_diameter};
use gcanvas_motion::{ArcSupport, MotionSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "config.toml";
const CONFIG_DIR_NAME: &str = "gcanvas";

/// Cutter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Cutter diameter in drawing units
    pub diameter: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self { diameter: 5.0 }
    }
}

/// Cutting depth settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuttingSettings {
    /// Total depth of the cut
    pub depth: f64,
    /// Depth removed by a single pass
    pub depth_of_cut: f64,
}

impl Default for CuttingSettings {
    fn default() -> Self {
        Self {
            depth: 1.0,
            depth_of_cut: 0.25,
        }
    }
}

/// Area fill tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    pub strategy: FillStrategy,
    /// Points sampled per curve when flattening
    pub curve_divisions: usize,
    /// Vertices closer than this are merged before filling
    pub clean_tolerance: f64,
    /// Largest inset attempted before the fill gives up
    pub safety_bound: f64,
}

impl Default for FillConfig {
    fn default() -> Self {
        let fill = FillSettings::default();
        Self {
            strategy: fill.strategy,
            curve_divisions: 40,
            clean_tolerance: fill.clean_tolerance,
            safety_bound: fill.safety_bound,
        }
    }
}

/// Machine motion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Travel height above the stock top
    pub safe_z: f64,
    /// Machine executes clockwise arcs natively
    pub supports_arc_cw: bool,
    /// Machine executes counter-clockwise arcs natively
    pub supports_arc_ccw: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            safe_z: MotionSettings::default().safe_z,
            supports_arc_cw: false,
            supports_arc_ccw: false,
        }
    }
}

/// Text settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    /// CSS-style font shorthand, e.g. `"bold 12pt Helvetiker"`
    pub font: String,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            font: "7pt Helvetiker".to_string(),
        }
    }
}

/// Complete canvas configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CanvasConfig {
    pub tool: ToolSettings,
    pub cutting: CuttingSettings,
    pub fill: FillConfig,
    pub motion: MotionConfig,
    pub text: TextSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl CanvasConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded canvas config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        debug!("Saved canvas config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        validate_tool_diameter(self.tool.diameter)
            .map_err(|e| SettingsError::invalid("tool.diameter", e.to_string()))?;
        validate_depth("depth", self.cutting.depth)
            .map_err(|e| SettingsError::invalid("cutting.depth", e.to_string()))?;
        validate_depth("depth_of_cut", self.cutting.depth_of_cut)
            .map_err(|e| SettingsError::invalid("cutting.depth_of_cut", e.to_string()))?;

        if self.fill.curve_divisions == 0 {
            return Err(SettingsError::invalid("fill.curve_divisions", "must be >= 1"));
        }
        if !(self.fill.clean_tolerance.is_finite() && self.fill.clean_tolerance >= 0.0) {
            return Err(SettingsError::invalid("fill.clean_tolerance", "must be >= 0"));
        }
        if !(self.fill.safety_bound.is_finite() && self.fill.safety_bound > 0.0) {
            return Err(SettingsError::invalid("fill.safety_bound", "must be > 0"));
        }

        if !self.motion.safe_z.is_finite() {
            return Err(SettingsError::invalid("motion.safe_z", "must be finite"));
        }

        if self.text.font.trim().is_empty() {
            return Err(SettingsError::invalid("text.font", "must not be empty"));
        }

        Ok(())
    }

    /// Fill engine settings for the configured tool
    pub fn fill_settings(&self) -> FillSettings {
        FillSettings {
            tool_diameter: self.tool.diameter,
            clean_tolerance: self.fill.clean_tolerance,
            safety_bound: self.fill.safety_bound,
            strategy: self.fill.strategy,
            ..FillSettings::default()
        }
    }

    /// Heights for a [`gcanvas_motion::Motion`] emitter; cutting happens one depth of
    /// cut below the stock top.
    pub fn motion_settings(&self) -> MotionSettings {
        MotionSettings {
            safe_z: self.motion.safe_z,
            cut_z: -self.cutting.depth_of_cut,
        }
    }

    pub fn arc_support(&self) -> ArcSupport {
        ArcSupport {
            cw: self.motion.supports_arc_cw,
            ccw: self.motion.supports_arc_ccw,
        }
    }
}

/// Location of the user configuration file.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no configuration directory on this platform".to_string())
    })?;
    Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CanvasConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.tool.diameter, 5.0);
        assert_eq!(config.fill.curve_divisions, 40);
        assert_eq!(config.text.font, "7pt Helvetiker");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CanvasConfig::new();
        config.tool.diameter = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "tool.diameter"
        ));

        let mut config = CanvasConfig::new();
        config.cutting.depth_of_cut = -1.0;
        assert!(config.validate().is_err());

        let mut config = CanvasConfig::new();
        config.fill.curve_divisions = 0;
        assert!(config.validate().is_err());

        let mut config = CanvasConfig::new();
        config.text.font = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_derived_settings() {
        let mut config = CanvasConfig::new();
        config.tool.diameter = 3.0;
        config.cutting.depth_of_cut = 0.5;
        config.motion.supports_arc_ccw = true;

        assert_eq!(config.fill_settings().tool_diameter, 3.0);
        assert_eq!(config.motion_settings().cut_z, -0.5);
        assert_eq!(config.arc_support(), ArcSupport { cw: false, ccw: true });
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CanvasConfig = toml::from_str("[tool]\ndiameter = 2.5\n").unwrap();
        assert_eq!(config.tool.diameter, 2.5);
        assert_eq!(config.cutting, CuttingSettings::default());
    }

    #[test]
    fn test_default_config_path_file_name() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("gcanvas/config.toml"));
        }
    }
}
