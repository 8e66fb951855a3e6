//! Configuration for sphereview windows and environments
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Window settings (size, title, background)
//! - Canvas settings (size, projection anchor, axis direction, outline width)
//! - Sphere defaults (initial position, radius and color of new objects)
//! - Duplicate name policy

use serde::{Deserialize, Serialize};
use sphereview_canvas::{Anchor, CanvasColor, Projection};
use sphereview_core::constants::{
    DEFAULT_CANVAS_SIZE, DEFAULT_RADIUS, DEFAULT_WINDOW_SIZE,
};
use sphereview_core::{Position, Rgba};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// What `initialize_object` does when the name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with a duplicate name error.
    #[default]
    Reject,
    /// Destroy the existing object and register a fresh one.
    Replace,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

/// Top-level window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_SIZE.0,
            height: DEFAULT_WINDOW_SIZE.1,
            title: "Spheres Environment".to_string(),
        }
    }
}

/// Canvas and projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Background color (`#RRGGBB`, a color name, or empty for none)
    pub background: CanvasColor,
    /// Placement of the normalized square on the canvas
    pub anchor: Anchor,
    /// Whether positive y points up the screen
    pub y_axis_up: bool,
    /// Circle outline width in pixels
    pub outline_width: f32,
}

impl CanvasSettings {
    /// The projection described by these settings.
    pub fn projection(&self) -> Projection {
        Projection::new(self.width, self.height)
            .with_anchor(self.anchor)
            .with_y_up(self.y_axis_up)
    }
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_SIZE.0,
            height: DEFAULT_CANVAS_SIZE.1,
            background: CanvasColor::BLACK,
            anchor: Anchor::Center,
            y_axis_up: true,
            outline_width: 1.0,
        }
    }
}

/// Initial state of newly created spheres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereDefaults {
    /// Radius in normalized units
    pub radius: f64,
    /// RGBA color, components in [0, 1]
    pub color: Rgba,
    /// Position in normalized coordinates
    pub position: Position,
}

impl Default for SphereDefaults {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            color: Rgba::WHITE,
            position: Position::ORIGIN,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Duplicate object name handling
    pub duplicate_policy: DuplicatePolicy,
    /// Window settings
    pub window: WindowSettings,
    /// Canvas settings
    pub canvas: CanvasSettings,
    /// Defaults for new spheres
    pub defaults: SphereDefaults,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform configuration file location (`<config dir>/sphereview/config.toml`).
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("sphereview").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => return Err(unsupported(other)),
        };

        config.validate()?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load from `path` when given, else from the platform location when a
    /// file exists there, else fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => return Err(unsupported(other)),
        };

        std::fs::write(path, content)?;
        debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(SettingsError::invalid(
                "window",
                "dimensions must be > 0",
            ));
        }

        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SettingsError::invalid(
                "canvas",
                "dimensions must be > 0",
            ));
        }

        if !self.canvas.outline_width.is_finite() || self.canvas.outline_width < 0.0 {
            return Err(SettingsError::invalid(
                "canvas.outline_width",
                "must be a finite value >= 0",
            ));
        }

        let radius = self.defaults.radius;
        if !radius.is_finite() || radius < 0.0 {
            return Err(SettingsError::invalid(
                "defaults.radius",
                format!("must be a finite value >= 0, got {}", radius),
            ));
        }

        self.defaults
            .position
            .validate()
            .map_err(|e| SettingsError::invalid("defaults.position", e.to_string()))?;

        Ok(())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn unsupported(extension: Option<&str>) -> SettingsError {
    SettingsError::UnsupportedFormat(format!(
        "'{}' (config file must be .json or .toml)",
        extension.unwrap_or("")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!((config.window.width, config.window.height), (800, 600));
        assert_eq!((config.canvas.width, config.canvas.height), (600, 600));
        assert_eq!(config.canvas.background, CanvasColor::BLACK);
        assert_eq!(config.defaults.radius, 1.0);
        assert_eq!(config.defaults.position, Position::ORIGIN);
        assert!(config.defaults.color.is_opaque());
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.canvas.width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.defaults.radius = -1.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "defaults.radius"
        ));

        let mut config = Config::default();
        config.defaults.position = Position::new(f64::NAN, 0.0, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r##"
            duplicate_policy = "replace"

            [canvas]
            background = "#202020"
            anchor = "top_left"

            [defaults]
            color = [0.0, 0.0, 1.0, 1.0]
            "##,
        )
        .unwrap();

        assert_eq!(config.duplicate_policy, DuplicatePolicy::Replace);
        assert_eq!(config.canvas.background, CanvasColor::rgb(0x20, 0x20, 0x20));
        assert_eq!(config.canvas.anchor, Anchor::TopLeft);
        assert_eq!(config.canvas.width, 600);
        assert_eq!(config.defaults.color, Rgba::opaque(0.0, 0.0, 1.0).unwrap());
        assert_eq!(config.defaults.radius, 1.0);
    }

    #[test]
    fn test_out_of_range_default_color_fails_to_parse() {
        let parsed = toml::from_str::<Config>(
            r#"
            [defaults]
            color = [0.0, 0.0, 1.5, 1.0]
            "#,
        );
        assert!(parsed.is_err());
    }
}
