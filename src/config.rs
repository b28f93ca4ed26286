//! Viewport tuning constants and their RON loader.

use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Smallest allowed zoom factor.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;

/// Largest allowed zoom factor.
pub const DEFAULT_MAX_SCALE: f64 = 5.0;

/// Offset that centres the virtual surface under the viewport on first load.
pub const DEFAULT_HOME_OFFSET: Vec2 = Vec2::new(-9000.0, -9000.0);

/// Extent of the virtual surface in surface pixels.
pub const DEFAULT_SURFACE_SIZE: Vec2 = Vec2::new(20_000.0, 20_000.0);

/// Wheel zoom factor per notch towards the user.
pub const WHEEL_ZOOM_IN: f64 = 1.05;

/// Wheel zoom factor per notch away from the user.
pub const WHEEL_ZOOM_OUT: f64 = 0.95;

/// Toolbar zoom-in factor.
pub const BUTTON_ZOOM_IN: f64 = 1.2;

/// Toolbar zoom-out factor.
pub const BUTTON_ZOOM_OUT: f64 = 0.8;

/// Velocity (px/ms) at or below which momentum stops.
pub const MOMENTUM_THRESHOLD: f64 = 0.1;

/// Per-tick velocity multiplier while coasting.
pub const MOMENTUM_FRICTION: f64 = 0.95;

/// Fixed integration step per animation tick, in milliseconds.
pub const MOMENTUM_FRAME_MILLIS: f64 = 16.0;

/// Errors that can occur when loading a viewport configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse viewport config: {0}")]
    Parse(#[from] ron::de::SpannedError),
    #[error("invalid scale bounds: min {min} must be positive and not exceed max {max}")]
    ScaleBounds { min: f64, max: f64 },
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("momentum threshold must be a non-negative finite number, got {0}")]
    Threshold(f64),
    #[error("momentum friction must lie strictly between 0 and 1, got {0}")]
    Friction(f64),
}

/// Zoom factors for each input source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub wheel_in: f64,
    pub wheel_out: f64,
    pub button_in: f64,
    pub button_out: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            wheel_in: WHEEL_ZOOM_IN,
            wheel_out: WHEEL_ZOOM_OUT,
            button_in: BUTTON_ZOOM_IN,
            button_out: BUTTON_ZOOM_OUT,
        }
    }
}

/// Momentum decay parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Velocity in px/ms at or below which coasting stops.
    pub threshold: f64,
    /// Multiplier applied to velocity after each tick.
    pub friction: f64,
    /// Integration step per tick. Fixed rather than measured.
    pub frame_millis: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            threshold: MOMENTUM_THRESHOLD,
            friction: MOMENTUM_FRICTION,
            frame_millis: MOMENTUM_FRAME_MILLIS,
        }
    }
}

/// Construction-time settings for a viewport.
///
/// Every field has a default, so a config file only needs to name the values
/// it overrides:
///
/// ```ron
/// (
///     max_scale: 8.0,
///     momentum: (friction: 0.9),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Offset restored by a zoom reset and used on first load.
    pub home_offset: Vec2,
    /// Size of the virtual surface in surface pixels.
    pub surface_size: Vec2,
    pub zoom: ZoomConfig,
    pub momentum: MomentumConfig,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            home_offset: DEFAULT_HOME_OFFSET,
            surface_size: DEFAULT_SURFACE_SIZE,
            zoom: ZoomConfig::default(),
            momentum: MomentumConfig::default(),
        }
    }
}

impl ViewportConfig {
    /// Parses and validates a RON document.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_scale, self.max_scale);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::ScaleBounds { min, max });
        }

        let positive = [
            ("zoom.wheel_in", self.zoom.wheel_in),
            ("zoom.wheel_out", self.zoom.wheel_out),
            ("zoom.button_in", self.zoom.button_in),
            ("zoom.button_out", self.zoom.button_out),
            ("momentum.frame_millis", self.momentum.frame_millis),
            ("surface_size.x", self.surface_size.x),
            ("surface_size.y", self.surface_size.y),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        let threshold = self.momentum.threshold;
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(ConfigError::Threshold(threshold));
        }

        let friction = self.momentum.friction;
        if !(friction > 0.0 && friction < 1.0) {
            return Err(ConfigError::Friction(friction));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ViewportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_scale, 0.1);
        assert_eq!(config.max_scale, 5.0);
        assert_eq!(config.home_offset, Vec2::new(-9000.0, -9000.0));
        assert_eq!(config.momentum.frame_millis, 16.0);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config =
            ViewportConfig::from_ron_str("(max_scale: 8.0, momentum: (friction: 0.9))").unwrap();
        assert_eq!(config.max_scale, 8.0);
        assert_eq!(config.min_scale, DEFAULT_MIN_SCALE);
        assert_eq!(config.momentum.friction, 0.9);
        assert_eq!(config.momentum.threshold, MOMENTUM_THRESHOLD);
        assert_eq!(config.zoom, ZoomConfig::default());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(
            ViewportConfig::from_ron_str("()").unwrap(),
            ViewportConfig::default()
        );
    }

    #[test]
    fn home_offset_parses_as_struct() {
        let config = ViewportConfig::from_ron_str("(home_offset: (x: 10.0, y: -20.0))").unwrap();
        assert_eq!(config.home_offset, Vec2::new(10.0, -20.0));
    }

    #[test]
    fn inverted_scale_bounds_are_rejected() {
        let err = ViewportConfig::from_ron_str("(min_scale: 3.0, max_scale: 2.0)").unwrap_err();
        assert!(matches!(err, ConfigError::ScaleBounds { .. }));
    }

    #[test]
    fn zero_min_scale_is_rejected() {
        let err = ViewportConfig::from_ron_str("(min_scale: 0.0)").unwrap_err();
        assert!(matches!(err, ConfigError::ScaleBounds { .. }));
    }

    #[test]
    fn friction_must_decay() {
        let err = ViewportConfig::from_ron_str("(momentum: (friction: 1.0))").unwrap_err();
        assert!(matches!(err, ConfigError::Friction(f) if f == 1.0));
    }

    #[test]
    fn non_positive_zoom_factor_is_named() {
        let err = ViewportConfig::from_ron_str("(zoom: (button_out: -0.8))").unwrap_err();
        assert_eq!(
            err.to_string(),
            "zoom.button_out must be a positive finite number, got -0.8"
        );
    }

    #[test]
    fn syntax_errors_surface_as_parse_errors() {
        let err = ViewportConfig::from_ron_str("(max_scale: )").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ViewportConfig::load(Path::new("/nonexistent/viewport.ron")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/viewport.ron"));
    }
}
