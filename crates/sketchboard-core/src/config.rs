//! Board configuration.

use crate::shapes::ShapeColor;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Zoom limits and step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Additive step used by zoom in/out.
    pub step: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            min: 0.5,
            max: 3.0,
        }
    }
}

/// Where an inserted image lands, in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for ImagePlacement {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            width: 200.0,
            height: 200.0,
        }
    }
}

impl ImagePlacement {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Tunables for a [`Whiteboard`](crate::Whiteboard).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub zoom: ZoomConfig,
    /// Stroke hit distance in logical units.
    pub hit_tolerance: f64,
    pub default_color: ShapeColor,
    pub default_stroke_width: f64,
    /// Surface fill behind every shape. The eraser paints with it too.
    pub background: ShapeColor,
    pub image_placement: ImagePlacement,
    /// Maximum number of retained snapshots; unbounded when `None`.
    pub history_limit: Option<usize>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomConfig::default(),
            hit_tolerance: 10.0,
            default_color: ShapeColor::black(),
            default_stroke_width: 5.0,
            background: ShapeColor::white(),
            image_placement: ImagePlacement::default(),
            history_limit: None,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("loaded board config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zoom = &self.zoom;
        if !(zoom.min > 0.0 && zoom.min <= zoom.max) {
            return Err(ConfigError::Invalid(format!(
                "zoom range [{}, {}] must be positive and ordered",
                zoom.min, zoom.max
            )));
        }
        if !(zoom.step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "zoom step must be positive, got {}",
                zoom.step
            )));
        }
        if !(self.hit_tolerance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "hit tolerance must be positive, got {}",
                self.hit_tolerance
            )));
        }
        if !(self.default_stroke_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "default stroke width must be positive, got {}",
                self.default_stroke_width
            )));
        }
        let placement = &self.image_placement;
        if !(placement.width > 0.0 && placement.height > 0.0) {
            return Err(ConfigError::Invalid(
                "image placement must have a positive size".to_string(),
            ));
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "history limit must keep at least one snapshot".to_string(),
            ));
        }
        Ok(())
    }
}
