//! Camera module for pan/zoom transforms.

use crate::config::ZoomConfig;
use crate::geometry;
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the board.
///
/// Zooming always scales about the logical origin, not about the cursor:
/// `zoom_in`/`zoom_out` leave `offset` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan) in screen pixels.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
    /// Additive zoom step applied by `zoom_in`/`zoom_out`.
    pub zoom_step: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&ZoomConfig::default())
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera at 100% using the given zoom limits.
    pub fn from_config(config: &ZoomConfig) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0_f64.max(config.min).min(config.max),
            zoom_step: config.step,
            min_zoom: config.min,
            max_zoom: config.max,
        }
    }

    /// Get the affine transform for rendering (logical to screen).
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Convert a screen point to logical coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        geometry::to_logical(screen_point, self.offset, self.zoom)
    }

    /// Convert a logical point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Increase zoom by one step, clamped to the maximum.
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + self.zoom_step).min(self.max_zoom);
    }

    /// Decrease zoom by one step, clamped to the minimum.
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - self.zoom_step).max(self.min_zoom);
    }

    /// Reset camera to the origin at 100%.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0_f64.max(self.min_zoom).min(self.max_zoom);
    }

    /// Zoom as a rounded percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}
