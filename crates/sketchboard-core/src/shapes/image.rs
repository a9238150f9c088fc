//! Image shape for embedding raster images.

use super::{ShapeId, ShapeTrait, next_shape_id};
use crate::geometry::normalized_rect;
use kurbo::{Point, Rect};
use std::sync::Arc;

/// A decoded bitmap: straight (non-premultiplied) RGBA8, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Wrap raw RGBA8 pixels. Returns `None` if the buffer length does not
    /// match `width * height * 4` or either dimension is zero.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if width == 0 || height == 0 || pixels.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// An image placed on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    /// Shared handle to the decoded pixels; snapshots share it instead of
    /// copying the bitmap.
    pub bitmap: Arc<Bitmap>,
}

impl Image {
    /// Create a new image shape.
    pub fn new(position: Point, width: f64, height: f64, bitmap: Arc<Bitmap>) -> Self {
        Self {
            id: next_shape_id(),
            position,
            width,
            height,
            bitmap,
        }
    }
}

impl ShapeTrait for Image {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        normalized_rect(self.position, self.width, self.height)
    }

    fn anchor(&self) -> Point {
        self.position
    }

    fn set_anchor(&mut self, anchor: Point) {
        self.position = anchor;
    }
}
