//! Rectangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, next_shape_id};
use crate::geometry::normalized_rect;
use kurbo::{Point, Rect};

/// An outlined rectangle.
///
/// `width`/`height` are signed: while dragging up or left they go negative and
/// are only normalized when the rectangle is measured or painted.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Corner where the drag started.
    pub position: Point,
    /// Signed width.
    pub width: f64,
    /// Signed height.
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64, style: ShapeStyle) -> Self {
        Self {
            id: next_shape_id(),
            position,
            width,
            height,
            style,
        }
    }

    /// Stretch the rectangle so its far corner sits at `corner`.
    pub fn drag_to(&mut self, corner: Point) {
        self.width = corner.x - self.position.x;
        self.height = corner.y - self.position.y;
    }
}

impl ShapeTrait for Rectangle {
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
