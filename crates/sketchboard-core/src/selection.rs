//! Drag capture for moving an existing shape.

use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Vec2};

/// Offset between the pointer and the shape captured at pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOffset {
    /// One offset per stroke point.
    Points(Vec<Vec2>),
    /// Offset of the shape's anchor.
    Anchor(Vec2),
}

impl DragOffset {
    /// Capture offsets from `pointer` (logical) to the shape.
    pub fn capture(shape: &Shape, pointer: Point) -> Self {
        match shape {
            Shape::Stroke(stroke) => {
                DragOffset::Points(stroke.points.iter().map(|p| pointer - *p).collect())
            }
            _ => DragOffset::Anchor(pointer - shape.anchor()),
        }
    }

    /// Reposition `shape` so the captured offsets hold at `pointer`.
    ///
    /// Stroke points are all replaced at once.
    pub fn apply(&self, shape: &mut Shape, pointer: Point) {
        match (self, shape) {
            (DragOffset::Points(offsets), Shape::Stroke(stroke)) => {
                stroke.points = offsets.iter().map(|offset| pointer - *offset).collect();
            }
            (DragOffset::Anchor(offset), shape) => shape.set_anchor(pointer - *offset),
            (DragOffset::Points(_), shape) => {
                log::warn!("point offsets captured for a {}", shape.kind_name());
            }
        }
    }
}

/// The shape currently being moved.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub shape_id: ShapeId,
    pub offset: DragOffset,
}

impl Selection {
    pub fn capture(shape: &Shape, pointer: Point) -> Self {
        Self {
            shape_id: shape.id(),
            offset: DragOffset::capture(shape, pointer),
        }
    }
}
