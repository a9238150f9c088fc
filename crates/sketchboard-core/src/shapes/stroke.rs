//! Freehand stroke shape (pen and eraser).

use super::{ShapeId, ShapeStyle, ShapeTrait, next_shape_id};
use kurbo::{Point, Rect, Vec2};

/// A freehand stroke: an ordered polyline.
///
/// Points are only ever appended while the stroke is being drawn. Once the
/// stroke is part of the scene it is moved by replacing every point at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub(crate) id: ShapeId,
    /// Points in drawing order.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Stroke {
    /// Start a new stroke at `start`.
    pub fn new(start: Point, style: ShapeStyle) -> Self {
        Self::from_points(vec![start], style)
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, style: ShapeStyle) -> Self {
        Self {
            id: next_shape_id(),
            points,
            style,
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replace all points by translating the whole stroke.
    pub fn translate(&mut self, delta: Vec2) {
        self.points = self.points.iter().map(|p| *p + delta).collect();
    }
}

impl ShapeTrait for Stroke {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p))
    }

    fn anchor(&self) -> Point {
        self.points.first().copied().unwrap_or(Point::ZERO)
    }

    fn set_anchor(&mut self, anchor: Point) {
        let delta = anchor - self.anchor();
        self.translate(delta);
    }
}
