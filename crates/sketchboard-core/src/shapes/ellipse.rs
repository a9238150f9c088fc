//! Ellipse shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, next_shape_id};
use crate::geometry::normalized_rect;
use kurbo::{Point, Rect};

/// An outlined ellipse inscribed in a (signed) drag box.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    /// Corner of the bounding box where the drag started.
    pub position: Point,
    /// Signed width of the bounding box.
    pub width: f64,
    /// Signed height of the bounding box.
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(position: Point, width: f64, height: f64, style: ShapeStyle) -> Self {
        Self {
            id: next_shape_id(),
            position,
            width,
            height,
            style,
        }
    }

    /// Stretch the bounding box so its far corner sits at `corner`.
    pub fn drag_to(&mut self, corner: Point) {
        self.width = corner.x - self.position.x;
        self.height = corner.y - self.position.y;
    }

    /// Center of the ellipse.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Radii (always non-negative).
    pub fn radii(&self) -> (f64, f64) {
        (self.width.abs() / 2.0, self.height.abs() / 2.0)
    }
}

impl ShapeTrait for Ellipse {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_radii() {
        let ellipse = Ellipse::new(Point::new(100.0, 50.0), -60.0, 40.0, ShapeStyle::default());
        let center = ellipse.center();
        assert!((center.x - 70.0).abs() < f64::EPSILON);
        assert!((center.y - 70.0).abs() < f64::EPSILON);
        assert_eq!(ellipse.radii(), (30.0, 20.0));
    }

    #[test]
    fn test_set_anchor_keeps_size() {
        let mut ellipse = Ellipse::new(Point::new(0.0, 0.0), 10.0, 20.0, ShapeStyle::default());
        ellipse.set_anchor(Point::new(5.0, 5.0));
        assert_eq!(ellipse.position, Point::new(5.0, 5.0));
        assert!((ellipse.width - 10.0).abs() < f64::EPSILON);
        assert!((ellipse.height - 20.0).abs() < f64::EPSILON);
    }
}
