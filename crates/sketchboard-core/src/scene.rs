//! The scene store: the ordered list of committed shapes.

use crate::geometry;
use crate::shapes::{Shape, ShapeId};
use kurbo::Point;

/// Ordered shapes, back to front. Later entries paint on top and are
/// hit-tested first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene from shapes already in paint order.
    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// Add a shape on top of everything else.
    pub fn append(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Replace the whole scene (undo/redo restoration and clear).
    pub fn replace_all(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    /// Mutate the shape with the given id in place, keeping its paint
    /// position. Returns false if no such shape exists.
    pub fn update_by_id(&mut self, id: ShapeId, mutator: impl FnOnce(&mut Shape)) -> bool {
        match self.shapes.iter_mut().find(|s| s.id() == id) {
            Some(shape) => {
                mutator(shape);
                true
            }
            None => false,
        }
    }

    /// Get a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Topmost shape under a logical point.
    pub fn topmost_hit(&self, point: Point, tolerance: f64) -> Option<&Shape> {
        geometry::topmost_hit(point, &self.shapes, tolerance)
    }

    /// Shapes in paint order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Iterate shapes in paint order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Ids in paint order.
    pub fn ids(&self) -> Vec<ShapeId> {
        self.shapes.iter().map(Shape::id).collect()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}
