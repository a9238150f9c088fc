//! Text shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, next_shape_id};
use kurbo::{Point, Rect};

/// Font size per unit of stroke width.
pub const FONT_SCALE: f64 = 4.0;

/// Average advance of a glyph relative to the font size, used to estimate
/// text extents without a font.
const ADVANCE_RATIO: f64 = 0.6;

/// A single line of text.
///
/// `position` is the left end of the baseline, so the glyphs extend upwards
/// from it by roughly one font size.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Baseline origin.
    pub position: Point,
    /// The text content.
    pub content: String,
    /// Style properties; `stroke_width` drives the font size.
    pub style: ShapeStyle,
}

impl Text {
    /// Create a new text shape.
    pub fn new(position: Point, content: String, style: ShapeStyle) -> Self {
        Self {
            id: next_shape_id(),
            position,
            content,
            style,
        }
    }

    /// Font size in logical units.
    pub fn font_size(&self) -> f64 {
        self.style.stroke_width * FONT_SCALE
    }

    /// Estimated advance width of the whole line.
    pub fn estimated_width(&self) -> f64 {
        self.content.chars().count() as f64 * self.font_size() * ADVANCE_RATIO
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y - self.font_size(),
            self.position.x + self.estimated_width(),
            self.position.y,
        )
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
    use crate::shapes::ShapeColor;

    #[test]
    fn test_font_size_follows_stroke_width() {
        let text = Text::new(
            Point::new(0.0, 0.0),
            "hi".to_string(),
            ShapeStyle::new(ShapeColor::black(), 5.0),
        );
        assert!((text.font_size() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds_sit_above_baseline() {
        let text = Text::new(
            Point::new(10.0, 100.0),
            "abcd".to_string(),
            ShapeStyle::new(ShapeColor::black(), 5.0),
        );
        let bounds = text.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 80.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 58.0).abs() < 1e-9);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }
}
