//! Coordinate conversion and hit-testing.
//!
//! The render transform is `translate(pan) * scale(zoom)`; [`to_logical`] is
//! its exact inverse, so a pointer position and the pixel painted under it
//! always agree.

use crate::shapes::{Shape, ShapeTrait};
use kurbo::{Point, Rect, Vec2};

/// Convert a screen-space pointer position into logical drawing coordinates.
pub fn to_logical(screen: Point, pan: Vec2, zoom: f64) -> Point {
    Point::new((screen.x - pan.x) / zoom, (screen.y - pan.y) / zoom)
}

/// Convert logical drawing coordinates into screen space.
pub fn to_screen(logical: Point, pan: Vec2, zoom: f64) -> Point {
    Point::new(logical.x * zoom + pan.x, logical.y * zoom + pan.y)
}

/// Box spanned from `origin` by a signed width and height, normalized via
/// min/max so negative extents behave like positive ones.
pub fn normalized_rect(origin: Point, width: f64, height: f64) -> Rect {
    Rect::from_points(origin, Point::new(origin.x + width, origin.y + height))
}

/// Closed containment test (edges count as inside).
pub fn rect_contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    point.distance(proj)
}

/// Minimum distance from a point to a polyline. A single point is treated as
/// a degenerate polyline; an empty one is infinitely far away.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => point.distance(*only),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Check whether a logical point hits a shape.
///
/// Strokes use proximity to their polyline within `tolerance`. Every other
/// shape uses its normalized bounding box; for ellipses this deliberately
/// over-approximates the curve with its bounding rectangle, and text uses the
/// estimated line extents.
pub fn hit_test(point: Point, shape: &Shape, tolerance: f64) -> bool {
    match shape {
        Shape::Stroke(stroke) => point_to_polyline_dist(point, &stroke.points) <= tolerance,
        Shape::Rectangle(s) => rect_contains(s.bounds(), point),
        Shape::Ellipse(s) => rect_contains(s.bounds(), point),
        Shape::Text(s) => rect_contains(s.bounds(), point),
        Shape::Image(s) => rect_contains(s.bounds(), point),
    }
}

/// Find the visually frontmost shape under `point`: scans in reverse paint
/// order and returns the first hit.
pub fn topmost_hit(point: Point, shapes: &[Shape], tolerance: f64) -> Option<&Shape> {
    shapes.iter().rev().find(|s| hit_test(point, s, tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Ellipse, Rectangle, ShapeStyle, Stroke, Text};

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_to_logical_inverts_render_transform() {
        let cases = [
            (Vec2::new(0.0, 0.0), 1.0, Point::new(12.0, 7.0)),
            (Vec2::new(-35.5, 120.25), 0.5, Point::new(400.0, 300.0)),
            (Vec2::new(17.0, -3.0), 2.7, Point::new(-8.0, 1e4)),
            (Vec2::new(1e3, 1e3), 0.1, Point::new(0.001, 0.002)),
        ];
        for (pan, zoom, screen) in cases {
            let logical = to_logical(screen, pan, zoom);
            assert!(approx(to_screen(logical, pan, zoom), screen));
            let affine = kurbo::Affine::translate(pan) * kurbo::Affine::scale(zoom);
            assert!(approx(affine * logical, screen));
        }
    }

    #[test]
    fn test_normalized_rect() {
        let rect = normalized_rect(Point::new(50.0, 40.0), -40.0, -30.0);
        assert_eq!(rect, Rect::new(10.0, 10.0, 50.0, 40.0));
    }

    #[test]
    fn test_segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        assert!((point_to_segment_dist(Point::new(50.0, 5.0), a, b) - 5.0).abs() < 1e-9);
        assert!((point_to_segment_dist(Point::new(-3.0, 4.0), a, b) - 5.0).abs() < 1e-9);
        assert!((point_to_segment_dist(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_stroke_hit_uses_tolerance() {
        let stroke = Shape::Stroke(Stroke::from_points(
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            ShapeStyle::default(),
        ));
        assert!(hit_test(Point::new(50.0, 9.0), &stroke, 10.0));
        assert!(!hit_test(Point::new(50.0, 11.0), &stroke, 10.0));

        let dot = Shape::Stroke(Stroke::new(Point::new(5.0, 5.0), ShapeStyle::default()));
        assert!(hit_test(Point::new(8.0, 9.0), &dot, 10.0));
    }

    #[test]
    fn test_negative_rectangle_hit() {
        let rect = Shape::Rectangle(Rectangle::new(
            Point::new(50.0, 40.0),
            -40.0,
            -30.0,
            ShapeStyle::default(),
        ));
        assert!(hit_test(Point::new(30.0, 25.0), &rect, 0.0));
        assert!(hit_test(Point::new(10.0, 10.0), &rect, 0.0));
        assert!(!hit_test(Point::new(55.0, 25.0), &rect, 0.0));
    }

    #[test]
    fn test_ellipse_hit_is_bounding_box() {
        let ellipse = Shape::Ellipse(Ellipse::new(
            Point::new(0.0, 0.0),
            100.0,
            100.0,
            ShapeStyle::default(),
        ));
        // Corner of the box lies outside the true ellipse but still hits.
        assert!(hit_test(Point::new(2.0, 2.0), &ellipse, 0.0));
    }

    #[test]
    fn test_text_hit_uses_estimated_width() {
        let text = Shape::Text(Text::new(
            Point::new(0.0, 40.0),
            "hello".to_string(),
            ShapeStyle::default(),
        ));
        assert!(hit_test(Point::new(10.0, 30.0), &text, 0.0));
        assert!(!hit_test(Point::new(10.0, 45.0), &text, 0.0));
        assert!(!hit_test(Point::new(61.0, 30.0), &text, 0.0));
    }

    #[test]
    fn test_topmost_hit_prefers_last_drawn() {
        let a = Shape::Rectangle(Rectangle::new(
            Point::new(0.0, 0.0),
            100.0,
            100.0,
            ShapeStyle::default(),
        ));
        let b = Shape::Rectangle(Rectangle::new(
            Point::new(0.0, 0.0),
            100.0,
            100.0,
            ShapeStyle::default(),
        ));
        let b_id = b.id();
        let shapes = vec![a, b];
        assert_eq!(topmost_hit(Point::new(50.0, 50.0), &shapes, 10.0).map(Shape::id), Some(b_id));
        assert!(topmost_hit(Point::new(500.0, 50.0), &shapes, 10.0).is_none());
    }
}
