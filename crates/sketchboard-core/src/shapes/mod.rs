//! Shape definitions for the whiteboard.

mod ellipse;
mod image;
mod rectangle;
mod stroke;
mod text;

pub use ellipse::Ellipse;
pub use image::{Bitmap, Image};
pub use rectangle::Rectangle;
pub use stroke::Stroke;
pub use text::Text;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
///
/// Ids are time-ordered (UUIDv7) so a shape created later always sorts after
/// one created earlier in the same session.
pub type ShapeId = Uuid;

/// Allocate a fresh shape id.
pub(crate) fn next_shape_id() -> ShapeId {
    Uuid::now_v7()
}

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("expected 3, 6 or 8 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

/// RGBA8 color, written and parsed as a CSS-style hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ShapeColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if !hex.is_ascii() {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError::BadDigit(s.to_string()))
        };
        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let nibble = |i: usize| byte(i..i + 1).map(|v| v * 17);
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?)),
            _ => Err(ColorParseError::BadLength(s.to_string())),
        }
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for ShapeColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for ShapeColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<ShapeColor> for String {
    fn from(color: ShapeColor) -> Self {
        color.to_string()
    }
}

/// Style shared by every stroked shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    /// Stroke (or text fill) color.
    pub color: ShapeColor,
    /// Stroke width in logical units. Also drives the font size of text.
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub fn new(color: ShapeColor, stroke_width: f64) -> Self {
        Self {
            color,
            stroke_width,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(ShapeColor::black(), 5.0)
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in logical coordinates, always normalized so that
    /// `x0 <= x1` and `y0 <= y1` even while width/height are negative.
    fn bounds(&self) -> Rect;

    /// The point a drag offset is measured against (top-left corner as drawn,
    /// text baseline origin, or first stroke point).
    fn anchor(&self) -> Point;

    /// Move the shape so that its anchor lands on `anchor`.
    fn set_anchor(&mut self, anchor: Point);
}

/// A drawable element of the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Stroke(Stroke),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Text(Text),
    Image(Image),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Stroke(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
            Shape::Ellipse(s) => s.id(),
            Shape::Text(s) => s.id(),
            Shape::Image(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Stroke(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
            Shape::Image(s) => s.bounds(),
        }
    }

    pub fn anchor(&self) -> Point {
        match self {
            Shape::Stroke(s) => s.anchor(),
            Shape::Rectangle(s) => s.anchor(),
            Shape::Ellipse(s) => s.anchor(),
            Shape::Text(s) => s.anchor(),
            Shape::Image(s) => s.anchor(),
        }
    }

    pub fn set_anchor(&mut self, anchor: Point) {
        match self {
            Shape::Stroke(s) => s.set_anchor(anchor),
            Shape::Rectangle(s) => s.set_anchor(anchor),
            Shape::Ellipse(s) => s.set_anchor(anchor),
            Shape::Text(s) => s.set_anchor(anchor),
            Shape::Image(s) => s.set_anchor(anchor),
        }
    }

    /// Style of the shape; images carry none.
    pub fn style(&self) -> Option<&ShapeStyle> {
        match self {
            Shape::Stroke(s) => Some(&s.style),
            Shape::Rectangle(s) => Some(&s.style),
            Shape::Ellipse(s) => Some(&s.style),
            Shape::Text(s) => Some(&s.style),
            Shape::Image(_) => None,
        }
    }

    /// Short lowercase name of the variant, used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Stroke(_) => "stroke",
            Shape::Rectangle(_) => "rectangle",
            Shape::Ellipse(_) => "ellipse",
            Shape::Text(_) => "text",
            Shape::Image(_) => "image",
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Shape::Stroke(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match self {
            Shape::Rectangle(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(ShapeColor::from_hex("#ff0000"), Ok(ShapeColor::rgb(255, 0, 0)));
        assert_eq!(ShapeColor::from_hex("#0f0"), Ok(ShapeColor::rgb(0, 255, 0)));
        assert_eq!(
            ShapeColor::from_hex("#00000080"),
            Ok(ShapeColor::new(0, 0, 0, 128))
        );
        assert_eq!("#FFA500".parse::<ShapeColor>(), Ok(ShapeColor::rgb(255, 165, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            ShapeColor::from_hex("ff0000"),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            ShapeColor::from_hex("#ff00"),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            ShapeColor::from_hex("#gg0000"),
            Err(ColorParseError::BadDigit(_))
        ));
    }

    #[test]
    fn test_display_round_trips_through_serde() {
        let color = ShapeColor::rgb(255, 0, 255);
        assert_eq!(color.to_string(), "#ff00ff");

        let json = serde_json::to_string(&ShapeColor::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, "\"#01020304\"");
        let back: ShapeColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ShapeColor::new(1, 2, 3, 4));
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let a = next_shape_id();
        let b = next_shape_id();
        assert_ne!(a, b);
        assert!(a < b);
    }
}
