//! Tool system for the whiteboard.

use crate::shapes::{ShapeColor, ShapeStyle};
use serde::{Deserialize, Serialize};

/// Smallest and largest selectable stroke width.
pub const STROKE_WIDTH_RANGE: (f64, f64) = (1.0, 50.0);

/// Quick-pick colors offered next to the tool bar.
pub const PALETTE: [ShapeColor; 8] = [
    ShapeColor::rgb(0x00, 0x00, 0x00),
    ShapeColor::rgb(0xff, 0x00, 0x00),
    ShapeColor::rgb(0x00, 0xff, 0x00),
    ShapeColor::rgb(0x00, 0x00, 0xff),
    ShapeColor::rgb(0xff, 0xff, 0x00),
    ShapeColor::rgb(0xff, 0x00, 0xff),
    ShapeColor::rgb(0x00, 0xff, 0xff),
    ShapeColor::rgb(0xff, 0xa5, 0x00),
];

/// Available tools.
///
/// Image insertion is not a tool: it goes through
/// [`Whiteboard::insert_image`](crate::Whiteboard::insert_image).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Selection,
    #[serde(alias = "move")]
    Pan,
    Pen,
    Eraser,
    Rectangle,
    #[serde(alias = "circle")]
    Ellipse,
    Text,
}

/// Current tool plus the style applied to newly created shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current style to apply to new shapes.
    pub current_style: ShapeStyle,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(ShapeStyle::default())
    }
}

impl ToolManager {
    pub fn new(style: ShapeStyle) -> Self {
        Self {
            current_tool: ToolKind::default(),
            current_style: style,
        }
    }

    /// Switch to a different tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    /// Pick a drawing color. Picking a color also arms the pen.
    pub fn set_color(&mut self, color: ShapeColor) {
        self.current_style.color = color;
        self.current_tool = ToolKind::Pen;
    }

    /// Set the stroke width, clamped to [`STROKE_WIDTH_RANGE`].
    pub fn set_stroke_width(&mut self, width: f64) {
        let (min, max) = STROKE_WIDTH_RANGE;
        if width.is_finite() {
            self.current_style.stroke_width = width.clamp(min, max);
        }
    }

    /// Style a new shape gets under the current tool. The eraser keeps the
    /// stroke width but paints with the board `background`.
    pub fn style_for_tool(&self, background: ShapeColor) -> ShapeStyle {
        match self.current_tool {
            ToolKind::Eraser => ShapeStyle::new(background, self.current_style.stroke_width),
            _ => self.current_style,
        }
    }
}
