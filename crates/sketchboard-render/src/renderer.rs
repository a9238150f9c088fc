//! Render entry point and the drawing-surface seam.

use kurbo::{Affine, Point, Rect};
use sketchboard_core::shapes::{Bitmap, Shape, ShapeColor, ShapeStyle};
use sketchboard_core::{Camera, Scene, Whiteboard};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("Image decoding failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid bitmap: {0}")]
    InvalidBitmap(String),
    #[error("Image decoder thread exited without a result")]
    WorkerGone,
}

/// Result type for render, export and import operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Drawing calls a render target must support.
///
/// Geometry arrives in logical coordinates; the surface maps it to pixels
/// with the transform last passed to [`Surface::set_transform`].
pub trait Surface {
    /// Fill the whole surface, ignoring the transform.
    fn clear(&mut self, color: ShapeColor);

    /// Set the logical-to-screen transform for subsequent calls.
    fn set_transform(&mut self, transform: Affine);

    /// Stroke an open polyline. A single point is drawn as a dot.
    fn stroke_polyline(&mut self, points: &[Point], style: &ShapeStyle);

    fn stroke_rect(&mut self, rect: Rect, style: &ShapeStyle);

    /// Stroke the ellipse inscribed in `bounds`.
    fn stroke_ellipse(&mut self, bounds: Rect, style: &ShapeStyle);

    /// Fill a line of text whose baseline starts at `baseline`.
    fn fill_text(&mut self, baseline: Point, text: &str, font_size: f64, color: ShapeColor);

    /// Draw a bitmap stretched over `bounds`.
    fn draw_image(&mut self, bounds: Rect, bitmap: &Bitmap);
}

/// Context for a single render frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Committed shapes, back to front.
    pub scene: &'a Scene,
    /// View transform.
    pub camera: &'a Camera,
    /// Shape being drawn, painted above the scene.
    pub in_progress: Option<&'a Shape>,
    /// Background color.
    pub background: ShapeColor,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(scene: &'a Scene, camera: &'a Camera) -> Self {
        Self {
            scene,
            camera,
            in_progress: None,
            background: ShapeColor::white(),
        }
    }

    /// Everything needed to draw a board as it currently looks.
    pub fn from_board(board: &'a Whiteboard) -> Self {
        Self::new(board.scene(), board.camera())
            .with_in_progress(board.in_progress())
            .with_background(board.config().background)
    }

    pub fn with_in_progress(mut self, shape: Option<&'a Shape>) -> Self {
        self.in_progress = shape;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: ShapeColor) -> Self {
        self.background = color;
        self
    }
}

/// Redraw the whole frame: background, every scene shape in paint order,
/// then the in-progress shape, all under the camera transform.
pub fn render(ctx: &RenderContext<'_>, surface: &mut dyn Surface) {
    surface.clear(ctx.background);
    surface.set_transform(ctx.camera.transform());

    for shape in ctx.scene.iter() {
        render_shape(shape, surface);
    }
    if let Some(shape) = ctx.in_progress {
        render_shape(shape, surface);
    }
}

/// Issue the drawing calls for one shape.
pub fn render_shape(shape: &Shape, surface: &mut dyn Surface) {
    match shape {
        Shape::Stroke(stroke) => {
            if !stroke.is_empty() {
                surface.stroke_polyline(&stroke.points, &stroke.style);
            }
        }
        Shape::Rectangle(_) => {
            if let Some(style) = shape.style() {
                surface.stroke_rect(shape.bounds(), style);
            }
        }
        Shape::Ellipse(_) => {
            if let Some(style) = shape.style() {
                surface.stroke_ellipse(shape.bounds(), style);
            }
        }
        Shape::Text(text) => {
            surface.fill_text(text.position, &text.content, text.font_size(), text.style.color);
        }
        Shape::Image(image) => surface.draw_image(shape.bounds(), &image.bitmap),
    }
}
