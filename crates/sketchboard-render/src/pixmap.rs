//! tiny-skia raster surface.

use crate::renderer::{RenderError, RenderResult, Surface};
use crate::text;
use kurbo::{Affine, Point, Rect};
use sketchboard_core::shapes::{Bitmap, ShapeColor, ShapeStyle};
use tiny_skia::{
    Color, ColorU8, FillRule, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap,
    PixmapPaint, Stroke, Transform,
};

/// Convert a kurbo transform to tiny-skia's representation.
pub(crate) fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

pub(crate) fn to_skia_color(color: ShapeColor) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn stroke_paint(color: ShapeColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    paint
}

fn stroke_for(style: &ShapeStyle) -> Stroke {
    Stroke {
        width: style.stroke_width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

/// Copy straight RGBA into a premultiplied pixmap.
pub(crate) fn bitmap_to_pixmap(bitmap: &Bitmap) -> RenderResult<Pixmap> {
    let mut pixmap = Pixmap::new(bitmap.width(), bitmap.height()).ok_or_else(|| {
        RenderError::InvalidBitmap(format!("{}x{}", bitmap.width(), bitmap.height()))
    })?;
    for (dst, src) in pixmap
        .pixels_mut()
        .iter_mut()
        .zip(bitmap.pixels().chunks_exact(4))
    {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Ok(pixmap)
}

/// A CPU raster surface backed by a tiny-skia pixmap.
pub struct PixmapSurface {
    pixmap: Pixmap,
    transform: Affine,
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("transform", &self.transform)
            .finish()
    }
}

impl PixmapSurface {
    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RenderError::Surface(format!("cannot allocate a {width}x{height} pixmap"))
        })?;
        Ok(Self {
            pixmap,
            transform: Affine::IDENTITY,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Demultiplied color of one pixel, if in range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<ShapeColor> {
        // tiny-skia only bounds-checks the flat index, so x would wrap.
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(ShapeColor::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    fn skia_transform(&self) -> Transform {
        to_skia_transform(self.transform)
    }
}

impl Surface for PixmapSurface {
    fn clear(&mut self, color: ShapeColor) {
        self.pixmap.fill(to_skia_color(color));
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &ShapeStyle) {
        let paint = stroke_paint(style.color);
        let transform = self.skia_transform();
        match points {
            [] => {}
            [dot] => {
                let radius = (style.stroke_width / 2.0).max(0.5) as f32;
                if let Some(path) = PathBuilder::from_circle(dot.x as f32, dot.y as f32, radius) {
                    self.pixmap
                        .fill_path(&path, &paint, FillRule::Winding, transform, None);
                }
            }
            [first, rest @ ..] => {
                let mut pb = PathBuilder::new();
                pb.move_to(first.x as f32, first.y as f32);
                for p in rest {
                    pb.line_to(p.x as f32, p.y as f32);
                }
                if let Some(path) = pb.finish() {
                    self.pixmap
                        .stroke_path(&path, &paint, &stroke_for(style), transform, None);
                }
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, style: &ShapeStyle) {
        let mut pb = PathBuilder::new();
        pb.move_to(rect.x0 as f32, rect.y0 as f32);
        pb.line_to(rect.x1 as f32, rect.y0 as f32);
        pb.line_to(rect.x1 as f32, rect.y1 as f32);
        pb.line_to(rect.x0 as f32, rect.y1 as f32);
        pb.close();
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                line_cap: LineCap::Butt,
                line_join: LineJoin::Miter,
                ..stroke_for(style)
            };
            self.pixmap.stroke_path(
                &path,
                &stroke_paint(style.color),
                &stroke,
                self.skia_transform(),
                None,
            );
        }
    }

    fn stroke_ellipse(&mut self, bounds: Rect, style: &ShapeStyle) {
        let Some(oval) = tiny_skia::Rect::from_ltrb(
            bounds.x0 as f32,
            bounds.y0 as f32,
            bounds.x1 as f32,
            bounds.y1 as f32,
        ) else {
            return;
        };
        // Degenerate ovals (zero width or height) yield no path.
        if let Some(path) = PathBuilder::from_oval(oval) {
            self.pixmap.stroke_path(
                &path,
                &stroke_paint(style.color),
                &stroke_for(style),
                self.skia_transform(),
                None,
            );
        }
    }

    fn fill_text(&mut self, baseline: Point, content: &str, font_size: f64, color: ShapeColor) {
        let origin = self.transform * baseline;
        let scale = self.transform.determinant().abs().sqrt();
        text::draw_text(&mut self.pixmap, origin, content, font_size * scale, color);
    }

    fn draw_image(&mut self, bounds: Rect, bitmap: &Bitmap) {
        // Converted per frame; bitmaps are small and frames are on demand.
        let source = match bitmap_to_pixmap(bitmap) {
            Ok(source) => source,
            Err(err) => {
                log::warn!("skipping image: {err}");
                return;
            }
        };
        let sx = bounds.width() / f64::from(bitmap.width());
        let sy = bounds.height() / f64::from(bitmap.height());
        let placement = self.transform
            * Affine::translate((bounds.x0, bounds.y0))
            * Affine::scale_non_uniform(sx, sy);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..Default::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint,
            to_skia_transform(placement),
            None,
        );
    }
}
