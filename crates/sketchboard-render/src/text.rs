//! Text rasterization with a system sans-serif font.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use kurbo::Point;
use rusttype::{Font, Scale, point as rt_point};
use sketchboard_core::shapes::ShapeColor;
use std::sync::OnceLock;
use tiny_skia::{Pixmap, PremultipliedColorU8};

/// The sans-serif face used for every text shape, loaded once. `None` when
/// the system has no usable font.
pub fn default_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(|| {
        let font = load_system_font();
        if font.is_none() {
            log::warn!("no system sans-serif font found; text will not be rasterized");
        }
        font
    })
    .as_ref()
}

fn load_system_font() -> Option<Font<'static>> {
    let mut db = Database::new();
    db.load_system_fonts();

    let families = [Family::SansSerif];
    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let id = db.query(&query)?;
    db.with_face_data(id, |data, index| {
        Font::try_from_vec_and_index(data.to_vec(), index)
    })
    .flatten()
}

/// Source-over blend of `color` at `coverage` onto a premultiplied pixel.
fn blend(dst: PremultipliedColorU8, color: ShapeColor, coverage: f32) -> Option<PremultipliedColorU8> {
    let alpha = coverage.clamp(0.0, 1.0) * f32::from(color.a) / 255.0;
    let inv = 1.0 - alpha;
    let mix = |src: f32, dst: u8| (src * alpha + f32::from(dst) * inv).round() as u8;
    PremultipliedColorU8::from_rgba(
        mix(f32::from(color.r), dst.red()),
        mix(f32::from(color.g), dst.green()),
        mix(f32::from(color.b), dst.blue()),
        mix(255.0, dst.alpha()),
    )
}

/// Draw `content` with its baseline starting at `origin` (pixels).
pub(crate) fn draw_text(
    pixmap: &mut Pixmap,
    origin: Point,
    content: &str,
    font_size: f64,
    color: ShapeColor,
) {
    if content.is_empty() || font_size <= 0.0 {
        return;
    }
    let Some(font) = default_font() else {
        return;
    };
    let scale = Scale::uniform(font_size as f32);
    let start = rt_point(origin.x as f32, origin.y as f32);
    let (width, height) = (pixmap.width() as i32, pixmap.height() as i32);
    let stride = pixmap.width() as usize;
    let pixels = pixmap.pixels_mut();

    for glyph in font.layout(content, scale, start) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if coverage <= 0.0 || px < 0 || py < 0 || px >= width || py >= height {
                return;
            }
            let idx = py as usize * stride + px as usize;
            if let Some(out) = blend(pixels[idx], color, coverage) {
                pixels[idx] = out;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> PremultipliedColorU8 {
        PremultipliedColorU8::from_rgba(255, 255, 255, 255).unwrap()
    }

    #[test]
    fn test_blend_full_coverage_replaces() {
        let out = blend(white(), ShapeColor::black(), 1.0).unwrap();
        assert_eq!(
            (out.red(), out.green(), out.blue(), out.alpha()),
            (0, 0, 0, 255)
        );
    }

    #[test]
    fn test_blend_half_coverage_mixes() {
        let out = blend(white(), ShapeColor::black(), 0.5).unwrap();
        assert_eq!(out.red(), 128);
        assert_eq!(out.alpha(), 255);
    }

    #[test]
    fn test_blend_onto_transparent_is_premultiplied() {
        let clear = PremultipliedColorU8::from_rgba(0, 0, 0, 0).unwrap();
        let out = blend(clear, ShapeColor::rgb(255, 0, 0), 0.5).unwrap();
        assert_eq!((out.red(), out.alpha()), (128, 128));
    }

    #[test]
    fn test_draw_text_stays_in_bounds() {
        let mut pixmap = Pixmap::new(8, 8).unwrap();
        // Runs off every edge; must not panic whether or not a font exists.
        draw_text(
            &mut pixmap,
            Point::new(-20.0, 4.0),
            "WWWWWWWW",
            40.0,
            ShapeColor::black(),
        );
        draw_text(&mut pixmap, Point::new(0.0, 0.0), "", 10.0, ShapeColor::black());
    }
}
