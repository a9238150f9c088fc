//! PNG export of the rendered board.

use crate::pixmap::PixmapSurface;
use crate::renderer::{RenderContext, RenderResult, render};
use std::path::Path;
use tiny_skia::Pixmap;

/// File name offered when the user exports without choosing one.
pub const DEFAULT_EXPORT_NAME: &str = "whiteboard-drawing.png";

/// Render a frame into a fresh pixmap of the given size.
pub fn render_to_pixmap(ctx: &RenderContext<'_>, width: u32, height: u32) -> RenderResult<Pixmap> {
    let mut surface = PixmapSurface::new(width, height)?;
    render(ctx, &mut surface);
    Ok(surface.into_pixmap())
}

/// Encode a pixmap as an RGBA8 PNG.
pub fn encode_png(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba)?;
    }
    Ok(png_data)
}

/// Render and encode in one step. Does not touch the scene or history.
pub fn export_png(ctx: &RenderContext<'_>, width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let pixmap = render_to_pixmap(ctx, width, height)?;
    encode_png(&pixmap)
}

/// Render, encode and write to `path`.
pub fn save_png(
    ctx: &RenderContext<'_>,
    width: u32,
    height: u32,
    path: impl AsRef<Path>,
) -> RenderResult<()> {
    let path = path.as_ref();
    let png_data = export_png(ctx, width, height)?;
    if let Err(err) = std::fs::write(path, &png_data) {
        log::error!("failed to write {}: {err}", path.display());
        return Err(err.into());
    }
    log::info!("PNG export complete: {} bytes to {}", png_data.len(), path.display());
    Ok(())
}
