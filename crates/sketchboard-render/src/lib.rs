//! Sketchboard Render Library
//!
//! Draws a board onto a [`Surface`]. Ships a CPU raster surface on top of
//! tiny-skia, PNG export, and background image import.

mod export;
mod import;
mod pixmap;
mod renderer;
mod text;

pub use export::{DEFAULT_EXPORT_NAME, encode_png, export_png, render_to_pixmap, save_png};
pub use import::{PendingImport, decode_image, import_image};
pub use pixmap::PixmapSurface;
pub use renderer::{RenderContext, RenderError, RenderResult, Surface, render, render_shape};
pub use text::default_font;
