//! PNG export of paletted surfaces.

use std::path::Path;

use basescape_core::surface::{Palette, Surface};
use image::{ImageBuffer, Rgba, RgbaImage};
use tracing::debug;

use crate::error::{Result, ToolError};

/// Convert a paletted surface to RGBA. Colour index 0 becomes fully
/// transparent regardless of the palette entry.
#[must_use]
pub fn to_rgba_image(surface: &Surface, palette: &Palette) -> RgbaImage {
    ImageBuffer::from_fn(surface.width(), surface.height(), |x, y| {
        match surface.pixel(x as i32, y as i32) {
            Some(0) | None => Rgba([0, 0, 0, 0]),
            Some(index) => Rgba(palette.rgba(index)),
        }
    })
}

/// Write a surface as a PNG file, creating parent directories.
pub fn save_png(surface: &Surface, palette: &Palette, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ToolError::io(parent, e))?;
    }
    to_rgba_image(surface, palette).save(path)?;
    debug!(path = %path.display(), "PNG written");
    Ok(())
}
