/// SVG rasterization
///
/// Renders the composed card document into straight-alpha RGBA pixels at an
/// explicit pixel size. X and Y scale independently: the requested dimensions
/// are authoritative and the document is stretched to fill them exactly.

use once_cell::sync::Lazy;
use std::sync::Arc;
use thiserror::Error;

/// System font database, loaded once and shared across renders.
static FONTS: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    log::info!("loaded {} font faces for card text", db.len());
    Arc::new(db)
});

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to parse card SVG: {0}")]
    Svg(#[from] usvg::Error),
    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
}

/// A rasterized card: straight-alpha RGBA, row-major.
#[derive(Debug, Clone)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Rasterize `svg` to exactly `width` x `height` pixels.
pub fn rasterize(svg: &str, width: u32, height: u32) -> Result<Raster, RasterError> {
    let mut options = usvg::Options::default();
    options.fontdb = FONTS.clone();
    options.font_family = "sans-serif".to_string();

    let tree = usvg::Tree::from_str(svg, &options)?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(RasterError::PixmapAlloc { width, height })?;

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia hands back premultiplied alpha; the image crate and iced
    // both expect straight alpha
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    Ok(Raster {
        width,
        height,
        rgba,
    })
}
