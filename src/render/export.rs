/// Card export pipeline
///
/// Export runs in three steps: rasterize the card document at twice the
/// target size (a high-resolution intermediate regardless of on-screen size),
/// downsample to the exact fixed target with Lanczos3, and encode a lossless
/// PNG written under a fixed name into the Downloads directory.
///
/// The live preview shares the first step at 1x on-screen size.

use image::imageops::FilterType;
use image::{imageops, DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;

use crate::render::raster::{rasterize, Raster, RasterError};
use crate::render::svg::card_svg;
use crate::state::background::Background;
use crate::state::card::{CardData, Orientation};

/// Fixed name of the exported file.
pub const EXPORT_FILENAME: &str = "availability-card.png";

/// The intermediate raster is rendered at this multiple of the target size.
const SUPERSAMPLE: u32 = 2;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("rasterized card did not fit an image buffer")]
    Buffer,
    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),
    #[error("failed to write exported card: {0}")]
    Io(#[from] std::io::Error),
}

/// A finished export: the written path plus the PNG bytes, which the session
/// history reuses for its thumbnail.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub png: Vec<u8>,
}

/// Render the card at the orientation's fixed export size and encode PNG.
pub fn export_png(
    card: &CardData,
    background: &Background,
    orientation: Orientation,
) -> Result<Vec<u8>, ExportError> {
    let svg = card_svg(card, background, orientation);
    let (target_w, target_h) = orientation.export_size();

    let raster = rasterize(&svg, target_w * SUPERSAMPLE, target_h * SUPERSAMPLE)?;
    let intermediate = RgbaImage::from_raw(raster.width, raster.height, raster.rgba)
        .ok_or(ExportError::Buffer)?;

    let output = imageops::resize(&intermediate, target_w, target_h, FilterType::Lanczos3);

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(output)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(ExportError::Encode)?;
    Ok(png)
}

/// Export the card and save it as `availability-card.png` in the user's
/// Downloads directory (home directory when Downloads cannot be determined).
/// A previous export under the same name is overwritten, like a browser
/// download with a fixed filename.
pub fn export_to_downloads(
    card: &CardData,
    background: &Background,
    orientation: Orientation,
) -> Result<ExportOutcome, ExportError> {
    let png = export_png(card, background, orientation)?;

    let dir = dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(EXPORT_FILENAME);
    std::fs::write(&path, &png)?;

    log::info!("📸 exported {}x{} card to {}", orientation.export_size().0,
        orientation.export_size().1, path.display());
    Ok(ExportOutcome { path, png })
}

/// Rasterize the card at its on-screen preview size.
pub fn render_preview(
    card: &CardData,
    background: &Background,
    orientation: Orientation,
) -> Result<Raster, ExportError> {
    let svg = card_svg(card, background, orientation);
    let (w, h) = orientation.preview_size();
    Ok(rasterize(&svg, w, h)?)
}
