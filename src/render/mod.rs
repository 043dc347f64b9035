/// Card rendering module
///
/// This module handles:
/// - Composing the card view as an SVG document (svg.rs)
/// - Rasterizing that document to RGBA pixels (raster.rs)
/// - Cropping uploaded photos (crop.rs)
/// - Exporting the card as a fixed-size PNG (export.rs)

pub mod crop;
pub mod export;
pub mod raster;
pub mod svg;
