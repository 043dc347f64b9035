/// Photo crop pipeline
///
/// Turns an uploaded file into an in-memory source image, and an open crop
/// session into the final profile photo: the selected square is copied out
/// 1:1 (no scaling) and encoded as JPEG. Failures are typed so the caller can
/// keep the modal open and the prior photo intact.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

use crate::state::crop::{CropSession, LoadedImage};

const JPEG_QUALITY: u8 = 90;

#[derive(Debug, Error)]
pub enum CropError {
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Read an uploaded image file and normalize it to PNG in memory.
///
/// Normalizing once up front means every later consumer (crop preview, SVG
/// embedding) deals with a single known format.
pub fn load_source(path: &Path) -> Result<LoadedImage, CropError> {
    let bytes = std::fs::read(path)?;
    let decoded = image::load_from_memory(&bytes).map_err(CropError::Decode)?;
    let (width, height) = decoded.dimensions();

    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(CropError::Encode)?;

    Ok(LoadedImage {
        bytes: png,
        width,
        height,
    })
}

/// Apply an open crop session: copy the derived rectangle out of the source
/// and encode it as JPEG.
pub fn apply(session: &CropSession) -> Result<Vec<u8>, CropError> {
    let source = image::load_from_memory(&session.source.bytes).map_err(CropError::Decode)?;
    let rect = session.rect();

    // Output raster is sized exactly to the rectangle; no resampling
    let cropped = source.crop_imm(rect.x, rect.y, rect.width, rect.height);
    encode_jpeg(&cropped)
}

/// Encode an image as JPEG at the pipeline's fixed quality.
pub fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>, CropError> {
    let rgb = img.to_rgb8();
    let mut bytes = Vec::new();
    let mut cursor = Cursor::new(&mut bytes);
    let mut encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
    encoder
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(CropError::Encode)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::crop::CropSession;
    use image::{Rgba, RgbaImage};

    /// A small test source with a distinct color per pixel, encoded as PNG.
    fn test_source(width: u32, height: u32) -> LoadedImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 7, 255])
        });
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        LoadedImage {
            bytes: png,
            width,
            height,
        }
    }

    #[test]
    fn test_output_dimensions_equal_crop_rect() {
        let mut session = CropSession::new(test_source(64, 48));
        session.set_zoom(2.0);
        let rect = session.rect();

        let jpeg = apply(&session).unwrap();
        let out = image::load_from_memory(&jpeg).unwrap();

        assert_eq!(out.dimensions(), (rect.width, rect.height));
        assert_eq!(rect.width, 24);
    }

    #[test]
    fn test_full_frame_crop_is_reencoding_of_source() {
        // Square source, zoom 1.0, untouched offsets: the rectangle covers
        // the whole image, so applying must equal re-encoding the source
        let source = test_source(32, 32);
        let session = CropSession::new(source.clone());
        assert_eq!(session.rect().width, 32);

        let cropped = apply(&session).unwrap();

        let decoded = image::load_from_memory(&source.bytes).unwrap();
        let reencoded = encode_jpeg(&decoded).unwrap();
        assert_eq!(cropped, reencoded);
    }

    #[test]
    fn test_crop_copies_the_selected_region() {
        // Offsets pushed to the top-left corner at zoom 2: rect starts at 0,0
        let mut session = CropSession::new(test_source(64, 64));
        session.set_zoom(2.0);
        session.set_offset_x(-1.0);
        session.set_offset_y(-1.0);
        assert_eq!(session.rect().x, 0);
        assert_eq!(session.rect().y, 0);

        let jpeg = apply(&session).unwrap();
        let out = image::load_from_memory(&jpeg).unwrap().to_rgb8();

        // JPEG is lossy, so compare loosely against the expected gradient
        let corner = out.get_pixel(0, 0);
        assert!(corner[0] < 16 && corner[1] < 16);
        assert_eq!(out.dimensions(), (32, 32));
    }

    #[test]
    fn test_corrupt_source_is_a_typed_error() {
        let session = CropSession::new(LoadedImage {
            bytes: vec![0xde, 0xad, 0xbe, 0xef],
            width: 2,
            height: 2,
        });
        assert!(matches!(apply(&session), Err(CropError::Decode(_))));
    }
}
