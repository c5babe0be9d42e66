//! Profile image ingestion.
//!
//! A picked photo is scaled to a fixed preview width, compressed as JPEG and
//! carried around as base64 text so it can live inside a plain record field.

use base64::{Engine, engine::general_purpose};
use image::{
    ColorType, DynamicImage, Rgb, RgbImage, codecs::jpeg::JpegEncoder, imageops::FilterType,
};
use tracing::{debug, warn};

use crate::domain::{
    error::{DecodeError, EncodeError, ImageSourceError},
    models::encoded_image::EncodedImage,
};

/// Width every stored image is scaled to
pub const PREVIEW_WIDTH: u32 = 150;

/// JPEG quality on the 0-100 scale
pub const JPEG_QUALITY: u8 = 50;

/// Largest dimension a JPEG frame can carry
pub const JPEG_MAX_DIMENSION: u32 = u16::MAX as u32;

const PLACEHOLDER_RGB: [u8; 3] = [204, 204, 204];

/// Target size for a source of `width × height`, keeping the aspect ratio.
///
/// The height is rounded down but never below one pixel.
pub fn preview_dimensions(width: u32, height: u32) -> (u32, u32) {
    let scaled = u64::from(height) * u64::from(PREVIEW_WIDTH) / u64::from(width.max(1));
    let height = u32::try_from(scaled).unwrap_or(u32::MAX).max(1);
    (PREVIEW_WIDTH, height)
}

/// Downsample, compress and base64 encode a decoded image.
pub fn encode(image: &DynamicImage) -> Result<EncodedImage, EncodeError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(EncodeError::EmptyImage);
    }

    let (width, height) = preview_dimensions(image.width(), image.height());
    // checked before resizing so a tall sliver never allocates the full raster
    if height > JPEG_MAX_DIMENSION {
        return Err(EncodeError::TooTall {
            height,
            max: JPEG_MAX_DIMENSION,
        });
    }
    // nearest neighbour, no smoothing
    let scaled = image.resize_exact(width, height, FilterType::Nearest).to_rgb8();

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode(
        scaled.as_raw(),
        width,
        height,
        ColorType::Rgb8,
    )?;

    let text = general_purpose::STANDARD.encode(&bytes);
    debug!(
        source_width = image.width(),
        source_height = image.height(),
        width,
        height,
        jpeg_bytes = bytes.len(),
        "encoded profile image"
    );
    Ok(EncodedImage::new(text))
}

/// Turn base64 text back into a raster.
///
/// ASCII whitespace inside the text is ignored so that line-wrapped
/// payloads decode too.
pub fn decode(text: &str) -> Result<DynamicImage, DecodeError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = general_purpose::STANDARD.decode(compact.as_bytes())?;
    Ok(image::load_from_memory(&bytes)?)
}

/// Decode for display, falling back to [`placeholder`] on malformed input
pub fn decode_or_placeholder(text: &str) -> DynamicImage {
    match decode(text) {
        Ok(image) => image,
        Err(e) => {
            warn!(error = %e, "stored image could not be decoded, using placeholder");
            placeholder()
        }
    }
}

/// Neutral square shown when no usable image exists
pub fn placeholder() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(
        PREVIEW_WIDTH,
        PREVIEW_WIDTH,
        Rgb(PLACEHOLDER_RGB),
    ))
}

/// Decode the raw bytes fetched from an image source
pub fn decode_source_bytes(bytes: &[u8]) -> Result<DynamicImage, ImageSourceError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| ImageSourceError::Unreadable(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(ImageSourceError::Unreadable("image has no pixels".to_string()));
    }
    Ok(image)
}
