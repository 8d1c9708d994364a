//! Byte-level decoding with format sniffing.

use std::io::Cursor;

use image::ImageReader;

use super::{DecodeError, SupportedFormat};
use crate::raster::Image;

/// Sniff the format from the leading magic bytes.
///
/// Returns `None` for unknown data and for formats outside the supported set.
pub fn detect_format(bytes: &[u8]) -> Option<SupportedFormat> {
    image::guess_format(bytes)
        .ok()
        .and_then(SupportedFormat::from_image_format)
}

/// Decode JPEG, PNG, BMP or TIFF bytes into an [`Image`].
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the bytes are not one of the
/// supported formats, and `DecodeError::Corrupted` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<Image, DecodeError> {
    let format = detect_format(bytes).ok_or(DecodeError::UnsupportedFormat)?;

    let reader = ImageReader::with_format(Cursor::new(bytes), format.to_image_format());
    let img = reader
        .decode()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    log::debug!(
        "decoded {:?} image {}x{} ({:?})",
        format,
        img.width(),
        img.height(),
        img.color()
    );

    Image::try_from(img).map_err(|e| DecodeError::UnsupportedColorLayout(e.to_string()))
}
