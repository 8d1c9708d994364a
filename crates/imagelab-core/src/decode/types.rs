//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not one of the supported raster formats.
    #[error("Invalid or unsupported image format")]
    UnsupportedFormat,

    /// The file is recognized but corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    Corrupted(String),

    /// The decoded pixels cannot be represented as gray or RGB.
    #[error("Unsupported color layout: {0}")]
    UnsupportedColorLayout(String),
}

/// Raster formats accepted by the image source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
}

impl SupportedFormat {
    /// File extensions a file picker should offer for this format.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            SupportedFormat::Jpeg => &["jpg", "jpeg"],
            SupportedFormat::Png => &["png"],
            SupportedFormat::Bmp => &["bmp"],
            SupportedFormat::Tiff => &["tif", "tiff"],
        }
    }

    /// Map from the `image` crate's format, if supported.
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(SupportedFormat::Jpeg),
            image::ImageFormat::Png => Some(SupportedFormat::Png),
            image::ImageFormat::Bmp => Some(SupportedFormat::Bmp),
            image::ImageFormat::Tiff => Some(SupportedFormat::Tiff),
            _ => None,
        }
    }

    /// Convert to the `image` crate's format.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            SupportedFormat::Jpeg => image::ImageFormat::Jpeg,
            SupportedFormat::Png => image::ImageFormat::Png,
            SupportedFormat::Bmp => image::ImageFormat::Bmp,
            SupportedFormat::Tiff => image::ImageFormat::Tiff,
        }
    }
}
