//! Raster image type shared by every operation.
//!
//! Pixels are 8-bit samples stored row-major and interleaved. Color images
//! are RGB at this boundary; grayscale images carry a single channel.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Channel layout of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channels {
    /// Single luma channel.
    Gray,
    /// Red, green and blue, in that order.
    Rgb,
}

impl Channels {
    /// Number of interleaved samples per pixel.
    #[inline]
    pub fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }
}

/// An 8-bit raster image.
///
/// Construct through [`Image::new`] (or the `image` crate conversions) so
/// that the dimensions and buffer length are known to agree. Operations never
/// mutate an `Image`; they always return a freshly built one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: Channels,
    pixels: Vec<u8>,
}

impl Image {
    /// Create an image from raw interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` if either dimension is zero or the
    /// buffer length is not `width * height * channels`.
    pub fn new(
        width: u32,
        height: u32,
        channels: Channels,
        pixels: Vec<u8>,
    ) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidInput(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let expected = (width as usize) * (height as usize) * channels.count();
        if pixels.len() != expected {
            return Err(EngineError::InvalidInput(format!(
                "pixel buffer size mismatch: expected {}, got {}",
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// Create a single-channel image.
    pub fn gray(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EngineError> {
        Self::new(width, height, Channels::Gray, pixels)
    }

    /// Create an RGB image.
    pub fn rgb(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EngineError> {
        Self::new(width, height, Channels::Rgb, pixels)
    }

    /// Build an image from a buffer whose length is already known to match.
    ///
    /// Used by operations that derive their output size from a valid input.
    pub(crate) fn from_parts(width: u32, height: u32, channels: Channels, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * channels.count(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    #[inline]
    pub fn is_gray(&self) -> bool {
        self.channels == Channels::Gray
    }

    /// Interleaved samples in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image and return its sample buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Samples of the pixel at `(x, y)`; one entry for gray, three for RGB.
    ///
    /// Returns `None` when the coordinate is outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let n = self.channels.count();
        let idx = ((y as usize) * (self.width as usize) + x as usize) * n;
        Some(&self.pixels[idx..idx + n])
    }

    /// Re-check the invariants of an image built without validation
    /// (handlers assemble their outputs through `from_parts`).
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidInput(format!(
                "image dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        let expected = self.pixel_count() * self.channels.count();
        if self.pixels.len() != expected {
            return Err(EngineError::InvalidInput(format!(
                "pixel buffer size mismatch: expected {}, got {}",
                expected,
                self.pixels.len()
            )));
        }
        Ok(())
    }

    /// Convert to an `image::GrayImage`, if this image has one channel.
    pub fn to_gray_image(&self) -> Option<image::GrayImage> {
        match self.channels {
            Channels::Gray => {
                image::GrayImage::from_raw(self.width, self.height, self.pixels.clone())
            }
            Channels::Rgb => None,
        }
    }

    /// Convert to an `image::RgbImage`, if this image has three channels.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        match self.channels {
            Channels::Rgb => image::RgbImage::from_raw(self.width, self.height, self.pixels.clone()),
            Channels::Gray => None,
        }
    }

    /// Convert to a `DynamicImage` for display or encoding by a collaborator.
    pub fn to_dynamic_image(&self) -> Option<image::DynamicImage> {
        match self.channels {
            Channels::Gray => self.to_gray_image().map(image::DynamicImage::ImageLuma8),
            Channels::Rgb => self.to_rgb_image().map(image::DynamicImage::ImageRgb8),
        }
    }
}

impl TryFrom<image::GrayImage> for Image {
    type Error = EngineError;

    fn try_from(img: image::GrayImage) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        Image::gray(width, height, img.into_raw())
    }
}

impl TryFrom<image::RgbImage> for Image {
    type Error = EngineError;

    fn try_from(img: image::RgbImage) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        Image::rgb(width, height, img.into_raw())
    }
}

/// Gray and gray-alpha sources stay single-channel; every other color type
/// becomes RGB. Alpha is dropped and deeper samples are scaled to 8 bits.
impl TryFrom<image::DynamicImage> for Image {
    type Error = EngineError;

    fn try_from(img: image::DynamicImage) -> Result<Self, Self::Error> {
        if img.color().has_color() {
            Image::try_from(img.into_rgb8())
        } else {
            Image::try_from(img.into_luma8())
        }
    }
}
