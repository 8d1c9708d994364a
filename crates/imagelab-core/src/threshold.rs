//! Binary thresholding.

use crate::luminance::to_grayscale;
use crate::raster::{Channels, Image};

/// Convert to grayscale, then map every sample to 255 if it is at least
/// `threshold` and to 0 otherwise.
pub fn apply_threshold(image: &Image, threshold: u8) -> Image {
    let gray = to_grayscale(image);
    let pixels = gray
        .pixels()
        .iter()
        .map(|&v| if v >= threshold { 255 } else { 0 })
        .collect();
    Image::from_parts(gray.width(), gray.height(), Channels::Gray, pixels)
}
