use super::{sobel_gradients, BorderMode};
use crate::raster::{Channels, Image};

/// Sobel gradient magnitude of a grayscale image.
///
/// The fractional part of `sqrt(gx² + gy²)` is truncated and values above 255
/// saturate.
pub fn sobel_magnitude(gray: &Image) -> Image {
    debug_assert!(gray.is_gray());
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    let (gx, gy) = sobel_gradients(gray.pixels(), width, height, BorderMode::Reflect101);

    let pixels = gx
        .iter()
        .zip(gy.iter())
        .map(|(&dx, &dy)| {
            let mag = ((dx * dx + dy * dy) as f64).sqrt();
            mag.min(255.0) as u8
        })
        .collect();

    Image::from_parts(gray.width(), gray.height(), Channels::Gray, pixels)
}
