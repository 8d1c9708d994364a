//! Per-sample tonal adjustments: brightness/contrast and negative.
//!
//! Both operate on every channel of the input and preserve its channel
//! layout. Since each output sample depends only on the input sample, they
//! are evaluated through a 256-entry lookup table.

use crate::raster::Image;

/// Linear brightness/contrast mapping.
///
/// Formula: `output = clamp(round(input * contrast + brightness), 0, 255)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessContrast {
    /// Offset added after scaling (-100 to 100)
    pub brightness: i32,
    /// Multiplicative gain (0.1 to 3.0)
    pub contrast: f64,
}

impl Default for BrightnessContrast {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 1.0,
        }
    }
}

impl BrightnessContrast {
    pub fn new(brightness: i32, contrast: f64) -> Self {
        Self {
            brightness,
            contrast,
        }
    }

    /// Check if the mapping leaves every sample unchanged.
    pub fn is_identity(&self) -> bool {
        self.brightness == 0 && self.contrast == 1.0
    }

    #[inline]
    fn map(&self, sample: u8) -> u8 {
        let v = sample as f64 * self.contrast + self.brightness as f64;
        v.round().clamp(0.0, 255.0) as u8
    }

    fn lut(&self) -> [u8; 256] {
        let mut lut = [0u8; 256];
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = self.map(i as u8);
        }
        lut
    }
}

/// Apply brightness/contrast to every sample of every channel.
pub fn apply_brightness_contrast(image: &Image, adjustment: BrightnessContrast) -> Image {
    if adjustment.is_identity() {
        return image.clone();
    }
    apply_lut(image, &adjustment.lut())
}

/// Invert every sample: `output = 255 - input`.
pub fn apply_negative(image: &Image) -> Image {
    let pixels = image.pixels().iter().map(|&v| 255 - v).collect();
    Image::from_parts(image.width(), image.height(), image.channels(), pixels)
}

fn apply_lut(image: &Image, lut: &[u8; 256]) -> Image {
    let pixels = image.pixels().iter().map(|&v| lut[v as usize]).collect();
    Image::from_parts(image.width(), image.height(), image.channels(), pixels)
}
