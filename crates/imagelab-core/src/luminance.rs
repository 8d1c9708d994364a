//! Luma conversion using ITU-R BT.601 weights.
//!
//! Every grayscale-based operation normalizes its input through
//! [`to_grayscale`], so this module defines the single luma policy of the
//! engine. The weights are evaluated in 14-bit fixed point, which keeps the
//! conversion exact for neutral pixels (`r == g == b` maps to that value).

use crate::raster::{Channels, Image};

/// ITU-R BT.601 coefficient for red channel in luma calculation.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luma calculation.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luma calculation.
pub const LUMA_B: f32 = 0.114;

const FIXED_SHIFT: u32 = 14;
const FIXED_R: u32 = 4899;
const FIXED_G: u32 = 9617;
const FIXED_B: u32 = 1868;

/// Calculate luma from u8 RGB values (0 to 255).
///
/// The fixed-point weights sum to `1 << 14`, so the result never exceeds 255
/// and is rounded half-up.
#[inline]
pub fn calculate_luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let acc = FIXED_R * r as u32 + FIXED_G * g as u32 + FIXED_B * b as u32;
    ((acc + (1 << (FIXED_SHIFT - 1))) >> FIXED_SHIFT) as u8
}

/// Convert an image to a single luma channel.
///
/// A grayscale input is returned as a copy.
pub fn to_grayscale(image: &Image) -> Image {
    match image.channels() {
        Channels::Gray => image.clone(),
        Channels::Rgb => {
            let gray = image
                .pixels()
                .chunks_exact(3)
                .map(|px| calculate_luma_u8(px[0], px[1], px[2]))
                .collect();
            Image::from_parts(image.width(), image.height(), Channels::Gray, gray)
        }
    }
}
