//! Morphological dilation with a square structuring element.
//!
//! The element is a `k × k` block of ones anchored at `(k / 2, k / 2)`, so for
//! even sizes it reaches one pixel further up/left than down/right.
//! Neighbours outside the image do not take part in the maximum.
//!
//! A rectangular maximum filter is separable: a horizontal pass followed by a
//! vertical pass gives the same result as the full 2-D window at `O(k)` per
//! pixel instead of `O(k²)`.

use crate::luminance::to_grayscale;
use crate::raster::{Channels, Image};

/// Square structuring element of all ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuringElement {
    size: u32,
}

impl StructuringElement {
    /// A `size × size` element. Sizes below 1 are raised to 1.
    pub fn square(size: u32) -> Self {
        Self { size: size.max(1) }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Inclusive offset range `(before, after)` covered along each axis.
    #[inline]
    fn reach(&self) -> (usize, usize) {
        let anchor = (self.size / 2) as usize;
        (anchor, self.size as usize - 1 - anchor)
    }
}

/// Convert to grayscale and dilate `iterations` times.
pub fn apply_dilation(image: &Image, kernel_size: u32, iterations: u32) -> Image {
    let gray = to_grayscale(image);
    let element = StructuringElement::square(kernel_size);
    let (width, height) = gray.dimensions();

    if element.size() == 1 {
        return gray;
    }

    let mut current = gray.into_pixels();
    for _ in 0..iterations {
        current = dilate_once(&current, width as usize, height as usize, element);
    }

    Image::from_parts(width, height, Channels::Gray, current)
}

fn dilate_once(src: &[u8], width: usize, height: usize, element: StructuringElement) -> Vec<u8> {
    let (before, after) = element.reach();

    // Horizontal pass
    let mut rows = vec![0u8; src.len()];
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        for x in 0..width {
            let x0 = x.saturating_sub(before);
            let x1 = (x + after).min(width - 1);
            rows[y * width + x] = row[x0..=x1].iter().copied().max().unwrap_or(0);
        }
    }

    // Vertical pass
    let mut out = vec![0u8; src.len()];
    for y in 0..height {
        let y0 = y.saturating_sub(before);
        let y1 = (y + after).min(height - 1);
        for x in 0..width {
            let mut max_val = 0u8;
            for yy in y0..=y1 {
                max_val = max_val.max(rows[yy * width + x]);
            }
            out[y * width + x] = max_val;
        }
    }

    out
}
