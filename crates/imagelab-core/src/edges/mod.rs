//! Edge detection on the grayscale image.
//!
//! Two detectors share the same 3×3 Sobel gradients:
//! - **Sobel**: gradient magnitude `sqrt(gx² + gy²)`, truncated and saturated
//!   to 8 bits, reflect-101 border
//! - **Canny**: L1 gradient magnitude, non-maximum suppression and
//!   hysteresis between two thresholds, replicated border, output 0/255

mod canny;
mod sobel;

pub use canny::canny;
pub use sobel::sobel_magnitude;

use crate::luminance::to_grayscale;
use crate::raster::Image;

/// Ordered pair of Canny hysteresis thresholds (`low <= high`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannyThresholds {
    low: u16,
    high: u16,
}

impl CannyThresholds {
    /// Build an ordered pair, swapping the values if they arrive reversed.
    pub fn new(threshold1: u16, threshold2: u16) -> Self {
        if threshold1 > threshold2 {
            log::debug!(
                "canny thresholds reversed ({} > {}), swapping",
                threshold1,
                threshold2
            );
            Self {
                low: threshold2,
                high: threshold1,
            }
        } else {
            Self {
                low: threshold1,
                high: threshold2,
            }
        }
    }

    pub fn low(&self) -> u16 {
        self.low
    }

    pub fn high(&self) -> u16 {
        self.high
    }
}

/// Edge detector selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMethod {
    Canny(CannyThresholds),
    Sobel,
}

impl EdgeMethod {
    pub fn canny(threshold1: u16, threshold2: u16) -> Self {
        EdgeMethod::Canny(CannyThresholds::new(threshold1, threshold2))
    }
}

impl Default for EdgeMethod {
    fn default() -> Self {
        EdgeMethod::canny(100, 200)
    }
}

/// Convert to grayscale and run the selected detector.
pub fn apply_edge_detection(image: &Image, method: EdgeMethod) -> Image {
    let gray = to_grayscale(image);
    match method {
        EdgeMethod::Canny(thresholds) => canny(&gray, thresholds),
        EdgeMethod::Sobel => sobel_magnitude(&gray),
    }
}

/// Border extrapolation for out-of-range sample coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BorderMode {
    /// `aaa|abcd|ddd`
    Replicate,
    /// `dcb|abcd|cba`
    Reflect101,
}

impl BorderMode {
    /// Map a possibly out-of-range coordinate into `0..len`.
    #[inline]
    pub(crate) fn index(self, i: isize, len: usize) -> usize {
        let n = len as isize;
        if (0..n).contains(&i) {
            return i as usize;
        }
        match self {
            BorderMode::Replicate => i.clamp(0, n - 1) as usize,
            BorderMode::Reflect101 => {
                if n == 1 {
                    return 0;
                }
                let reflected = if i < 0 { -i } else { 2 * n - 2 - i };
                reflected.clamp(0, n - 1) as usize
            }
        }
    }
}

/// 3×3 Sobel derivatives of a single-channel buffer.
///
/// Returns `(gx, gy)` with `gx` positive for intensity increasing to the
/// right and `gy` positive for intensity increasing downward.
pub(crate) fn sobel_gradients(
    src: &[u8],
    width: usize,
    height: usize,
    border: BorderMode,
) -> (Vec<i32>, Vec<i32>) {
    let mut gx = vec![0i32; width * height];
    let mut gy = vec![0i32; width * height];

    let at = |x: isize, y: isize| -> i32 {
        let xi = border.index(x, width);
        let yi = border.index(y, height);
        src[yi * width + xi] as i32
    };

    for y in 0..height as isize {
        for x in 0..width as isize {
            let p00 = at(x - 1, y - 1);
            let p01 = at(x, y - 1);
            let p02 = at(x + 1, y - 1);
            let p10 = at(x - 1, y);
            let p12 = at(x + 1, y);
            let p20 = at(x - 1, y + 1);
            let p21 = at(x, y + 1);
            let p22 = at(x + 1, y + 1);

            let idx = y as usize * width + x as usize;
            gx[idx] = -p00 + p02 - 2 * p10 + 2 * p12 - p20 + p22;
            gy[idx] = -p00 - 2 * p01 - p02 + p20 + 2 * p21 + p22;
        }
    }

    (gx, gy)
}
