//! Filled circle mask.

use serde::{Deserialize, Serialize};

/// A filled disc in pixel coordinates.
///
/// A pixel `(x, y)` is inside when `(x - cx)² + (y - cy)² <= radius²`, so a
/// zero radius still covers the center pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircleMask {
    pub center_x: u32,
    pub center_y: u32,
    pub radius: u32,
}

impl CircleMask {
    pub fn new(center_x: u32, center_y: u32, radius: u32) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    /// The disc used by the logical operation for a `width` × `height` image.
    pub fn centered(width: u32, height: u32) -> Self {
        Self::new(width / 2, height / 2, width.min(height) / 3)
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        let dx = x as i64 - self.center_x as i64;
        let dy = y as i64 - self.center_y as i64;
        let r = self.radius as i64;
        dx * dx + dy * dy <= r * r
    }

    /// Rasterize the mask: 255 inside the disc, 0 elsewhere.
    pub fn render(&self, width: u32, height: u32) -> Vec<u8> {
        let mut out = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                out.push(if self.contains(x, y) { 255 } else { 0 });
            }
        }
        out
    }
}
