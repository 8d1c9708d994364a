use super::{sobel_gradients, BorderMode, CannyThresholds};
use crate::raster::{Channels, Image};

const STRONG: u8 = 255;
const WEAK: u8 = 1;

/// tan(22.5°), used to bucket gradient directions without `atan2`.
const TAN_22_5: f32 = 0.414_213_57;

/// Canny edge detector on a grayscale image.
///
/// Magnitudes are the L1 norm `|gx| + |gy|`. A pixel that survives
/// non-maximum suppression is an edge if its magnitude exceeds `high`, or if
/// it exceeds `low` and is 8-connected to an edge.
pub fn canny(gray: &Image, thresholds: CannyThresholds) -> Image {
    debug_assert!(gray.is_gray());
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    let (gx, gy) = sobel_gradients(gray.pixels(), width, height, BorderMode::Replicate);

    let magnitude: Vec<i32> = gx
        .iter()
        .zip(gy.iter())
        .map(|(&dx, &dy)| dx.abs() + dy.abs())
        .collect();

    let state = non_max_suppression(width, height, &magnitude, &gx, &gy, thresholds);
    let pixels = hysteresis(width, height, state);

    Image::from_parts(gray.width(), gray.height(), Channels::Gray, pixels)
}

/// Quantize a gradient into one of four directions:
/// 0 = horizontal, 1 = diagonal "\", 2 = vertical, 3 = diagonal "/".
#[inline]
fn direction(dx: i32, dy: i32) -> u8 {
    let ax = dx.abs() as f32;
    let ay = dy.abs() as f32;
    if ay <= ax * TAN_22_5 {
        0
    } else if ax <= ay * TAN_22_5 {
        2
    } else if (dx > 0) == (dy > 0) {
        1
    } else {
        3
    }
}

/// Thin ridges and classify the survivors as strong or weak candidates.
///
/// Of two equal neighbours along the gradient only the first one in scan
/// order is kept, so plateaus do not produce double-width edges.
fn non_max_suppression(
    width: usize,
    height: usize,
    magnitude: &[i32],
    gx: &[i32],
    gy: &[i32],
    thresholds: CannyThresholds,
) -> Vec<u8> {
    let low = thresholds.low() as i32;
    let high = thresholds.high() as i32;
    let mut state = vec![0u8; width * height];

    let mag_at = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            magnitude[y as usize * width + x as usize]
        }
    };

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let m = magnitude[idx];
            if m <= low {
                continue;
            }

            let (xi, yi) = (x as isize, y as isize);
            let (before, after) = match direction(gx[idx], gy[idx]) {
                0 => (mag_at(xi - 1, yi), mag_at(xi + 1, yi)),
                1 => (mag_at(xi - 1, yi - 1), mag_at(xi + 1, yi + 1)),
                2 => (mag_at(xi, yi - 1), mag_at(xi, yi + 1)),
                _ => (mag_at(xi + 1, yi - 1), mag_at(xi - 1, yi + 1)),
            };

            if m > before && m >= after {
                state[idx] = if m > high { STRONG } else { WEAK };
            }
        }
    }

    state
}

/// Promote weak candidates connected to strong edges; drop the rest.
fn hysteresis(width: usize, height: usize, mut state: Vec<u8>) -> Vec<u8> {
    let mut stack: Vec<(usize, usize)> = state
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s == STRONG)
        .map(|(i, _)| (i % width, i / width))
        .collect();

    while let Some((x, y)) = stack.pop() {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(height - 1);
        let x0 = x.saturating_sub(1);
        let x1 = (x + 1).min(width - 1);
        for ny in y0..=y1 {
            for nx in x0..=x1 {
                let nidx = ny * width + nx;
                if state[nidx] == WEAK {
                    state[nidx] = STRONG;
                    stack.push((nx, ny));
                }
            }
        }
    }

    for s in state.iter_mut() {
        if *s != STRONG {
            *s = 0;
        }
    }
    state
}
