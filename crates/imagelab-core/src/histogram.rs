//! Histogram computation from image samples.
//!
//! Produces the per-channel RGB counts and the luma counts that the chart
//! collaborator plots. The engine never renders the chart itself.

use crate::luminance::calculate_luma_u8;
use crate::raster::{Channels, Image};
use crate::HistogramSummary;

/// Compute RGB and luma histograms of an image.
///
/// For an RGB image each color plane is counted separately and the luma
/// channel counts the BT.601 grayscale derivation. For a grayscale image all
/// four channels hold the same counts.
///
/// # Performance
/// Single pass, O(n) in the number of pixels; the bins take a constant 4KB.
pub fn compute_histogram(image: &Image) -> HistogramSummary {
    let mut hist = HistogramSummary::new(image.channels());

    match image.channels() {
        Channels::Rgb => {
            for chunk in image.pixels().chunks_exact(3) {
                hist.red[chunk[0] as usize] += 1;
                hist.green[chunk[1] as usize] += 1;
                hist.blue[chunk[2] as usize] += 1;

                let lum = calculate_luma_u8(chunk[0], chunk[1], chunk[2]);
                hist.luminance[lum as usize] += 1;
            }
        }
        Channels::Gray => {
            for &v in image.pixels() {
                hist.luminance[v as usize] += 1;
            }
            hist.red = hist.luminance;
            hist.green = hist.luminance;
            hist.blue = hist.luminance;
        }
    }

    hist
}
