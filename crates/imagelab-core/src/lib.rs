//! ImageLab Core - Image transform engine
//!
//! This crate maps a source image, an operation identifier and a parameter
//! set to a new image (or, for the histogram, a statistical summary):
//! grayscale, binary threshold, brightness/contrast, logical masking,
//! dilation, edge detection, rotation/flip and negative.
//!
//! # Usage
//!
//! ```ignore
//! use imagelab_core::{apply, decode::decode_image, Operation, ParameterSet};
//!
//! let image = decode_image(&std::fs::read("photo.jpg")?)?;
//! let params = ParameterSet::new().with("threshold", 90);
//! let output = apply(Some(&image), Operation::Threshold, &params)?;
//! ```
//!
//! The engine holds no state between calls and never modifies its input.

pub mod adjustments;
pub mod decode;
pub mod edges;
pub mod engine;
pub mod error;
pub mod histogram;
pub mod luminance;
pub mod mask;
pub mod morphology;
pub mod operation;
pub mod params;
pub mod raster;
pub mod threshold;
pub mod transform;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

pub use engine::apply;
pub use error::EngineError;
pub use operation::{Operation, Transform};
pub use params::{schema, ParamKind, ParamSpec, ParamValue, ParameterSet};
pub use raster::{Channels, Image};

/// Histogram data for an image.
///
/// For a grayscale source all four channels hold the same counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramSummary {
    /// Channel layout of the image the counts were taken from
    pub source: Channels,
    /// Red channel histogram (256 bins)
    pub red: [u32; 256],
    /// Green channel histogram (256 bins)
    pub green: [u32; 256],
    /// Blue channel histogram (256 bins)
    pub blue: [u32; 256],
    /// Luma histogram of the grayscale derivation (256 bins)
    pub luminance: [u32; 256],
}

impl HistogramSummary {
    /// Create a new empty histogram
    pub fn new(source: Channels) -> Self {
        Self {
            source,
            red: [0; 256],
            green: [0; 256],
            blue: [0; 256],
            luminance: [0; 256],
        }
    }

    /// Find the maximum value across all channels for normalization
    pub fn max_value(&self) -> u32 {
        [&self.red, &self.green, &self.blue, &self.luminance]
            .iter()
            .flat_map(|bins| bins.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// Sum of each channel's bins as `[red, green, blue, luminance]`.
    pub fn totals(&self) -> [u64; 4] {
        let sum = |bins: &[u32; 256]| bins.iter().map(|&c| c as u64).sum::<u64>();
        [
            sum(&self.red),
            sum(&self.green),
            sum(&self.blue),
            sum(&self.luminance),
        ]
    }

    /// Check for highlight clipping (values at 255)
    pub fn has_highlight_clipping(&self) -> bool {
        self.red[255] > 0 || self.green[255] > 0 || self.blue[255] > 0
    }

    /// Check for shadow clipping (values at 0)
    pub fn has_shadow_clipping(&self) -> bool {
        self.red[0] > 0 || self.green[0] > 0 || self.blue[0] > 0
    }
}

// serde only derives arrays up to 32 elements, so the bins go out as slices.
impl Serialize for HistogramSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("HistogramSummary", 5)?;
        state.serialize_field("source", &self.source)?;
        state.serialize_field("red", &self.red[..])?;
        state.serialize_field("green", &self.green[..])?;
        state.serialize_field("blue", &self.blue[..])?;
        state.serialize_field("luminance", &self.luminance[..])?;
        state.end()
    }
}

/// Result of an engine call: an image to display, or a histogram to chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Image(Image),
    Histogram(Box<HistogramSummary>),
}

impl Output {
    pub fn as_image(&self) -> Option<&Image> {
        match self {
            Output::Image(img) => Some(img),
            Output::Histogram(_) => None,
        }
    }

    pub fn as_histogram(&self) -> Option<&HistogramSummary> {
        match self {
            Output::Histogram(hist) => Some(hist.as_ref()),
            Output::Image(_) => None,
        }
    }

    pub fn into_image(self) -> Option<Image> {
        match self {
            Output::Image(img) => Some(img),
            Output::Histogram(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_clipping() {
        let mut hist = HistogramSummary::new(Channels::Rgb);
        assert!(!hist.has_highlight_clipping());
        assert!(!hist.has_shadow_clipping());

        hist.red[255] = 100;
        assert!(hist.has_highlight_clipping());

        hist.blue[0] = 50;
        assert!(hist.has_shadow_clipping());
    }

    #[test]
    fn test_histogram_max_and_totals() {
        let mut hist = HistogramSummary::new(Channels::Gray);
        hist.luminance[3] = 7;
        hist.green[9] = 2;
        assert_eq!(hist.max_value(), 7);
        assert_eq!(hist.totals(), [0, 2, 0, 7]);
    }

    #[test]
    fn test_histogram_serializes_bins() {
        let mut hist = HistogramSummary::new(Channels::Rgb);
        hist.red[1] = 4;
        let json = serde_json::to_value(&hist).unwrap();
        assert_eq!(json["source"], "Rgb");
        assert_eq!(json["red"].as_array().unwrap().len(), 256);
        assert_eq!(json["red"][1], 4);
    }

    #[test]
    fn test_output_accessors() {
        let img = Image::gray(1, 1, vec![3]).unwrap();
        let out = Output::Image(img.clone());
        assert_eq!(out.as_image(), Some(&img));
        assert!(out.as_histogram().is_none());
        assert_eq!(out.into_image(), Some(img));

        let out = Output::Histogram(Box::new(HistogramSummary::new(Channels::Gray)));
        assert!(out.as_image().is_none());
        assert!(out.into_image().is_none());
    }
}
