//! The transform engine entry point.
//!
//! `apply` is stateless: it resolves parameters, dispatches to exactly one
//! handler and returns a freshly built result. Nothing is cached between
//! calls, so independent calls may run on different threads.

use crate::adjustments::{apply_brightness_contrast, apply_negative, BrightnessContrast};
use crate::edges::apply_edge_detection;
use crate::error::EngineError;
use crate::histogram::compute_histogram;
use crate::luminance::to_grayscale;
use crate::mask::apply_logical;
use crate::morphology::apply_dilation;
use crate::operation::{Operation, Transform};
use crate::params::ParameterSet;
use crate::raster::Image;
use crate::threshold::apply_threshold;
use crate::transform::apply_orientation;
use crate::Output;

/// Apply `operation` with `params` to `image`.
///
/// # Errors
///
/// - `EngineError::InvalidInput` when `image` is `None` or malformed
/// - `EngineError::InvalidParameter` when `params` does not fit the
///   operation's schema (out-of-range numbers are clamped, not rejected)
///
/// The input image is never modified.
pub fn apply(
    image: Option<&Image>,
    operation: Operation,
    params: &ParameterSet,
) -> Result<Output, EngineError> {
    let image = image.ok_or_else(|| EngineError::InvalidInput("no image loaded".to_string()))?;
    let transform = Transform::resolve(operation, params)?;
    transform.apply(image)
}

impl Transform {
    /// Run this transform on `image`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` if `image` violates its shape
    /// invariants.
    ///
    /// Numeric fields outside their parameter's domain are clamped first,
    /// exactly as [`Transform::resolve`] would have.
    pub fn apply(&self, image: &Image) -> Result<Output, EngineError> {
        image.validate()?;
        let transform = self.clamped();

        log::debug!(
            "applying {:?} to {}x{} {:?} image",
            transform,
            image.width(),
            image.height(),
            image.channels()
        );

        let output = match transform {
            Transform::Grayscale => Output::Image(to_grayscale(image)),
            Transform::Threshold { threshold } => Output::Image(apply_threshold(image, threshold)),
            Transform::BrightnessContrast {
                brightness,
                contrast,
            } => Output::Image(apply_brightness_contrast(
                image,
                BrightnessContrast::new(brightness, contrast),
            )),
            Transform::Logical { op } => Output::Image(apply_logical(image, op)),
            Transform::Histogram => Output::Histogram(Box::new(compute_histogram(image))),
            Transform::Dilation {
                kernel_size,
                iterations,
            } => Output::Image(apply_dilation(image, kernel_size, iterations)),
            Transform::EdgeDetection(method) => Output::Image(apply_edge_detection(image, method)),
            Transform::RotateFlip(orientation) => Output::Image(apply_orientation(image, orientation)),
            Transform::Negative => Output::Image(apply_negative(image)),
        };

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Channels;
    use crate::transform::Orientation;

    fn rgb_2x2() -> Image {
        Image::rgb(
            2,
            2,
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255],
        )
        .unwrap()
    }

    fn image_of(output: Output) -> Image {
        match output {
            Output::Image(img) => img,
            Output::Histogram(_) => panic!("expected an image"),
        }
    }

    #[test]
    fn test_absent_image_is_invalid_input() {
        for op in Operation::ALL {
            let err = apply(None, op, &ParameterSet::new()).unwrap_err();
            assert_eq!(err, EngineError::InvalidInput("no image loaded".to_string()));
        }
    }

    #[test]
    fn test_grayscale_scenario() {
        let out = image_of(apply(Some(&rgb_2x2()), Operation::Grayscale, &ParameterSet::new()).unwrap());
        assert_eq!(out.channels(), Channels::Gray);
        assert_eq!(out.pixels(), &[76, 150, 29, 255]);
    }

    #[test]
    fn test_threshold_scenario() {
        let img = Image::gray(4, 4, vec![100; 16]).unwrap();

        let params = ParameterSet::new().with("threshold", 128);
        let out = image_of(apply(Some(&img), Operation::Threshold, &params).unwrap());
        assert_eq!(out.pixels(), &[0u8; 16]);

        let params = ParameterSet::new().with("threshold", 50);
        let out = image_of(apply(Some(&img), Operation::Threshold, &params).unwrap());
        assert_eq!(out.pixels(), &[255u8; 16]);
    }

    #[test]
    fn test_input_not_mutated() {
        let img = rgb_2x2();
        let before = img.clone();
        for op in Operation::ALL {
            let _ = apply(Some(&img), op, &ParameterSet::new()).unwrap();
        }
        assert_eq!(img, before);
    }

    #[test]
    fn test_histogram_output() {
        let out = apply(Some(&rgb_2x2()), Operation::Histogram, &ParameterSet::new()).unwrap();
        let hist = out.as_histogram().unwrap();
        assert_eq!(hist.red[255], 2);
        assert_eq!(hist.luminance[255], 1);
        assert!(out.as_image().is_none());
    }

    #[test]
    fn test_rotation_keeps_color() {
        let img = Image::rgb(3, 1, vec![0; 9]).unwrap();
        let params = ParameterSet::new().with("transform", "Rotate270");
        let out = image_of(apply(Some(&img), Operation::RotateFlip, &params).unwrap());
        assert_eq!(out.channels(), Channels::Rgb);
        assert_eq!(out.dimensions(), (1, 3));
    }

    #[test]
    fn test_brightness_contrast_keeps_color() {
        let params = ParameterSet::new().with("brightness", 10).with("contrast", 1.0);
        let out = image_of(apply(Some(&rgb_2x2()), Operation::BrightnessContrast, &params).unwrap());
        assert_eq!(out.channels(), Channels::Rgb);
        assert_eq!(out.pixel(0, 0), Some(&[255u8, 10, 10][..]));
    }

    #[test]
    fn test_grayscale_based_ops_return_gray() {
        let img = rgb_2x2();
        for op in [
            Operation::Threshold,
            Operation::Logical,
            Operation::Dilation,
            Operation::EdgeDetection,
        ] {
            let out = image_of(apply(Some(&img), op, &ParameterSet::new()).unwrap());
            assert!(out.is_gray(), "{} should produce a gray image", op);
        }
    }

    #[test]
    fn test_edge_sobel_via_params() {
        let params = ParameterSet::new().with("method", "sobel");
        let img = Image::gray(5, 5, vec![42; 25]).unwrap();
        let out = image_of(apply(Some(&img), Operation::EdgeDetection, &params).unwrap());
        assert!(out.pixels().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_invalid_parameter_propagates() {
        let params = ParameterSet::new().with("operation", "NAND");
        let err = apply(Some(&rgb_2x2()), Operation::Logical, &params).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }

    #[test]
    fn test_concurrent_calls_on_independent_inputs() {
        let images: Vec<Image> = (0..4u8)
            .map(|i| Image::gray(8, 8, vec![i * 40; 64]).unwrap())
            .collect();

        std::thread::scope(|s| {
            let handles: Vec<_> = images
                .iter()
                .map(|img| s.spawn(move || apply(Some(img), Operation::Negative, &ParameterSet::new())))
                .collect();

            for (img, handle) in images.iter().zip(handles) {
                let out = handle.join().unwrap().unwrap().into_image().unwrap();
                assert_eq!(out.pixels()[0], 255 - img.pixels()[0]);
            }
        });
    }

    #[test]
    fn test_typed_path_matches_apply() {
        let img = rgb_2x2();
        let params = ParameterSet::new().with("transform", "FlipVertical");
        let via_apply = apply(Some(&img), Operation::RotateFlip, &params).unwrap();
        let via_transform = Transform::RotateFlip(Orientation::FlipVertical)
            .apply(&img)
            .unwrap();
        assert_eq!(via_apply, via_transform);
    }

    #[test]
    fn test_typed_path_clamps_out_of_range_fields() {
        let mut pixels = vec![0u8; 41 * 41];
        pixels[20 * 41 + 20] = 255;
        let dot = Image::gray(41, 41, pixels).unwrap();

        let dilate = |kernel_size, iterations| {
            Transform::Dilation {
                kernel_size,
                iterations,
            }
            .apply(&dot)
            .unwrap()
        };
        assert_eq!(dilate(3, 15), dilate(3, 10));
        assert_eq!(dilate(31, 1), dilate(15, 1));
        let lit = dilate(3, 15)
            .into_image()
            .unwrap()
            .pixels()
            .iter()
            .filter(|&&v| v == 255)
            .count();
        assert_eq!(lit, 21 * 21);

        let img = rgb_2x2();
        let wild = Transform::BrightnessContrast {
            brightness: 500,
            contrast: 50.0,
        };
        let capped = Transform::BrightnessContrast {
            brightness: 100,
            contrast: 3.0,
        };
        assert_eq!(wild.apply(&img).unwrap(), capped.apply(&img).unwrap());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
