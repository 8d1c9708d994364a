//! Quarter-turn rotation and flips via `image::imageops`.

use std::fmt;
use std::str::FromStr;

use image::imageops;
use serde::{Deserialize, Serialize};

use crate::params::normalize_label;
use crate::raster::{Channels, Image};

/// A lossless orientation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Rotate 90 degrees clockwise.
    #[default]
    Rotate90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise (90 counter-clockwise).
    Rotate270,
    /// Mirror left-right.
    FlipHorizontal,
    /// Mirror top-bottom.
    FlipVertical,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Orientation::Rotate90 | Orientation::Rotate270)
    }

    /// The orientation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Orientation::Rotate90 => Orientation::Rotate270,
            Orientation::Rotate270 => Orientation::Rotate90,
            other => other,
        }
    }

    /// Output `(width, height)` for an input of the given size.
    pub fn output_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Orientation::Rotate90 => "Rotate90",
            Orientation::Rotate180 => "Rotate180",
            Orientation::Rotate270 => "Rotate270",
            Orientation::FlipHorizontal => "FlipHorizontal",
            Orientation::FlipVertical => "FlipVertical",
        })
    }
}

impl FromStr for Orientation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "rotate90" | "rotate90°" | "rotation90°" => Ok(Orientation::Rotate90),
            "rotate180" | "rotate180°" | "rotation180°" => Ok(Orientation::Rotate180),
            "rotate270" | "rotate270°" | "rotation270°" => Ok(Orientation::Rotate270),
            "fliphorizontal" | "fliph" => Ok(Orientation::FlipHorizontal),
            "flipvertical" | "flipv" => Ok(Orientation::FlipVertical),
            _ => Err(()),
        }
    }
}

/// Apply an orientation change, keeping the channel layout.
pub fn apply_orientation(image: &Image, orientation: Orientation) -> Image {
    let (width, height) = orientation.output_dimensions(image.width(), image.height());
    let pixels = match image.channels() {
        Channels::Gray => {
            let buf = image::GrayImage::from_raw(image.width(), image.height(), image.pixels().to_vec());
            buf.map(|b| orient_buffer(&b, orientation).into_raw())
        }
        Channels::Rgb => {
            let buf = image::RgbImage::from_raw(image.width(), image.height(), image.pixels().to_vec());
            buf.map(|b| orient_buffer(&b, orientation).into_raw())
        }
    };

    match pixels {
        Some(pixels) => Image::from_parts(width, height, image.channels(), pixels),
        // Unreachable for a validated image: the buffer length always matches.
        None => image.clone(),
    }
}

fn orient_buffer<P>(
    buf: &image::ImageBuffer<P, Vec<u8>>,
    orientation: Orientation,
) -> image::ImageBuffer<P, Vec<u8>>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    match orientation {
        Orientation::Rotate90 => imageops::rotate90(buf),
        Orientation::Rotate180 => imageops::rotate180(buf),
        Orientation::Rotate270 => imageops::rotate270(buf),
        Orientation::FlipHorizontal => imageops::flip_horizontal(buf),
        Orientation::FlipVertical => imageops::flip_vertical(buf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x2 RGB image, each pixel tagged with its index in all channels.
    fn tagged_rgb() -> Image {
        let mut pixels = Vec::new();
        for i in 0..6u8 {
            pixels.extend_from_slice(&[i, i, i]);
        }
        Image::rgb(3, 2, pixels).unwrap()
    }

    fn tags(img: &Image) -> Vec<u8> {
        img.pixels().chunks_exact(3).map(|p| p[0]).collect()
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Rotate90".parse::<Orientation>(), Ok(Orientation::Rotate90));
        assert_eq!("flip-horizontal".parse::<Orientation>(), Ok(Orientation::FlipHorizontal));
        assert_eq!("Flip Vertical".parse::<Orientation>(), Ok(Orientation::FlipVertical));
        assert!("Rotate45".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for o in [
            Orientation::Rotate90,
            Orientation::Rotate180,
            Orientation::Rotate270,
            Orientation::FlipHorizontal,
            Orientation::FlipVertical,
        ] {
            assert_eq!(o.to_string().parse::<Orientation>(), Ok(o));
        }
    }

    #[test]
    fn test_swaps_dimensions() {
        assert!(Orientation::Rotate90.swaps_dimensions());
        assert!(Orientation::Rotate270.swaps_dimensions());
        assert!(!Orientation::Rotate180.swaps_dimensions());
        assert!(!Orientation::FlipHorizontal.swaps_dimensions());
        assert!(!Orientation::FlipVertical.swaps_dimensions());
    }

    #[test]
    fn test_rotate90_clockwise() {
        // 0 1 2        3 0
        // 3 4 5   ->   4 1
        //              5 2
        let out = apply_orientation(&tagged_rgb(), Orientation::Rotate90);
        assert_eq!(out.dimensions(), (2, 3));
        assert_eq!(tags(&out), vec![3, 0, 4, 1, 5, 2]);
    }

    #[test]
    fn test_rotate270_counter_clockwise() {
        let out = apply_orientation(&tagged_rgb(), Orientation::Rotate270);
        assert_eq!(out.dimensions(), (2, 3));
        assert_eq!(tags(&out), vec![2, 5, 1, 4, 0, 3]);
    }

    #[test]
    fn test_rotate180() {
        let out = apply_orientation(&tagged_rgb(), Orientation::Rotate180);
        assert_eq!(out.dimensions(), (3, 2));
        assert_eq!(tags(&out), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_flips() {
        let h = apply_orientation(&tagged_rgb(), Orientation::FlipHorizontal);
        assert_eq!(tags(&h), vec![2, 1, 0, 5, 4, 3]);

        let v = apply_orientation(&tagged_rgb(), Orientation::FlipVertical);
        assert_eq!(tags(&v), vec![3, 4, 5, 0, 1, 2]);
    }

    #[test]
    fn test_gray_layout_preserved() {
        let img = Image::gray(3, 1, vec![1, 2, 3]).unwrap();
        let out = apply_orientation(&img, Orientation::Rotate90);
        assert!(out.is_gray());
        assert_eq!(out.dimensions(), (1, 3));
        assert_eq!(out.pixels(), &[1, 2, 3]);
    }

    #[test]
    fn test_inverse_restores() {
        let img = tagged_rgb();
        for o in [Orientation::Rotate90, Orientation::Rotate270, Orientation::FlipVertical] {
            let there = apply_orientation(&img, o);
            assert_eq!(apply_orientation(&there, o.inverse()), img);
        }
    }
}
