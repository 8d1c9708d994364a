//! Bitwise combination of the grayscale image with the circle mask.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CircleMask;
use crate::luminance::to_grayscale;
use crate::params::normalize_label;
use crate::raster::{Channels, Image};

/// Bitwise operator applied between image and mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogicOp {
    #[default]
    And,
    Or,
    Xor,
    /// Inverts the image; the mask is not consulted.
    Not,
}

impl LogicOp {
    #[inline]
    fn combine(self, sample: u8, mask: u8) -> u8 {
        match self {
            LogicOp::And => sample & mask,
            LogicOp::Or => sample | mask,
            LogicOp::Xor => sample ^ mask,
            LogicOp::Not => !sample,
        }
    }
}

impl fmt::Display for LogicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogicOp::And => "AND",
            LogicOp::Or => "OR",
            LogicOp::Xor => "XOR",
            LogicOp::Not => "NOT",
        })
    }
}

impl FromStr for LogicOp {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "and" => Ok(LogicOp::And),
            "or" => Ok(LogicOp::Or),
            "xor" => Ok(LogicOp::Xor),
            "not" => Ok(LogicOp::Not),
            _ => Err(()),
        }
    }
}

/// Convert to grayscale and combine with the centered circle mask.
pub fn apply_logical(image: &Image, op: LogicOp) -> Image {
    let gray = to_grayscale(image);
    let (width, height) = gray.dimensions();

    let pixels = if op == LogicOp::Not {
        gray.pixels().iter().map(|&v| !v).collect()
    } else {
        let mask = CircleMask::centered(width, height).render(width, height);
        gray.pixels()
            .iter()
            .zip(mask.iter())
            .map(|(&v, &m)| op.combine(v, m))
            .collect()
    };

    Image::from_parts(width, height, Channels::Gray, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: u32, height: u32, value: u8) -> Image {
        Image::gray(width, height, vec![value; (width * height) as usize]).unwrap()
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("and".parse::<LogicOp>(), Ok(LogicOp::And));
        assert_eq!("Xor".parse::<LogicOp>(), Ok(LogicOp::Xor));
        assert!("NAND".parse::<LogicOp>().is_err());
    }

    #[test]
    fn test_and_keeps_only_disc() {
        let img = uniform(9, 9, 200);
        let out = apply_logical(&img, LogicOp::And);
        // radius 3 around (4, 4)
        assert_eq!(out.pixel(4, 4), Some(&[200u8][..]));
        assert_eq!(out.pixel(0, 0), Some(&[0u8][..]));
    }

    #[test]
    fn test_or_saturates_disc() {
        let img = uniform(9, 9, 10);
        let out = apply_logical(&img, LogicOp::Or);
        assert_eq!(out.pixel(4, 4), Some(&[255u8][..]));
        assert_eq!(out.pixel(8, 8), Some(&[10u8][..]));
    }

    #[test]
    fn test_xor_inverts_disc_only() {
        let img = uniform(9, 9, 0x0F);
        let out = apply_logical(&img, LogicOp::Xor);
        assert_eq!(out.pixel(4, 4), Some(&[0xF0u8][..]));
        assert_eq!(out.pixel(0, 8), Some(&[0x0Fu8][..]));
    }

    #[test]
    fn test_not_ignores_mask() {
        let img = uniform(9, 9, 55);
        let out = apply_logical(&img, LogicOp::Not);
        assert!(out.pixels().iter().all(|&v| v == 200));
    }

    #[test]
    fn test_color_input_becomes_gray() {
        let img = Image::rgb(3, 3, vec![255; 27]).unwrap();
        let out = apply_logical(&img, LogicOp::And);
        assert!(out.is_gray());
        assert_eq!(out.dimensions(), (3, 3));
    }
}
