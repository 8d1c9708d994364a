//! Geometric transforms: quarter-turn rotations and mirror flips.
//!
//! These are lossless pixel permutations. They operate on the original image
//! (no grayscale conversion) and preserve the channel layout.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - `Rotate90` turns the picture clockwise, `Rotate270` counter-clockwise

mod orientation;

pub use orientation::{apply_orientation, Orientation};
