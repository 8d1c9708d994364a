//! Circular masks and bitwise logical operations.
//!
//! ## Mask
//!
//! The logical operation combines the grayscale image with a filled disc
//! centered on the image: 255 inside, 0 outside. The radius is one third of
//! the smaller image dimension (integer division).
//!
//! ## Operations
//!
//! `AND`, `OR` and `XOR` combine image and mask sample-wise; `NOT` inverts the
//! grayscale image and ignores the mask.

pub mod circle;
pub mod logical;

pub use circle::CircleMask;
pub use logical::{apply_logical, LogicOp};
