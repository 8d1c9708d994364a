//! Image source: decoding encoded bytes into an [`crate::Image`].
//!
//! Supports JPEG, PNG, BMP and TIFF through the `image` crate. Callers own
//! all file access and hand over the bytes; nothing here touches the file
//! system.
//!
//! Single-channel sources become grayscale images; every other layout is
//! converted to 8-bit RGB (alpha is dropped).
//!
//! # Examples
//!
//! ```ignore
//! use imagelab_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod reader;
mod types;

pub use reader::{decode_image, detect_format};
pub use types::{DecodeError, SupportedFormat};
