//! Image decoding for the rotate filter.
//!
//! Source images are decoded to RGBA so that the alpha channel survives
//! rotation. JPEG and PNG are supported; EXIF orientation is applied on
//! decode.
//!
//! # Examples
//!
//! ```ignore
//! use rotacrop_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let raster = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", raster.width, raster.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, get_orientation};
pub use types::{DecodeError, Orientation, Raster};
