//! Rotacrop Core - rotate images without leaving transparent corners
//!
//! This crate provides the image side of the rotate filter: decoding,
//! arbitrary-angle rotation, the inscribed opaque rectangle scan, cropping,
//! background compositing and encoding.

pub mod color;
pub mod decode;
pub mod encode;
pub mod filter;
pub mod inscribed;
pub mod opacity;
pub mod transform;

pub use color::{parse_color, ColorError, Rgb};
pub use decode::{decode_image, DecodeError, Raster};
pub use encode::{encode_jpeg, encode_png, EncodeError};
pub use filter::{rotate_filter, CropFallback, CropOutcome, FilterError, RotateOutcome, RotateParams};
pub use inscribed::{find_inscribed_rect, InscribeError, Rect};
pub use opacity::OpacityMask;
pub use transform::{compute_rotated_bounds, crop, flatten, rotate, Interpolation, RotateOptions};
