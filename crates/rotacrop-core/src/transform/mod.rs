//! Image transformation operations: rotation, cropping and compositing.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Crop rectangles are in pixels, half-open on the right and bottom
//! - Origin is top-left corner

mod composite;
mod crop;
mod rotation;

pub use composite::flatten;
pub use crop::{crop, CropError};
pub use rotation::{compute_rotated_bounds, rotate, Interpolation, RotateOptions};
