//! Image rotation onto a transparent canvas.
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source pixel(s) contribute to it and interpolate
//! their values. Coordinates are taken at pixel centers.
//!
//! For rotation by angle θ, the inverse transform is:
//! ```text
//! src_x = (dst_x - cx) * cos(-θ) - (dst_y - cy) * sin(-θ) + src_cx
//! src_y = (dst_x - cx) * sin(-θ) + (dst_y - cy) * cos(-θ) + src_cy
//! ```
//!
//! Output pixels with no source coverage are `(0, 0, 0, 0)`. Kernel taps
//! that fall outside the source contribute zero alpha, so the rotated edge
//! comes out anti-aliased with alpha below 255.

use image::{imageops, ImageBuffer, Rgba};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::Raster;

/// Angles this close to a multiple of 90 degrees are treated as exact
/// quarter turns.
const RIGHT_ANGLE_TOLERANCE: f64 = 0.001;

/// Resampling filter used when the angle is not a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Nearest source pixel. Hard, aliased edges.
    Nearest,
    /// 2x2 bilinear.
    Bilinear,
    /// 4x4 Catmull-Rom cubic.
    #[default]
    Bicubic,
}

/// How to rotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateOptions {
    /// Grow the canvas to the rotated bounding box. When false the canvas
    /// keeps the source size and the rotated corners are clipped.
    pub expand: bool,
    /// Resampling filter.
    pub interpolation: Interpolation,
}

/// Number of counter-clockwise quarter turns (0-3) if the angle is a
/// multiple of 90 degrees.
fn quarter_turns(angle_degrees: f64) -> Option<u32> {
    let turns = angle_degrees / 90.0;
    let nearest = turns.round();
    if ((turns - nearest) * 90.0).abs() < RIGHT_ANGLE_TOLERANCE {
        Some(nearest.rem_euclid(4.0) as u32)
    } else {
        None
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// # Arguments
///
/// * `width` - Original image width
/// * `height` - Original image height
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
///
/// # Returns
///
/// Tuple of (new_width, new_height), never smaller than 1x1.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image about its center.
///
/// Positive angles rotate counter-clockwise. Quarter turns are exact pixel
/// permutations and never introduce transparency; any other angle leaves
/// transparent corners that [`crate::inscribed::find_inscribed_rect`] or
/// [`crate::transform::flatten`] deal with.
pub fn rotate(image: &Raster, angle_degrees: f64, options: RotateOptions) -> Raster {
    if image.is_empty() {
        return image.clone();
    }

    if let Some(turns) = quarter_turns(angle_degrees) {
        let keeps_shape = options.expand || turns % 2 == 0 || image.width == image.height;
        if keeps_shape {
            if let Some(rotated) = rotate_quarter_turns(image, turns) {
                debug!(turns, "Rotated by exact quarter turns");
                return rotated;
            }
        }
    }

    let (dst_w, dst_h) = if options.expand {
        compute_rotated_bounds(image.width, image.height, angle_degrees)
    } else {
        (image.width, image.height)
    };
    debug!(
        src_w = image.width,
        src_h = image.height,
        dst_w,
        dst_h,
        angle_degrees,
        ?options,
        "Rotating image"
    );

    // Negate angle for correct visual rotation direction
    // (positive angle should rotate counter-clockwise visually)
    let angle_rad = -angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * Raster::CHANNELS];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            // Source position in pixel-index space (pixel i is centered on i)
            let src_x = dx * cos - dy * sin + src_cx - 0.5;
            let src_y = dx * sin + dy * cos + src_cy - 0.5;

            let pixel = match options.interpolation {
                Interpolation::Nearest => sample_nearest(image, src_x, src_y),
                filter => sample_kernel(image, src_x, src_y, filter),
            };

            let idx = (dst_y as usize * dst_w as usize + dst_x as usize) * Raster::CHANNELS;
            output[idx..idx + Raster::CHANNELS].copy_from_slice(&pixel);
        }
    }

    Raster::new(dst_w, dst_h, output)
}

fn rotate_quarter_turns(image: &Raster, turns: u32) -> Option<Raster> {
    let view =
        ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(image.width, image.height, &image.pixels[..])?;
    let rotated = match turns {
        0 => return Some(image.clone()),
        // imageops turns clockwise
        1 => imageops::rotate270(&view),
        2 => imageops::rotate180(&view),
        _ => imageops::rotate90(&view),
    };
    Some(Raster::from_rgba_image(rotated))
}

fn sample_nearest(image: &Raster, x: f64, y: f64) -> [u8; 4] {
    let px = (x + 0.5).floor();
    let py = (y + 0.5).floor();
    if px < 0.0 || py < 0.0 || px >= image.width as f64 || py >= image.height as f64 {
        return [0; 4];
    }
    image.pixel(px as u32, py as u32)
}

/// Filter taps along one axis: first tap index and up to four weights.
fn taps(coord: f64, filter: Interpolation) -> (i64, [f64; 4]) {
    let base = coord.floor();
    let f = coord - base;
    let base = base as i64;
    match filter {
        Interpolation::Bicubic => (
            base - 1,
            [
                catmull_rom(1.0 + f),
                catmull_rom(f),
                catmull_rom(1.0 - f),
                catmull_rom(2.0 - f),
            ],
        ),
        _ => (base, [1.0 - f, f, 0.0, 0.0]),
    }
}

/// Separable kernel sampling with alpha-weighted color.
///
/// Taps outside the source count as fully transparent, which is what makes
/// the content edge fade out instead of ending on a hard 255 alpha.
fn sample_kernel(image: &Raster, x: f64, y: f64, filter: Interpolation) -> [u8; 4] {
    let (w, h) = (image.width as i64, image.height as i64);
    let (x0, wx) = taps(x, filter);
    let (y0, wy) = taps(y, filter);

    let mut alpha = 0.0;
    let mut color = [0.0f64; 3];

    for (j, &weight_y) in wy.iter().enumerate() {
        let py = y0 + j as i64;
        if weight_y == 0.0 || py < 0 || py >= h {
            continue;
        }
        for (i, &weight_x) in wx.iter().enumerate() {
            let px = x0 + i as i64;
            if weight_x == 0.0 || px < 0 || px >= w {
                continue;
            }
            let pixel = image.pixel(px as u32, py as u32);
            let weighted_alpha = pixel[3] as f64 * weight_x * weight_y;
            alpha += weighted_alpha;
            for c in 0..3 {
                color[c] += pixel[c] as f64 * weighted_alpha;
            }
        }
    }

    if alpha <= 0.0 {
        return [0; 4];
    }

    let mut result = [0u8; 4];
    for c in 0..3 {
        result[c] = (color[c] / alpha).clamp(0.0, 255.0).round() as u8;
    }
    result[3] = alpha.clamp(0.0, 255.0).round() as u8;
    result
}

/// Catmull-Rom cubic (a = -0.5).
fn catmull_rom(x: f64) -> f64 {
    const A: f64 = -0.5;
    let x = x.abs();
    if x < 1.0 {
        ((A + 2.0) * x - (A + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        ((A * x - 5.0 * A) * x + 8.0 * A) * x - 4.0 * A
    } else {
        0.0
    }
}
