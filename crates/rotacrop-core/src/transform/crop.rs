//! Cropping to pixel rectangles.
//!
//! The rectangle is half-open: `x_right` and `y_bottom` are one past the
//! last column and row kept, matching [`Rect`].

use thiserror::Error;

use crate::decode::Raster;
use crate::inscribed::Rect;

/// Errors from [`crop`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CropError {
    /// The rectangle has zero width or height.
    #[error("crop rectangle {0:?} is empty")]
    EmptyRect(Rect),

    /// The rectangle reaches past the image.
    #[error("crop rectangle {rect:?} exceeds the {width}x{height} image")]
    OutOfBounds { rect: Rect, width: u32, height: u32 },
}

/// Copy the pixels inside `rect` into a new raster.
///
/// # Errors
///
/// Rejects empty rectangles and rectangles extending past the image rather
/// than clamping them, since a rectangle from the inscribed-rectangle scan
/// is always inside the mask it was computed on.
pub fn crop(image: &Raster, rect: &Rect) -> Result<Raster, CropError> {
    if rect.is_empty() {
        return Err(CropError::EmptyRect(*rect));
    }
    if rect.x_right > image.width || rect.y_bottom > image.height {
        return Err(CropError::OutOfBounds {
            rect: *rect,
            width: image.width,
            height: image.height,
        });
    }

    // Fast path: full-frame crop returns a clone
    if rect.x_left == 0
        && rect.y_top == 0
        && rect.x_right == image.width
        && rect.y_bottom == image.height
    {
        return Ok(image.clone());
    }

    let out_width = rect.width();
    let out_height = rect.height();
    let row_bytes = out_width as usize * Raster::CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for y in rect.y_top..rect.y_bottom {
        let start = image.offset(rect.x_left, y);
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Ok(Raster::new(out_width, out_height, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Image dimensions plus a non-empty rect inside them.
    fn crop_strategy() -> impl Strategy<Value = (u32, u32, Rect)> {
        (1u32..=60, 1u32..=60)
            .prop_flat_map(|(w, h)| (Just(w), Just(h), 0..w, 0..h))
            .prop_flat_map(|(w, h, x0, y0)| {
                (Just(w), Just(h), Just(x0), Just(y0), (x0 + 1)..=w, (y0 + 1)..=h)
            })
            .prop_map(|(w, h, x0, y0, x1, y1)| (w, h, Rect::new(x0, y0, x1, y1)))
    }

    fn create_test_image(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 7, 255]);
            }
        }
        Raster::new(width, height, pixels)
    }

    proptest! {
        /// Property: output size equals the rect size.
        #[test]
        fn prop_output_matches_rect((w, h, rect) in crop_strategy()) {
            let img = create_test_image(w, h);
            let result = crop(&img, &rect).unwrap();

            prop_assert_eq!(result.width, rect.width());
            prop_assert_eq!(result.height, rect.height());
            prop_assert_eq!(result.pixels.len(), rect.area() as usize * 4);
        }

        /// Property: every output pixel comes from the matching source pixel.
        #[test]
        fn prop_pixels_come_from_rect((w, h, rect) in crop_strategy()) {
            let img = create_test_image(w, h);
            let result = crop(&img, &rect).unwrap();

            for y in 0..result.height {
                for x in 0..result.width {
                    prop_assert_eq!(
                        result.pixel(x, y),
                        img.pixel(rect.x_left + x, rect.y_top + y)
                    );
                }
            }
        }
    }
}
