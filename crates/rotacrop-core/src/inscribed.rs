//! Inscribed opaque rectangle search.
//!
//! After a rectangular image is rotated onto a transparent canvas, the
//! opaque content is a tilted rectangle surrounded by transparent corners.
//! [`find_inscribed_rect`] locates an axis-aligned rectangle inside that
//! content with four directional scans instead of a global search:
//!
//! ```text
//!   column 1          row y_top
//!      |     +---------------->  x_right = last opaque
//!      v     |               |
//!   y_top    |               |   column x_right
//!            |               v
//!   x_left <-+---------------+   y_bottom = last opaque
//!   = first opaque on row y_bottom
//! ```
//!
//! Column 0 is skipped because it is usually fully transparent at the
//! rotated corner. The scan is exact for a rotated opaque rectangle and only
//! approximate for other masks. Masks with holes or several disconnected
//! opaque regions are outside its contract, and the rectangle it returns
//! for them may contain transparent cells; check with
//! [`OpacityMask::is_fully_opaque`] when the input is not a plain rotation.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::opacity::OpacityMask;

/// Column the first scan walks down.
pub const PROBE_COLUMN: u32 = 1;

/// Axis-aligned pixel rectangle, half-open on the right and bottom.
///
/// `width = x_right - x_left`, `height = y_bottom - y_top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x_left: u32,
    pub y_top: u32,
    pub x_right: u32,
    pub y_bottom: u32,
}

impl Rect {
    pub fn new(x_left: u32, y_top: u32, x_right: u32, y_bottom: u32) -> Self {
        Self {
            x_left,
            y_top,
            x_right,
            y_bottom,
        }
    }

    pub fn width(&self) -> u32 {
        self.x_right.saturating_sub(self.x_left)
    }

    pub fn height(&self) -> u32 {
        self.y_bottom.saturating_sub(self.y_top)
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// A rect with no pixels in it.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Whether pixel (x, y) lies inside the rect.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.x_left..self.x_right).contains(&x) && (self.y_top..self.y_bottom).contains(&y)
    }
}

/// Reasons the scan could not produce a rectangle.
///
/// Each variant names the scan that came up empty. They are all
/// recoverable: the mask is deterministic input, so the same mask always
/// fails the same way and retrying is pointless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InscribeError {
    #[error("mask is {width}x{height}; the scan needs at least 2x2")]
    DimensionTooSmall { width: u32, height: u32 },

    #[error("no opaque pixel in column 1")]
    NoOpaqueInColumn1,

    #[error("no opaque pixel on the top row of the rectangle")]
    NoOpaqueInRowYTop,

    #[error("no opaque pixel in the right column of the rectangle")]
    NoOpaqueInColumnXRight,

    #[error("no opaque pixel on the bottom row of the rectangle")]
    NoOpaqueInRowYBottom,
}

/// Find an opaque rectangle to crop a rotated image to.
///
/// Runs four scans in order, each starting from the previous result:
///
/// 1. Down column 1: `y_top` is the first opaque cell.
/// 2. Along row `y_top`: `x_right` is the last opaque cell.
/// 3. Down column `x_right`: `y_bottom` is the last opaque cell.
/// 4. Along row `y_bottom`: `x_left` is the first opaque cell.
///
/// The result is `Rect(x_left, y_top, x_right + 1, y_bottom + 1)`.
///
/// # Errors
///
/// `DimensionTooSmall` if the mask is narrower or shorter than 2 cells,
/// otherwise the variant for whichever scan found nothing.
pub fn find_inscribed_rect(mask: &OpacityMask) -> Result<Rect, InscribeError> {
    let (width, height) = (mask.width(), mask.height());
    if width < 2 || height < 2 {
        return Err(InscribeError::DimensionTooSmall { width, height });
    }

    let y_top = (0..height)
        .find(|&y| mask.is_opaque(PROBE_COLUMN, y))
        .ok_or(InscribeError::NoOpaqueInColumn1)?;

    let x_right = (0..width)
        .rev()
        .find(|&x| mask.is_opaque(x, y_top))
        .ok_or(InscribeError::NoOpaqueInRowYTop)?;

    let y_bottom = (0..height)
        .rev()
        .find(|&y| mask.is_opaque(x_right, y))
        .ok_or(InscribeError::NoOpaqueInColumnXRight)?;

    let x_left = (0..width)
        .find(|&x| mask.is_opaque(x, y_bottom))
        .ok_or(InscribeError::NoOpaqueInRowYBottom)?;

    let rect = Rect::new(x_left, y_top, x_right + 1, y_bottom + 1);
    debug!(width, height, ?rect, "Found inscribed rectangle");
    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Raster;
    use crate::transform::{rotate, Interpolation, RotateOptions};

    /// Build a mask from rows of `#` (opaque) and `.` (transparent).
    fn mask_from_ascii(rows: &[&str]) -> OpacityMask {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let cells = rows
            .iter()
            .flat_map(|row| row.bytes().map(|b| b == b'#'))
            .collect();
        OpacityMask::from_cells(width, height, cells).unwrap()
    }

    #[test]
    fn test_fully_opaque_4x4() {
        let mask = OpacityMask::from_fn(4, 4, |_, _| true);
        assert_eq!(find_inscribed_rect(&mask), Ok(Rect::new(0, 0, 4, 4)));
    }

    #[test]
    fn test_transparent_column_1() {
        let mask = OpacityMask::from_fn(4, 4, |x, _| x != 1);
        assert_eq!(
            find_inscribed_rect(&mask),
            Err(InscribeError::NoOpaqueInColumn1)
        );
    }

    #[test]
    fn test_fully_transparent() {
        let mask = OpacityMask::from_fn(8, 8, |_, _| false);
        assert_eq!(
            find_inscribed_rect(&mask),
            Err(InscribeError::NoOpaqueInColumn1)
        );
    }

    #[test]
    fn test_column_0_is_not_probed() {
        let mask = OpacityMask::from_fn(5, 5, |x, _| x == 0);
        assert_eq!(
            find_inscribed_rect(&mask),
            Err(InscribeError::NoOpaqueInColumn1)
        );
    }

    #[test]
    fn test_dimension_too_small() {
        for (w, h) in [(1, 10), (10, 1), (0, 0), (1, 1)] {
            let mask = OpacityMask::from_fn(w, h, |_, _| true);
            assert_eq!(
                find_inscribed_rect(&mask),
                Err(InscribeError::DimensionTooSmall {
                    width: w,
                    height: h
                })
            );
        }
    }

    #[test]
    fn test_smallest_valid_mask() {
        let mask = OpacityMask::from_fn(2, 2, |_, _| true);
        assert_eq!(find_inscribed_rect(&mask), Ok(Rect::new(0, 0, 2, 2)));
    }

    #[test]
    fn test_traced_scan() {
        let mask = mask_from_ascii(&[
            "......", //
            ".####.", // y_top = 1, x_right = 4
            "######", //
            ".#####", // y_bottom = 3, x_left = 1
            "..##..", //
        ]);
        let rect = find_inscribed_rect(&mask).unwrap();
        assert_eq!(rect, Rect::new(1, 1, 5, 4));
        assert!(mask.is_fully_opaque(&rect));
    }

    #[test]
    fn test_mask_with_hole_is_not_validated() {
        // Out-of-contract input: the scan still returns its corners even
        // though the rect covers transparent cells.
        let mask = mask_from_ascii(&[
            ".##", //
            "#.#", //
            "###", //
        ]);
        let rect = find_inscribed_rect(&mask).unwrap();
        assert_eq!(rect, Rect::new(0, 0, 3, 3));
        assert!(!mask.is_fully_opaque(&rect));
    }

    #[test]
    fn test_square_rotated_45_degrees() {
        let options = RotateOptions {
            expand: true,
            interpolation: Interpolation::Bilinear,
        };
        for size in [8u32, 16, 33, 50] {
            let square = Raster::filled(size, size, [200, 10, 10, 255]);
            let rotated = rotate(&square, 45.0, options);
            let mask = OpacityMask::from_raster(&rotated);

            let rect = find_inscribed_rect(&mask).unwrap();
            let canvas_area = rotated.width as u64 * rotated.height as u64;
            assert!(rect.area() > 0, "size {}: empty rect", size);
            assert!(rect.area() < canvas_area, "size {}: rect {:?}", size, rect);

            let corners = [
                (rect.x_left, rect.y_top),
                (rect.x_right - 1, rect.y_top),
                (rect.x_left, rect.y_bottom - 1),
                (rect.x_right - 1, rect.y_bottom - 1),
            ];
            for (x, y) in corners {
                assert!(mask.is_opaque(x, y), "size {}: corner ({}, {})", size, x, y);
            }
        }
    }

    #[test]
    fn test_rect_geometry() {
        let rect = Rect::new(2, 3, 7, 5);
        assert_eq!(rect.width(), 5);
        assert_eq!(rect.height(), 2);
        assert_eq!(rect.area(), 10);
        assert!(!rect.is_empty());
        assert!(rect.contains(2, 3));
        assert!(rect.contains(6, 4));
        assert!(!rect.contains(7, 4));
        assert!(!rect.contains(6, 5));
        assert!(Rect::new(4, 4, 4, 9).is_empty());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            InscribeError::DimensionTooSmall {
                width: 1,
                height: 5
            }
            .to_string(),
            "mask is 1x5; the scan needs at least 2x2"
        );
        assert_eq!(
            InscribeError::NoOpaqueInColumn1.to_string(),
            "no opaque pixel in column 1"
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    /// Mask dimensions plus an opaque axis-aligned block that crosses
    /// column 1.
    fn block_strategy() -> impl Strategy<Value = (u32, u32, Rect)> {
        (2u32..=40, 2u32..=40)
            .prop_flat_map(|(w, h)| (Just(w), Just(h), 0u32..=1, 2u32..=w, 0u32..h))
            .prop_flat_map(|(w, h, x0, x1, y0)| {
                (Just(w), Just(h), Just(x0), Just(x1), Just(y0), (y0 + 1)..=h)
            })
            .prop_map(|(w, h, x0, x1, y0, y1)| (w, h, Rect::new(x0, y0, x1, y1)))
    }

    /// Random mask with a second random grid of the same size.
    fn mask_pair_strategy() -> impl Strategy<Value = (u32, u32, Vec<bool>, Vec<bool>)> {
        (3u32..=24, 3u32..=24).prop_flat_map(|(w, h)| {
            let n = (w * h) as usize;
            (Just(w), Just(h), vec(any::<bool>(), n), vec(any::<bool>(), n))
        })
    }

    /// L1 ball centered on an n x n grid, the raster of a square turned 45
    /// degrees.
    fn diamond(n: u32, radius: f64) -> OpacityMask {
        let c = n as f64 / 2.0;
        OpacityMask::from_fn(n, n, |x, y| {
            (x as f64 + 0.5 - c).abs() + (y as f64 + 0.5 - c).abs() <= radius
        })
    }

    proptest! {
        /// Property: an unrotated, fully opaque image keeps its full frame.
        #[test]
        fn prop_fully_opaque_returns_full_frame(w in 2u32..=64, h in 2u32..=64) {
            let mask = OpacityMask::from_fn(w, h, |_, _| true);
            prop_assert_eq!(find_inscribed_rect(&mask), Ok(Rect::new(0, 0, w, h)));
        }

        /// Property: an opaque block crossing column 1 is found exactly.
        #[test]
        fn prop_block_found_exactly((w, h, block) in block_strategy()) {
            let mask = OpacityMask::from_fn(w, h, |x, y| block.contains(x, y));
            let rect = find_inscribed_rect(&mask).unwrap();

            prop_assert_eq!(rect, block);
            prop_assert!(mask.is_fully_opaque(&rect));
        }

        /// Property: diamonds yield a non-empty, fully opaque rectangle.
        #[test]
        fn prop_diamond_rect_is_opaque(n in 4u32..=59, shrink in 0u32..=2) {
            let radius = n as f64 / 2.0 - shrink as f64 * 0.5;
            let mask = diamond(n, radius);
            let rect = find_inscribed_rect(&mask).unwrap();

            prop_assert!(rect.area() > 0);
            prop_assert!(rect.area() < (n * n) as u64);
            prop_assert!(mask.is_fully_opaque(&rect), "rect {:?} in diamond n={} r={}", rect, n, radius);
        }

        /// Property: only the four scan lines influence the result.
        #[test]
        fn prop_only_scan_lines_matter((w, h, cells, noise) in mask_pair_strategy()) {
            let mask = OpacityMask::from_cells(w, h, cells.clone()).unwrap();
            let result = find_inscribed_rect(&mask);
            prop_assume!(result.is_ok());
            let rect = result.unwrap();

            let x_right = rect.x_right - 1;
            let y_bottom = rect.y_bottom - 1;
            let mutated = OpacityMask::from_fn(w, h, |x, y| {
                let on_scan_line =
                    x == PROBE_COLUMN || x == x_right || y == rect.y_top || y == y_bottom;
                let i = (y * w + x) as usize;
                if on_scan_line { cells[i] } else { noise[i] }
            });

            prop_assert_eq!(find_inscribed_rect(&mutated), Ok(rect));
        }

        /// Property: a transparent column 1 always fails the first scan.
        #[test]
        fn prop_transparent_column_1_fails((w, h, cells, _noise) in mask_pair_strategy()) {
            let mask = OpacityMask::from_fn(w, h, |x, y| {
                x != PROBE_COLUMN && cells[(y * w + x) as usize]
            });
            prop_assert_eq!(find_inscribed_rect(&mask), Err(InscribeError::NoOpaqueInColumn1));
        }

        /// Property: the scanned corners are opaque and the rect stays in bounds.
        #[test]
        fn prop_scanned_corners_opaque((w, h, cells, _noise) in mask_pair_strategy()) {
            let mask = OpacityMask::from_cells(w, h, cells).unwrap();
            if let Ok(rect) = find_inscribed_rect(&mask) {
                prop_assert!(!rect.is_empty());
                prop_assert!(rect.x_right <= w && rect.y_bottom <= h);
                prop_assert!(mask.is_opaque(PROBE_COLUMN, rect.y_top));
                prop_assert!(mask.is_opaque(rect.x_right - 1, rect.y_top));
                prop_assert!(mask.is_opaque(rect.x_right - 1, rect.y_bottom - 1));
                prop_assert!(mask.is_opaque(rect.x_left, rect.y_bottom - 1));
            }
        }
    }
}
