//! Opacity masks derived from an alpha channel.
//!
//! A cell is OPAQUE only when its alpha is exactly 255. Anything lower,
//! including the anti-aliased fringe a rotation leaves along the content
//! edge, counts as TRANSPARENT.

use crate::decode::Raster;
use crate::inscribed::Rect;

/// Boolean per-pixel opacity grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpacityMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl OpacityMask {
    /// Build a mask from the alpha channel of an RGBA raster.
    pub fn from_raster(raster: &Raster) -> Self {
        let cells = raster
            .pixels
            .chunks_exact(Raster::CHANNELS)
            .map(|px| px[3] == u8::MAX)
            .collect();
        Self {
            width: raster.width,
            height: raster.height,
            cells,
        }
    }

    /// Build a mask from the alpha channel of an `image::RgbaImage`.
    pub fn from_rgba(img: &image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let cells = img.pixels().map(|px| px.0[3] == u8::MAX).collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a mask by evaluating `opaque(x, y)` for every cell.
    pub fn from_fn<F>(width: u32, height: u32, mut opaque: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(opaque(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a mask from row-major cells. Returns `None` if the length does
    /// not match `width * height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<bool>) -> Option<Self> {
        if cells.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether cell (x, y) is opaque. Out-of-range coordinates are
    /// transparent.
    #[inline]
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Number of opaque cells.
    pub fn opaque_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Exhaustively check that every cell inside `rect` is opaque.
    ///
    /// An empty rect or one reaching past the mask is never fully opaque.
    pub fn is_fully_opaque(&self, rect: &Rect) -> bool {
        if rect.is_empty() || rect.x_right > self.width || rect.y_bottom > self.height {
            return false;
        }
        (rect.y_top..rect.y_bottom)
            .all(|y| (rect.x_left..rect.x_right).all(|x| self.is_opaque(x, y)))
    }
}
