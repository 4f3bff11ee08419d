//! Compositing over a solid background.

use crate::color::Rgb;
use crate::decode::Raster;

/// Paste `image` over a solid `background`, using its alpha as the mask.
///
/// `out = src * a + bg * (1 - a)` per channel. The result is fully opaque,
/// which is what the expand mode needs to hide the rotated corners.
pub fn flatten(image: &Raster, background: Rgb) -> Raster {
    let bg = background.channels();
    let mut pixels = Vec::with_capacity(image.pixels.len());

    for px in image.pixels.chunks_exact(Raster::CHANNELS) {
        let alpha = px[3] as u32;
        for c in 0..3 {
            let blended = (px[c] as u32 * alpha + bg[c] as u32 * (255 - alpha) + 127) / 255;
            pixels.push(blended as u8);
        }
        pixels.push(u8::MAX);
    }

    Raster::new(image.width, image.height, pixels)
}
