//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core rotacrop
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use rotacrop_core::decode::Raster;
use wasm_bindgen::prelude::*;

/// An RGBA image for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`. Keep intermediate images
/// in WASM memory and only extract pixels for the final result.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create an image from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order),
    ///   e.g. `ImageData.data` from a canvas
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length is not `width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRaster, JsValue> {
        check_length(width, height, &pixels).map_err(|e| JsValue::from_str(&e))?;
        Ok(JsRaster {
            width,
            height,
            pixels,
        })
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRaster {
    pub(crate) fn from_raster(raster: Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
            pixels: raster.pixels,
        }
    }

    /// Convert to a core Raster. Clones the pixel data.
    pub(crate) fn to_raster(&self) -> Raster {
        Raster::new(self.width, self.height, self.pixels.clone())
    }
}

fn check_length(width: u32, height: u32, pixels: &[u8]) -> Result<(), String> {
    let expected = width as usize * height as usize * Raster::CHANNELS;
    if pixels.len() != expected {
        return Err(format!(
            "Pixel buffer has {} bytes, expected {} for {}x{} RGBA",
            pixels.len(),
            expected,
            width,
            height
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_accessors() {
        let img = JsRaster::from_raster(Raster::filled(100, 50, [1, 2, 3, 255]));
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 20000);
        assert_eq!(&img.pixels()[..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn test_round_trip_through_core() {
        let raster = Raster::filled(7, 3, [9, 8, 7, 6]);
        let js_img = JsRaster::from_raster(raster.clone());
        assert_eq!(js_img.to_raster(), raster);
    }

    #[test]
    fn test_check_length() {
        assert!(check_length(2, 2, &[0u8; 16]).is_ok());
        assert!(check_length(0, 5, &[]).is_ok());

        let err = check_length(2, 2, &[0u8; 12]).unwrap_err();
        assert_eq!(err, "Pixel buffer has 12 bytes, expected 16 for 2x2 RGBA");
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_constructor_validates_length() {
        assert!(JsRaster::new(2, 2, vec![0u8; 16]).is_ok());
        assert!(JsRaster::new(2, 2, vec![0u8; 15]).is_err());
    }
}
