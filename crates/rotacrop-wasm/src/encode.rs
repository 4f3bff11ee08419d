//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode an image to PNG, keeping alpha
//! - [`encode_jpeg`] - Encode an image to JPEG, dropping alpha
//!
//! # Example
//!
//! ```typescript
//! const rotated = rotate_filter(image, { angle: 10 });
//! const jpeg = encode_jpeg(rotated, 90);
//! await writable.write(new Blob([jpeg], { type: 'image/jpeg' }));
//! ```

use crate::types::JsRaster;
use rotacrop_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image to PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsRaster) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&image.to_raster()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - Image to encode. Alpha is discarded, so flatten transparent
///   images first (the rotate filter output already is).
/// * `quality` - JPEG quality (1-100, recommended: 90)
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRaster, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(&image.to_raster(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}
