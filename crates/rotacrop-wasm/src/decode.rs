//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, rotate_filter } from '@rotacrop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const rotated = rotate_filter(image, { angle: 7.5 });
//! ```

use crate::types::JsRaster;
use rotacrop_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG image from bytes to RGBA.
///
/// EXIF orientation is applied, so the result is upright.
///
/// # Errors
///
/// Returns an error if the format is not recognized, the data is corrupted,
/// or the image has no pixels.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
