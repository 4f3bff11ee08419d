//! Rotacrop WASM - WebAssembly bindings for the rotate filter
//!
//! This crate exposes the rotacrop-core functionality to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for RGBA image data
//! - `decode` - Image decoding bindings (JPEG, PNG)
//! - `encode` - Image encoding bindings (JPEG, PNG)
//! - `transform` - Rotate filter, inscribed rectangle scan and crop
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, rotate_filter, encode_png } from '@rotacrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const rotated = rotate_filter(image, { angle: -8 });
//! const png = encode_png(rotated);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod transform;
mod types;

// Re-export public types
pub use decode::decode_image;
pub use encode::{encode_jpeg, encode_png};
pub use transform::{crop, find_inscribed_rect, rotate_filter, rotate_filter_str};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
