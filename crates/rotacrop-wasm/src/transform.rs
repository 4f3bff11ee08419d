//! WASM bindings for the rotate filter and its building blocks.
//!
//! The full filter is [`rotate_filter`]. [`find_inscribed_rect`] and
//! [`crop`] are exposed separately so callers that rotate on their own
//! (e.g. on a canvas) can still trim the transparent corners.

use crate::types::JsRaster;
use rotacrop_core::filter::{self, CropOutcome, RotateOutcome, RotateParams};
use rotacrop_core::inscribed::{self, Rect};
use rotacrop_core::opacity::OpacityMask;
use rotacrop_core::transform;
use wasm_bindgen::prelude::*;

/// Rotate an image with the rotate filter.
///
/// # Arguments
///
/// * `image` - Source image
/// * `options` - `{ angle, expand?, background?, interpolation? }`. Missing
///   fields take their defaults (crop mode, white, bicubic).
///
/// # Returns
///
/// The rotated image. In crop mode a failed crop falls back to the expanded
/// image on the background color and logs a warning to the console.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropped = rotate_filter(image, { angle: 12.5 });
/// const padded = rotate_filter(image, { angle: 30, expand: true, background: '#202020' });
/// ```
#[wasm_bindgen]
pub fn rotate_filter(image: &JsRaster, options: JsValue) -> Result<JsRaster, JsValue> {
    let params: RotateParams = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid rotate options: {}", e)))?;
    run_filter(image, &params)
}

/// Rotate an image using filter arguments in string form,
/// `angle[,expand[,background]]`.
///
/// ```typescript
/// const rotated = rotate_filter_str(image, '-15,true,navy');
/// ```
#[wasm_bindgen]
pub fn rotate_filter_str(image: &JsRaster, args: &str) -> Result<JsRaster, JsValue> {
    let params: RotateParams = args.parse().map_err(|e: filter::FilterError| {
        JsValue::from_str(&e.to_string())
    })?;
    run_filter(image, &params)
}

/// Find the opaque rectangle to crop an already rotated RGBA image to.
///
/// Returns `{ x_left, y_top, x_right, y_bottom }` (right and bottom
/// exclusive), or `undefined` when the scan finds nothing.
#[wasm_bindgen]
pub fn find_inscribed_rect(image: &JsRaster) -> Result<JsValue, JsValue> {
    let rect = inscribed_rect(image);
    serde_wasm_bindgen::to_value(&rect).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crop an image to a `{ x_left, y_top, x_right, y_bottom }` rectangle.
#[wasm_bindgen]
pub fn crop(image: &JsRaster, rect: JsValue) -> Result<JsRaster, JsValue> {
    let rect: Rect = serde_wasm_bindgen::from_value(rect)
        .map_err(|e| JsValue::from_str(&format!("Invalid rectangle: {}", e)))?;
    transform::crop(&image.to_raster(), &rect)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn run_filter(image: &JsRaster, params: &RotateParams) -> Result<JsRaster, JsValue> {
    let outcome = apply(image, params).map_err(|e| JsValue::from_str(&e))?;
    if let CropOutcome::Fallback(reason) = &outcome.crop {
        report_fallback(&reason.to_string());
    }
    Ok(JsRaster::from_raster(outcome.image))
}

fn apply(image: &JsRaster, params: &RotateParams) -> Result<RotateOutcome, String> {
    filter::rotate_filter(&image.to_raster(), params).map_err(|e| e.to_string())
}

fn inscribed_rect(image: &JsRaster) -> Option<Rect> {
    let mask = OpacityMask::from_raster(&image.to_raster());
    inscribed::find_inscribed_rect(&mask).ok()
}

#[cfg(target_arch = "wasm32")]
fn report_fallback(reason: &str) {
    web_sys::console::warn_1(&JsValue::from_str(&format!(
        "rotate: keeping uncropped image ({})",
        reason
    )));
}

#[cfg(not(target_arch = "wasm32"))]
fn report_fallback(_reason: &str) {}

#[cfg(test)]
mod tests {
    use super::*;
    use rotacrop_core::decode::Raster;

    fn test_image(width: u32, height: u32) -> JsRaster {
        JsRaster::from_raster(Raster::filled(width, height, [40, 80, 120, 255]))
    }

    #[test]
    fn test_apply_zero_angle_keeps_size() {
        let img = test_image(100, 60);
        let outcome = apply(&img, &RotateParams::new(0.0)).unwrap();
        assert_eq!(outcome.image.width, 100);
        assert_eq!(outcome.image.height, 60);
    }

    #[test]
    fn test_apply_90_degrees_swaps_dimensions() {
        let img = test_image(100, 50);
        let outcome = apply(&img, &RotateParams::new(90.0)).unwrap();
        assert_eq!((outcome.image.width, outcome.image.height), (50, 100));
    }

    #[test]
    fn test_apply_expand_grows_canvas() {
        let img = test_image(100, 100);
        let mut params = RotateParams::new(45.0);
        params.expand = true;
        let outcome = apply(&img, &params).unwrap();
        assert!(outcome.image.width > 100);
        assert!(outcome.image.height > 100);
        assert!(outcome.image.is_opaque());
    }

    #[test]
    fn test_apply_crop_is_opaque() {
        let img = test_image(80, 60);
        let outcome = apply(&img, &RotateParams::new(12.0)).unwrap();
        assert!(outcome.image.is_opaque());
        assert!(outcome.image.width <= 80 + 60);
    }

    #[test]
    fn test_apply_rejects_bad_color() {
        let mut params = RotateParams::new(5.0);
        params.background = "#zzz".to_string();
        let err = apply(&test_image(10, 10), &params).unwrap_err();
        assert!(err.starts_with("invalid background color"));
    }

    #[test]
    fn test_inscribed_rect_full_frame() {
        let rect = inscribed_rect(&test_image(20, 10));
        assert_eq!(rect, Some(Rect::new(0, 0, 20, 10)));
    }

    #[test]
    fn test_inscribed_rect_transparent_image() {
        let img = JsRaster::from_raster(Raster::filled(20, 10, [0, 0, 0, 0]));
        assert_eq!(inscribed_rect(&img), None);
    }
}
