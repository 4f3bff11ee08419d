//! JPEG encoding.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{validate, EncodeError};
use crate::decode::Raster;

/// Encode a raster to JPEG bytes.
///
/// JPEG has no alpha channel, so alpha is dropped. Run the raster through
/// [`crate::transform::flatten`] first if it still has transparent areas.
///
/// # Arguments
///
/// * `raster` - Image to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(raster: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(raster)?;

    let quality = quality.clamp(1, 100);

    let rgb: Vec<u8> = raster
        .pixels
        .chunks_exact(Raster::CHANNELS)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, raster.width, raster.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
